use std::collections::HashMap;
use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

use crate::events::protocol::ServerMessage;

/// What a subscriber wants to hear about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    AllRepairs,
    Repair(i32),
}

/// A handle to send messages to a connected WebSocket client.
#[derive(Debug, Clone)]
pub struct SubscriberHandle {
    pub subscriber_id: Uuid,
    pub sender: mpsc::UnboundedSender<ServerMessage>,
}

/// Fans repair events out to connected UI windows.
///
/// A detail view subscribes to one repair; the list view subscribes to all.
#[derive(Default)]
pub struct EventHub {
    /// topic -> list of subscriber handles
    topics: RwLock<HashMap<Topic, Vec<SubscriberHandle>>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber. Returns its id and the receiver to drain.
    pub async fn subscribe(&self, topic: Topic) -> (Uuid, mpsc::UnboundedReceiver<ServerMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let subscriber_id = Uuid::new_v4();

        let mut topics = self.topics.write().await;
        topics.entry(topic).or_default().push(SubscriberHandle {
            subscriber_id,
            sender: tx,
        });

        (subscriber_id, rx)
    }

    pub async fn unsubscribe(&self, topic: Topic, subscriber_id: Uuid) {
        let mut topics = self.topics.write().await;

        if let Some(subscribers) = topics.get_mut(&topic) {
            subscribers.retain(|s| s.subscriber_id != subscriber_id);

            // Clean up empty topics.
            if subscribers.is_empty() {
                topics.remove(&topic);
            }
        }
    }

    /// Deliver a repair event to its repair's watchers and to list watchers.
    pub async fn publish(&self, message: ServerMessage) {
        let Some(repair_id) = message.repair_id() else {
            return;
        };

        let topics = self.topics.read().await;
        for topic in [Topic::Repair(repair_id), Topic::AllRepairs] {
            if let Some(subscribers) = topics.get(&topic) {
                for subscriber in subscribers {
                    // A failed send means the socket is gone; unsubscribe() cleans it up.
                    let _ = subscriber.sender.send(message.clone());
                }
            }
        }
    }

    pub async fn subscriber_count(&self, topic: Topic) -> usize {
        let topics = self.topics.read().await;
        topics.get(&topic).map(Vec::len).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn events_reach_repair_and_list_watchers() {
        let hub = EventHub::new();
        let (_, mut detail) = hub.subscribe(Topic::Repair(5)).await;
        let (_, mut other) = hub.subscribe(Topic::Repair(6)).await;
        let (_, mut list) = hub.subscribe(Topic::AllRepairs).await;

        hub.publish(ServerMessage::RepairLocked { repair_id: 5 }).await;

        assert!(matches!(
            detail.try_recv(),
            Ok(ServerMessage::RepairLocked { repair_id: 5 })
        ));
        assert!(matches!(
            list.try_recv(),
            Ok(ServerMessage::RepairLocked { repair_id: 5 })
        ));
        assert!(other.try_recv().is_err());
    }

    #[tokio::test]
    async fn unsubscribe_removes_empty_topics() {
        let hub = EventHub::new();
        let (id, _rx) = hub.subscribe(Topic::Repair(5)).await;
        assert_eq!(hub.subscriber_count(Topic::Repair(5)).await, 1);

        hub.unsubscribe(Topic::Repair(5), id).await;
        assert_eq!(hub.subscriber_count(Topic::Repair(5)).await, 0);
    }
}
