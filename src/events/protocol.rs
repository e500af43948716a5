use serde::{Deserialize, Serialize};

use crate::lifecycle::service::RepairView;

// ── Client -> Server messages ──

/// Messages the UI sends over the event socket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Re-send the current view of the watched repair.
    Refresh,
    Ping,
}

// ── Server -> Client messages ──

/// State-change notifications pushed to the UI.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// A repair was created or changed; carries the fresh view.
    RepairUpdated { repair: Box<RepairView> },
    /// The repair entered the locked state.
    RepairLocked { repair_id: i32 },
    /// The repair left the locked state.
    RepairUnlocked { repair_id: i32 },
    RepairDeleted { repair_id: i32 },
    Pong,
    Error { message: String },
}

impl ServerMessage {
    /// The repair this message concerns, if any.
    pub fn repair_id(&self) -> Option<i32> {
        match self {
            ServerMessage::RepairUpdated { repair } => Some(repair.repair.id),
            ServerMessage::RepairLocked { repair_id }
            | ServerMessage::RepairUnlocked { repair_id }
            | ServerMessage::RepairDeleted { repair_id } => Some(*repair_id),
            ServerMessage::Pong | ServerMessage::Error { .. } => None,
        }
    }
}
