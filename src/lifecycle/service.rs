use std::sync::Arc;

use serde::Serialize;

use crate::events::hub::EventHub;
use crate::events::protocol::ServerMessage;
use crate::lifecycle::compose::{self, DEFAULT_TEMPLATE, MessagePreview};
use crate::lifecycle::confirm::{Confirmed, GuardedAction};
use crate::lifecycle::ledger::{Money, amount_left};
use crate::lifecycle::lock::{LockState, ensure_editable, is_locked, lock_state};
use crate::lifecycle::port::{RepairChange, RepairStore};
use crate::lifecycle::status::transition;
use crate::lifecycle::{LifecycleError, history, validation};
use crate::models::repairs::{self, CreateRepair, RepairListQuery, RepairStatus, UpdateRepairDetails};

/// A repair plus everything the UI derives from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepairView {
    #[serde(flatten)]
    pub repair: repairs::Model,
    pub status_label: &'static str,
    pub lock_state: LockState,
    pub is_locked: bool,
    pub amount_left: Money,
}

impl From<repairs::Model> for RepairView {
    fn from(repair: repairs::Model) -> Self {
        Self {
            status_label: repair.status.label(),
            lock_state: lock_state(repair.status, repair.is_unlocked),
            is_locked: is_locked(&repair),
            amount_left: amount_left(&repair),
            repair,
        }
    }
}

/// Drives the repair lifecycle over an injected [`RepairStore`].
///
/// Every mutation re-reads the record, passes it through the lock gate,
/// writes one [`RepairChange`], and re-reads again so callers always get the
/// persisted state. Nothing is applied when the store call fails.
pub struct RepairService {
    store: Arc<dyn RepairStore>,
    events: Arc<EventHub>,
}

impl RepairService {
    pub fn new(store: Arc<dyn RepairStore>, events: Arc<EventHub>) -> Self {
        Self { store, events }
    }

    pub fn events(&self) -> &Arc<EventHub> {
        &self.events
    }

    pub async fn load(&self, id: i32) -> Result<repairs::Model, LifecycleError> {
        self.store
            .get_repair_by_id(id)
            .await?
            .ok_or(LifecycleError::NotFound { id })
    }

    pub async fn view(&self, id: i32) -> Result<RepairView, LifecycleError> {
        self.load(id).await.map(RepairView::from)
    }

    /// Log a new repair. It always starts in `pending-diagnosis`, unlocked.
    pub async fn create(&self, input: CreateRepair) -> Result<RepairView, LifecycleError> {
        let input = validation::validate_new_repair(input)?;
        let repair = self.store.insert_repair(input).await?;
        tracing::info!(repair_id = repair.id, "repair logged");

        let view = RepairView::from(repair);
        self.publish_updated(view.clone()).await;
        Ok(view)
    }

    pub async fn list(&self, query: &RepairListQuery) -> Result<Vec<RepairView>, LifecycleError> {
        let rows = self.store.list_repairs(query).await?;
        Ok(rows.into_iter().map(RepairView::from).collect())
    }

    /// Load a repair that is about to be edited, refusing locked ones.
    async fn load_editable(&self, id: i32) -> Result<repairs::Model, LifecycleError> {
        let current = self.load(id).await?;
        ensure_editable(&current)?;
        Ok(current)
    }

    async fn apply(
        &self,
        current: &repairs::Model,
        change: RepairChange,
    ) -> Result<RepairView, LifecycleError> {
        let id = current.id;
        if !self.store.update_repair(id, change).await? {
            return Err(LifecycleError::NotFound { id });
        }

        let view = self.view(id).await?;
        match (is_locked(current), view.is_locked) {
            (false, true) => {
                tracing::info!(repair_id = id, "repair locked");
                self.events
                    .publish(ServerMessage::RepairLocked { repair_id: id })
                    .await;
            }
            (true, false) => {
                tracing::info!(repair_id = id, "repair unlocked");
                self.events
                    .publish(ServerMessage::RepairUnlocked { repair_id: id })
                    .await;
            }
            _ => {}
        }
        self.publish_updated(view.clone()).await;

        Ok(view)
    }

    async fn publish_updated(&self, view: RepairView) {
        self.events
            .publish(ServerMessage::RepairUpdated {
                repair: Box::new(view),
            })
            .await;
    }

    pub async fn update_details(
        &self,
        id: i32,
        input: UpdateRepairDetails,
    ) -> Result<RepairView, LifecycleError> {
        let details = validation::validate_details(input)?;
        let current = self.load_editable(id).await?;
        self.apply(&current, RepairChange::Details(details)).await
    }

    pub async fn change_status(
        &self,
        id: i32,
        requested: RepairStatus,
    ) -> Result<RepairView, LifecycleError> {
        let current = self.load_editable(id).await?;
        let next = transition(&current, requested);
        tracing::info!(
            repair_id = id,
            from = current.status.label(),
            to = next.status.label(),
            "status change"
        );
        self.apply(
            &current,
            RepairChange::Status {
                status: next.status,
                is_unlocked: next.is_unlocked,
            },
        )
        .await
    }

    pub async fn update_costs(
        &self,
        id: i32,
        repair_cost: Money,
        amount_paid: Money,
    ) -> Result<RepairView, LifecycleError> {
        validation::validate_costs(repair_cost, amount_paid)?;
        let current = self.load_editable(id).await?;
        self.apply(
            &current,
            RepairChange::Costs {
                repair_cost,
                amount_paid,
            },
        )
        .await
    }

    pub async fn set_warranty(
        &self,
        id: i32,
        under_warranty: bool,
    ) -> Result<RepairView, LifecycleError> {
        let current = self.load_editable(id).await?;
        self.apply(&current, RepairChange::Warranty { under_warranty })
            .await
    }

    pub async fn add_part(&self, id: i32, part: &str) -> Result<RepairView, LifecycleError> {
        let part = validation::validate_part(part)?;
        let current = self.load_editable(id).await?;

        let mut parts_used = current.parts_used.0.clone();
        parts_used.push(part);
        self.apply(&current, RepairChange::Parts { parts_used })
            .await
    }

    pub async fn remove_part(&self, id: i32, index: usize) -> Result<RepairView, LifecycleError> {
        let current = self.load_editable(id).await?;

        let mut parts_used = current.parts_used.0.clone();
        if index >= parts_used.len() {
            return Err(LifecycleError::Validation(format!(
                "repair {id} has no part at position {index}"
            )));
        }
        parts_used.remove(index);
        self.apply(&current, RepairChange::Parts { parts_used })
            .await
    }

    /// Manual override of the lock. A repair that is not locked is returned as-is.
    pub async fn unlock(&self, confirmed: Confirmed) -> Result<RepairView, LifecycleError> {
        if confirmed.action() != GuardedAction::Unlock {
            return Err(LifecycleError::Confirmation(
                "unlock requires an unlock confirmation".to_string(),
            ));
        }

        let current = self.load(confirmed.repair_id()).await?;
        if !is_locked(&current) {
            return Ok(current.into());
        }
        self.apply(&current, RepairChange::Unlock).await
    }

    pub async fn delete(&self, confirmed: Confirmed) -> Result<(), LifecycleError> {
        if confirmed.action() != GuardedAction::Delete {
            return Err(LifecycleError::Confirmation(
                "delete requires a delete confirmation".to_string(),
            ));
        }

        let id = confirmed.repair_id();
        if !self.store.delete_repair(id).await? {
            return Err(LifecycleError::NotFound { id });
        }

        tracing::info!(repair_id = id, "repair deleted");
        self.events
            .publish(ServerMessage::RepairDeleted { repair_id: id })
            .await;
        Ok(())
    }

    pub async fn history(&self, id: i32) -> Result<Vec<RepairView>, LifecycleError> {
        let current = self.load(id).await?;
        let rows = history::history(self.store.as_ref(), &current).await;
        Ok(rows.into_iter().map(RepairView::from).collect())
    }

    /// The status template for the repair's current status, filled in.
    pub async fn status_message(&self, id: i32) -> Result<MessagePreview, LifecycleError> {
        let current = self.load(id).await?;
        let label = current.status.label();

        let template = match self.store.get_whatsapp_template_by_status(label).await {
            Ok(Some(row)) => row.template,
            Ok(None) => DEFAULT_TEMPLATE.to_string(),
            Err(e) => {
                tracing::warn!(repair_id = id, status = label, error = %e, "template lookup failed");
                DEFAULT_TEMPLATE.to_string()
            }
        };

        let message = compose::compose(&template, &current);
        Ok(compose::preview(message, &current))
    }

    /// One message covering this repair and every earlier one for the same serial.
    pub async fn history_message(&self, id: i32) -> Result<MessagePreview, LifecycleError> {
        let current = self.load(id).await?;
        let rows = history::history(self.store.as_ref(), &current).await;

        let message = compose::compose_history(&current, &rows);
        Ok(compose::preview(message, &current))
    }
}
