//! Repairs sharing a serial number with the one being viewed.

use crate::lifecycle::port::RepairStore;
use crate::models::repairs;

/// Every other repair with the same serial number, in store order.
///
/// Blank serial numbers are never looked up. A failing store degrades to an
/// empty history.
pub async fn history(store: &dyn RepairStore, repair: &repairs::Model) -> Vec<repairs::Model> {
    let serial = match repair.serial_number.as_deref().map(str::trim) {
        Some(serial) if !serial.is_empty() => serial,
        _ => return Vec::new(),
    };

    match store.get_repairs_by_serial_number(serial).await {
        Ok(rows) => rows.into_iter().filter(|r| r.id != repair.id).collect(),
        Err(e) => {
            tracing::warn!(repair_id = repair.id, serial, error = %e, "history lookup failed");
            Vec::new()
        }
    }
}
