//! WhatsApp message composition.
//!
//! Pure string work: nothing here sends anything. The caller shows the result
//! for review and may open the link built by [`whatsapp_url`].

use std::fmt::Write as _;

use reqwest::Url;
use serde::Serialize;

use crate::lifecycle::ledger::{amount_left, effective_cost};
use crate::models::repairs;

/// Used when no template is stored for a status.
pub const DEFAULT_TEMPLATE: &str = "Hello {customerName}, the status of your {itemBrand} {itemModel} (repair #{repairId}) is now: {status}.";

const WHATSAPP_BASE: &str = "https://wa.me/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessagePreview {
    pub message: String,
    pub whatsapp_url: Option<String>,
}

fn or_fallback<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => fallback,
    }
}

fn placeholder(name: &str, repair: &repairs::Model) -> Option<String> {
    let value = match name {
        "customerName" => or_fallback(Some(&repair.customer_name), "Customer").to_string(),
        "itemBrand" => or_fallback(Some(&repair.item_brand), "").to_string(),
        "itemModel" => or_fallback(repair.item_model.as_deref(), "").to_string(),
        "serialNumber" => or_fallback(repair.serial_number.as_deref(), "N/A").to_string(),
        "status" => repair.status.label().to_string(),
        "repairId" => repair.id.to_string(),
        "repairCost" => repair.repair_cost.to_string(),
        "amountPaid" => repair.amount_paid.to_string(),
        "amountLeft" => amount_left(repair).to_string(),
        _ => return None,
    };
    Some(value)
}

/// Fill `{token}` placeholders in one left-to-right pass.
///
/// Substituted text is never rescanned. Unknown tokens and stray braces are
/// copied as-is.
pub fn compose(template: &str, repair: &repairs::Model) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match after.find(['{', '}']) {
            Some(close) if after.as_bytes()[close] == b'}' => {
                let name = &after[..close];
                match placeholder(name, repair) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            _ => {
                // No matching close brace before the next open one.
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

fn describe_item(repair: &repairs::Model) -> String {
    match repair.item_model.as_deref().map(str::trim) {
        Some(model) if !model.is_empty() => format!("{} {}", repair.item_brand, model),
        _ => repair.item_brand.clone(),
    }
}

fn write_entry(out: &mut String, heading: &str, repair: &repairs::Model) {
    let _ = writeln!(out, "*{heading}: Repair #{}*", repair.id);
    let _ = writeln!(out, "Date: {}", repair.created_at.format("%Y-%m-%d"));
    let _ = writeln!(out, "Status: {}", repair.status.label());
    let _ = writeln!(out, "Item: {}", describe_item(repair));
    let _ = writeln!(out, "Problem: {}", repair.problem_description);
    if repair.under_warranty {
        let _ = writeln!(out, "Under warranty");
    }
    let _ = writeln!(out, "Cost: ${}", effective_cost(repair));
    let _ = writeln!(out, "Paid: ${}", repair.amount_paid);
    let _ = writeln!(out, "Left: ${}", amount_left(repair));
    if repair.parts_used.0.is_empty() {
        let _ = writeln!(out, "Parts used: none");
    } else {
        let _ = writeln!(out, "Parts used:");
        for part in &repair.parts_used.0 {
            let _ = writeln!(out, "  - {part}");
        }
    }
}

/// Consolidated summary of every repair for one serial number, current first.
pub fn compose_history(current: &repairs::Model, history: &[repairs::Model]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Hello {}, here is the repair history for your {} (S/N: {}).",
        or_fallback(Some(&current.customer_name), "Customer"),
        describe_item(current),
        or_fallback(current.serial_number.as_deref(), "N/A"),
    );
    out.push('\n');
    write_entry(&mut out, "Current", current);

    for (n, past) in history.iter().enumerate() {
        out.push('\n');
        write_entry(&mut out, &format!("Previous {}", n + 1), past);
    }

    out.trim_end().to_string()
}

/// `https://wa.me/<digits>?text=<message>`, or `None` if the contact has no digits.
pub fn whatsapp_url(contact: &str, message: &str) -> Option<String> {
    let digits: String = contact.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }

    let mut url = Url::parse(WHATSAPP_BASE).ok()?.join(&digits).ok()?;
    url.query_pairs_mut().append_pair("text", message);
    Some(url.into())
}

pub fn preview(message: String, repair: &repairs::Model) -> MessagePreview {
    let whatsapp_url = whatsapp_url(&repair.contact, &message);
    MessagePreview {
        message,
        whatsapp_url,
    }
}
