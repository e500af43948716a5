//! Field validation, run before any persistence call.

use validator::{Validate, ValidationErrors};

use crate::lifecycle::LifecycleError;
use crate::lifecycle::ledger::Money;
use crate::models::repairs::{CreateRepair, UpdateRepairDetails};

pub const MAX_PART_NAME: usize = 100;

fn trim_required(value: String) -> String {
    value.trim().to_string()
}

fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Flatten validator output into one line, ordered by field name.
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn check(value: &impl Validate) -> Result<(), LifecycleError> {
    value
        .validate()
        .map_err(|e| LifecycleError::Validation(describe(&e)))
}

pub fn validate_details(input: UpdateRepairDetails) -> Result<UpdateRepairDetails, LifecycleError> {
    let details = UpdateRepairDetails {
        customer_name: trim_required(input.customer_name),
        contact: trim_required(input.contact),
        item_brand: trim_required(input.item_brand),
        item_model: trim_optional(input.item_model),
        serial_number: trim_optional(input.serial_number),
        problem_description: trim_required(input.problem_description),
    };
    check(&details)?;
    Ok(details)
}

pub fn validate_costs(repair_cost: Money, amount_paid: Money) -> Result<(), LifecycleError> {
    if repair_cost.is_negative() {
        return Err(LifecycleError::Validation(
            "repair cost cannot be negative".to_string(),
        ));
    }
    if amount_paid.is_negative() {
        return Err(LifecycleError::Validation(
            "amount paid cannot be negative".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_part(part: &str) -> Result<String, LifecycleError> {
    let part = part.trim();
    if part.is_empty() {
        return Err(LifecycleError::Validation(
            "part name cannot be empty".to_string(),
        ));
    }
    if part.chars().count() > MAX_PART_NAME {
        return Err(LifecycleError::Validation(format!(
            "part name must be at most {MAX_PART_NAME} characters"
        )));
    }
    Ok(part.to_string())
}

pub fn validate_new_repair(input: CreateRepair) -> Result<CreateRepair, LifecycleError> {
    let repair = CreateRepair {
        customer_name: trim_required(input.customer_name),
        contact: trim_required(input.contact),
        item_brand: trim_required(input.item_brand),
        item_model: trim_optional(input.item_model),
        serial_number: trim_optional(input.serial_number),
        under_warranty: input.under_warranty,
        problem_description: trim_required(input.problem_description),
        repair_cost: input.repair_cost,
        amount_paid: input.amount_paid,
        parts_used: input
            .parts_used
            .iter()
            .map(|part| validate_part(part))
            .collect::<Result<_, _>>()?,
    };
    check(&repair)?;
    validate_costs(repair.repair_cost, repair.amount_paid)?;
    Ok(repair)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> UpdateRepairDetails {
        UpdateRepairDetails {
            customer_name: "Dana".to_string(),
            contact: "+1 555 0100".to_string(),
            item_brand: "Makita".to_string(),
            item_model: Some("DHP482".to_string()),
            serial_number: Some("SN123".to_string()),
            problem_description: "Chuck slips under load".to_string(),
        }
    }

    #[test]
    fn trims_and_drops_blank_optionals() {
        let mut input = details();
        input.customer_name = "  Dana  ".to_string();
        input.item_model = Some("   ".to_string());

        let out = validate_details(input).unwrap();
        assert_eq!(out.customer_name, "Dana");
        assert_eq!(out.item_model, None);
    }

    #[test]
    fn limits_count_characters_not_bytes() {
        let mut input = details();
        // 40 two-byte characters is still within the limit.
        input.customer_name = "é".repeat(40);
        assert!(validate_details(input.clone()).is_ok());

        input.customer_name = "é".repeat(41);
        let err = validate_details(input).unwrap_err();
        assert!(err.to_string().contains("customer name"));
    }

    #[test]
    fn required_fields_must_not_be_blank() {
        let mut input = details();
        input.problem_description = "   ".to_string();
        assert!(matches!(
            validate_details(input),
            Err(LifecycleError::Validation(_))
        ));
    }

    #[test]
    fn serial_number_limit_is_thirty() {
        let mut input = details();
        input.serial_number = Some("X".repeat(31));
        let err = validate_details(input).unwrap_err();
        assert!(err.to_string().contains("serial number"));
    }

    #[test]
    fn negative_costs_are_rejected() {
        assert!(validate_costs(Money::from_cents(-1), Money::ZERO).is_err());
        assert!(validate_costs(Money::ZERO, Money::from_cents(-1)).is_err());
        assert!(validate_costs(Money::from_cents(100), Money::from_cents(100)).is_ok());
    }

    #[test]
    fn part_names_are_trimmed() {
        assert_eq!(validate_part("  Carbon brushes ").unwrap(), "Carbon brushes");
        assert!(validate_part("").is_err());
        assert!(validate_part(&"p".repeat(MAX_PART_NAME + 1)).is_err());
    }
}
