//! Cost ledger: integer-cent money and the derived amount left to pay.

use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sea_orm::DeriveValueType;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::models::repairs;

/// Largest magnitude accepted as a JSON number. Up to 13 integer digits plus
/// two decimals fit in 15 significant digits, which an `f64` holds exactly.
const MAX_EXACT_JSON_AMOUNT: f64 = 1e13;

/// A currency amount in whole cents.
///
/// Serialises as a two-decimal string (`"60.00"`). Deserialises from a string
/// or a JSON number; numbers too large to survive `f64` must be sent as
/// strings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, DeriveValueType)]
pub struct Money(i64);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyParseError {
    #[error("amount is empty")]
    Empty,
    #[error("'{0}' is not a valid amount")]
    Invalid(String),
    #[error("'{0}' has more than two decimal places")]
    TooPrecise(String),
    #[error("'{0}' is out of range")]
    OutOfRange(String),
}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Exact conversion; fails if `amount` has sub-cent digits or overflows.
    pub fn from_decimal(amount: Decimal) -> Option<Self> {
        let amount = amount.normalize();
        if amount.scale() > 2 {
            return None;
        }
        (amount * Decimal::ONE_HUNDRED).to_i64().map(Money)
    }

    /// Parse `"12"`, `"12.5"`, `"12.50"`, `"-3.10"` or `"$4.00"`.
    pub fn parse(raw: &str) -> Result<Self, MoneyParseError> {
        let trimmed = raw.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let unsigned = unsigned.strip_prefix('$').unwrap_or(unsigned);
        if unsigned.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let digits_only = unsigned.chars().all(|c| c.is_ascii_digit() || c == '.');
        if !digits_only || !unsigned.chars().any(|c| c.is_ascii_digit()) {
            return Err(MoneyParseError::Invalid(raw.to_string()));
        }

        let text = if unsigned.starts_with('.') {
            format!("0{unsigned}")
        } else {
            unsigned.to_string()
        };
        let amount = match Decimal::from_str(&text) {
            Ok(amount) => amount,
            // Only digits and dots got this far, so a failure is either a
            // second dot or more digits than a Decimal holds.
            Err(_) if text.matches('.').count() > 1 => {
                return Err(MoneyParseError::Invalid(raw.to_string()));
            }
            Err(_) => return Err(MoneyParseError::OutOfRange(raw.to_string())),
        };

        if amount.normalize().scale() > 2 {
            return Err(MoneyParseError::TooPrecise(raw.to_string()));
        }
        let amount = if negative { -amount } else { amount };
        Money::from_decimal(amount).ok_or_else(|| MoneyParseError::OutOfRange(raw.to_string()))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal().round_dp(2))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Money::parse(&text).map_err(de::Error::custom),
            Raw::Number(number) => {
                if let Some(whole) = number.as_i64() {
                    return whole.checked_mul(100).map(Money).ok_or_else(|| {
                        de::Error::custom(MoneyParseError::OutOfRange(number.to_string()))
                    });
                }
                // Without arbitrary precision the number is already an f64.
                // Below the limit its shortest form is the text that was sent.
                match number.as_f64() {
                    Some(value) if value.abs() < MAX_EXACT_JSON_AMOUNT => {
                        Money::parse(&number.to_string()).map_err(de::Error::custom)
                    }
                    _ => Err(de::Error::custom(format!(
                        "amount {number} is too large for a JSON number; send it as a string"
                    ))),
                }
            }
        }
    }
}

/// Cost used for ledger math: zero while the item is under warranty.
pub fn effective_cost(repair: &repairs::Model) -> Money {
    if repair.under_warranty {
        Money::ZERO
    } else {
        repair.repair_cost
    }
}

/// `effective_cost - amount_paid`. Negative means the shop owes a refund.
pub fn amount_left(repair: &repairs::Model) -> Money {
    effective_cost(repair) - repair.amount_paid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::fixtures::repair;

    #[test]
    fn parses_whole_and_fractional_amounts() {
        assert_eq!(Money::parse("12").unwrap(), Money::from_cents(1200));
        assert_eq!(Money::parse("12.5").unwrap(), Money::from_cents(1250));
        assert_eq!(Money::parse("12.05").unwrap(), Money::from_cents(1205));
        assert_eq!(Money::parse(".75").unwrap(), Money::from_cents(75));
        assert_eq!(Money::parse("$4.00").unwrap(), Money::from_cents(400));
        assert_eq!(Money::parse("-3.10").unwrap(), Money::from_cents(-310));
    }

    #[test]
    fn rejects_malformed_amounts() {
        assert_eq!(Money::parse("  "), Err(MoneyParseError::Empty));
        assert!(matches!(Money::parse("1.234"), Err(MoneyParseError::TooPrecise(_))));
        assert!(matches!(Money::parse("1e3"), Err(MoneyParseError::Invalid(_))));
        assert!(matches!(Money::parse("."), Err(MoneyParseError::Invalid(_))));
        assert!(matches!(
            Money::parse("99999999999999999999"),
            Err(MoneyParseError::OutOfRange(_))
        ));
    }

    #[test]
    fn displays_two_decimals() {
        assert_eq!(Money::from_cents(6000).to_string(), "60.00");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-250).to_string(), "-2.50");
    }

    #[test]
    fn json_numbers_do_not_drift() {
        let paid: Money = serde_json::from_str("40.1").unwrap();
        let cost: Money = serde_json::from_str("\"100.30\"").unwrap();
        assert_eq!(cost - paid, Money::from_cents(6020));
        assert_eq!(serde_json::to_string(&(cost - paid)).unwrap(), "\"60.20\"");
    }

    #[test]
    fn amount_left_matches_formula() {
        let amounts = [0, 1, 4_000, 10_000, 25_000];
        for under_warranty in [false, true] {
            for cost in amounts {
                for paid in amounts {
                    let mut r = repair();
                    r.under_warranty = under_warranty;
                    r.repair_cost = Money::from_cents(cost);
                    r.amount_paid = Money::from_cents(paid);

                    let expected = if under_warranty { 0 } else { cost } - paid;
                    assert_eq!(amount_left(&r), Money::from_cents(expected));
                }
            }
        }
    }

    #[test]
    fn warranty_zeroes_cost_without_touching_it() {
        let mut r = repair();
        r.under_warranty = true;
        r.repair_cost = Money::from_cents(25_000);

        assert_eq!(amount_left(&r), Money::ZERO);
        assert_eq!(r.repair_cost, Money::from_cents(25_000));
    }

    #[test]
    fn overpayment_goes_negative() {
        let mut r = repair();
        r.repair_cost = Money::from_cents(5_000);
        r.amount_paid = Money::from_cents(7_500);
        assert_eq!(amount_left(&r), Money::from_cents(-2_500));
    }

    #[test]
    fn trailing_zeros_beyond_cents_are_accepted() {
        assert_eq!(Money::parse("1.500").unwrap(), Money::from_cents(150));
        assert!(matches!(Money::parse("1.505"), Err(MoneyParseError::TooPrecise(_))));
        assert!(matches!(Money::parse("1.2.3"), Err(MoneyParseError::Invalid(_))));
    }

    #[test]
    fn decimal_conversion_is_exact() {
        let amount = Money::parse("123456789012345.67").unwrap();
        assert_eq!(amount.cents(), 12_345_678_901_234_567);
        assert_eq!(amount.to_decimal().to_string(), "123456789012345.67");
        assert_eq!(Money::from_decimal(amount.to_decimal()), Some(amount));
        assert_eq!(Money::from_decimal(Decimal::new(1, 3)), None);
    }

    #[test]
    fn json_numbers_beyond_f64_precision_are_rejected() {
        // 17 significant digits: an f64 would round this to ...345.69.
        let err = serde_json::from_str::<Money>("123456789012345.67").unwrap_err();
        assert!(err.to_string().contains("send it as a string"));

        let exact: Money = serde_json::from_str("\"123456789012345.67\"").unwrap();
        assert_eq!(exact.cents(), 12_345_678_901_234_567);

        assert!(serde_json::from_str::<Money>("90071992547409.93").is_err());
    }

    #[test]
    fn json_integers_and_small_fractions_are_exact() {
        let whole: Money = serde_json::from_str("250").unwrap();
        assert_eq!(whole, Money::from_cents(25_000));

        let large: Money = serde_json::from_str("9999999999999.99").unwrap();
        assert_eq!(large.cents(), 999_999_999_999_999);
    }
}
