//! Contribution events: one discrete purchase converting cash into units.
//!
//! `units_acquired` is stored redundantly alongside the amount and price it
//! was derived from. Construction goes through validated entry points so the
//! engine never sees malformed input; `units_drift` exposes the redundancy
//! for data-integrity checks.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::constants::UNITS_DRIFT_TOLERANCE;
use crate::errors::{Result, ValidationError};

/// One purchase: a cash outflow on `date` buying units at `unit_price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionEvent {
    pub date: NaiveDate,
    pub amount_invested: Decimal,
    pub unit_price: Decimal,
    pub units_acquired: Decimal,
}

impl ContributionEvent {
    /// Creates an event from an amount and price, deriving the units.
    ///
    /// The amount must be strictly positive; the price must not be negative.
    /// A zero price yields zero units (price unknown at entry time).
    pub fn new(date: NaiveDate, amount_invested: Decimal, unit_price: Decimal) -> Result<Self> {
        validate_amounts(amount_invested, unit_price)?;
        let units_acquired = derive_units(amount_invested, unit_price);
        Ok(Self {
            date,
            amount_invested,
            unit_price,
            units_acquired,
        })
    }

    /// Parses an event from raw text fields, e.g. a persistence row.
    ///
    /// When `units_acquired` is supplied it must agree with the derived
    /// value within [`UNITS_DRIFT_TOLERANCE`]; otherwise the record is
    /// rejected as drifted.
    pub fn from_record(
        date: &str,
        amount_invested: &str,
        unit_price: &str,
        units_acquired: Option<&str>,
    ) -> Result<Self> {
        let date = parse_field(date, "date", |s| Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?))?;
        let amount = parse_field(amount_invested, "amountInvested", parse_decimal)?;
        let price = parse_field(unit_price, "unitPrice", parse_decimal)?;

        let mut event = Self::new(date, amount, price)?;
        if let Some(raw_units) = units_acquired {
            let stored = parse_field(raw_units, "unitsAcquired", parse_decimal)?;
            let drift = (stored - event.units_acquired).abs();
            if drift > UNITS_DRIFT_TOLERANCE {
                return Err(ValidationError::InvalidInput(format!(
                    "stored units {} drifted from derived {} by {}",
                    stored, event.units_acquired, drift
                ))
                .into());
            }
            event.units_acquired = stored;
        }
        Ok(event)
    }

    /// Units implied by the stored amount and price.
    pub fn derived_units(&self) -> Decimal {
        derive_units(self.amount_invested, self.unit_price)
    }

    /// Absolute difference between stored and derived units.
    pub fn units_drift(&self) -> Decimal {
        (self.units_acquired - self.derived_units()).abs()
    }
}

/// Returns a copy of the events in ascending date order.
///
/// Every order-sensitive calculator sorts through this, so callers may pass
/// events in any order. The sort is stable: same-date events keep their
/// relative order.
pub fn sorted_by_date(events: &[ContributionEvent]) -> Vec<ContributionEvent> {
    let mut sorted = events.to_vec();
    sorted.sort_by_key(|event| event.date);
    sorted
}

fn derive_units(amount_invested: Decimal, unit_price: Decimal) -> Decimal {
    if unit_price > Decimal::ZERO {
        amount_invested / unit_price
    } else {
        Decimal::ZERO
    }
}

fn validate_amounts(amount_invested: Decimal, unit_price: Decimal) -> Result<()> {
    if amount_invested <= Decimal::ZERO {
        return Err(ValidationError::InvalidInput(format!(
            "amountInvested must be positive, got {}",
            amount_invested
        ))
        .into());
    }
    if unit_price < Decimal::ZERO {
        return Err(ValidationError::InvalidInput(format!(
            "unitPrice must not be negative, got {}",
            unit_price
        ))
        .into());
    }
    Ok(())
}

fn parse_decimal(raw: &str) -> Result<Decimal> {
    Ok(Decimal::from_str(raw.trim())?)
}

fn parse_field<T>(raw: &str, field: &str, parse: impl Fn(&str) -> Result<T>) -> Result<T> {
    if raw.trim().is_empty() {
        return Err(ValidationError::MissingField(field.to_string()).into());
    }
    parse(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_new_derives_units() {
        let event = ContributionEvent::new(date("2024-01-01"), dec!(1000), dec!(10)).unwrap();
        assert_eq!(event.units_acquired, dec!(100));
        assert_eq!(event.units_drift(), Decimal::ZERO);
    }

    #[test]
    fn test_new_zero_price_yields_zero_units() {
        let event = ContributionEvent::new(date("2024-01-01"), dec!(500), Decimal::ZERO).unwrap();
        assert_eq!(event.units_acquired, Decimal::ZERO);
    }

    #[test]
    fn test_new_rejects_non_positive_amount() {
        assert!(ContributionEvent::new(date("2024-01-01"), Decimal::ZERO, dec!(10)).is_err());
        assert!(ContributionEvent::new(date("2024-01-01"), dec!(-100), dec!(10)).is_err());
    }

    #[test]
    fn test_new_rejects_negative_price() {
        assert!(ContributionEvent::new(date("2024-01-01"), dec!(100), dec!(-1)).is_err());
    }

    #[test]
    fn test_from_record_parses_and_accepts_stored_units() {
        let event =
            ContributionEvent::from_record("2024-03-15", "250.00", "12.50", Some("20")).unwrap();
        assert_eq!(event.date, date("2024-03-15"));
        assert_eq!(event.amount_invested, dec!(250));
        assert_eq!(event.units_acquired, dec!(20));
    }

    #[test]
    fn test_from_record_rejects_drifted_units() {
        let result = ContributionEvent::from_record("2024-03-15", "250.00", "12.50", Some("20.5"));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_record_rejects_missing_and_malformed_fields() {
        assert!(ContributionEvent::from_record("", "100", "10", None).is_err());
        assert!(ContributionEvent::from_record("2024-13-40", "100", "10", None).is_err());
        assert!(ContributionEvent::from_record("2024-01-01", "abc", "10", None).is_err());
        assert!(ContributionEvent::from_record("2024-01-01", "100", " ", None).is_err());
    }

    #[test]
    fn test_sorted_by_date_is_stable_and_idempotent() {
        let a = ContributionEvent::new(date("2024-02-01"), dec!(100), dec!(10)).unwrap();
        let b = ContributionEvent::new(date("2024-01-01"), dec!(200), dec!(10)).unwrap();
        let c = ContributionEvent::new(date("2024-01-01"), dec!(300), dec!(10)).unwrap();

        let once = sorted_by_date(&[a.clone(), b.clone(), c.clone()]);
        let twice = sorted_by_date(&once);
        assert_eq!(once, twice);
        assert_eq!(once[0].amount_invested, dec!(200));
        assert_eq!(once[1].amount_invested, dec!(300));
        assert_eq!(once[2].amount_invested, dec!(100));
    }

    proptest! {
        // Round-trip invariant: stored units always match amount / price.
        #[test]
        fn prop_units_round_trip(cents in 1i64..10_000_000, price_cents in 1i64..1_000_000) {
            let amount = Decimal::new(cents, 2);
            let price = Decimal::new(price_cents, 2);
            let event = ContributionEvent::new(date("2024-01-01"), amount, price).unwrap();
            prop_assert!(event.units_drift() <= UNITS_DRIFT_TOLERANCE);
        }
    }
}
