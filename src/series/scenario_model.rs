use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A named annual growth-rate assumption for projections.
///
/// `annual_rate` is a fraction, not a percentage: 0.07 means 7% per year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub name: String,
    pub annual_rate: Decimal,
}

impl Scenario {
    pub fn new(name: impl Into<String>, annual_rate: Decimal) -> Self {
        Self {
            name: name.into(),
            annual_rate,
        }
    }
}

/// The scenarios seeded for a new plan.
pub fn default_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new("Pessimistic", dec!(0.04)),
        Scenario::new("Moderate", dec!(0.07)),
        Scenario::new("Optimistic", dec!(0.10)),
    ]
}
