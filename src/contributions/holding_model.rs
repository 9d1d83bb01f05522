//! Holdings and portfolios: the aggregates the engine computes over.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::contributions::ContributionEvent;
use crate::errors::{Result, ValidationError};

/// One instrument with its contribution history and last known price.
///
/// `current_unit_price` may be zero when no quote is known; metrics degrade
/// to their sentinel values instead of failing. `monthly_contribution` is
/// the fixed recurring plan amount, used as the default projection input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: String,
    pub name: String,
    pub monthly_contribution: Decimal,
    pub current_unit_price: Decimal,
    pub archived: bool,
    pub contributions: Vec<ContributionEvent>,
}

impl Holding {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        monthly_contribution: Decimal,
        current_unit_price: Decimal,
    ) -> Result<Self> {
        if monthly_contribution < Decimal::ZERO {
            return Err(ValidationError::InvalidInput(format!(
                "monthlyContribution must not be negative, got {}",
                monthly_contribution
            ))
            .into());
        }
        if current_unit_price < Decimal::ZERO {
            return Err(ValidationError::InvalidInput(format!(
                "currentUnitPrice must not be negative, got {}",
                current_unit_price
            ))
            .into());
        }
        Ok(Self {
            id: id.into(),
            name: name.into(),
            monthly_contribution,
            current_unit_price,
            archived: false,
            contributions: Vec::new(),
        })
    }

    /// Appends a contribution, keeping the history ordered by date.
    pub fn add_contribution(&mut self, event: ContributionEvent) {
        self.contributions.push(event);
        self.contributions.sort_by_key(|event| event.date);
    }
}

/// A collection of holdings. Aggregation is order-independent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub holdings: Vec<Holding>,
}

impl Portfolio {
    pub fn new(holdings: Vec<Holding>) -> Self {
        Self { holdings }
    }

    /// Holdings that participate in portfolio-level metrics.
    pub fn active_holdings(&self) -> impl Iterator<Item = &Holding> {
        self.holdings.iter().filter(|holding| !holding.archived)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_new_rejects_negative_fields() {
        assert!(Holding::new("h1", "World ETF", dec!(-1), dec!(10)).is_err());
        assert!(Holding::new("h1", "World ETF", dec!(100), dec!(-10)).is_err());
    }

    #[test]
    fn test_add_contribution_keeps_date_order() {
        let mut holding = Holding::new("h1", "World ETF", dec!(100), dec!(10)).unwrap();
        holding.add_contribution(
            ContributionEvent::new(date("2024-02-01"), dec!(100), dec!(10)).unwrap(),
        );
        holding.add_contribution(
            ContributionEvent::new(date("2024-01-01"), dec!(100), dec!(10)).unwrap(),
        );
        assert_eq!(holding.contributions[0].date, date("2024-01-01"));
        assert_eq!(holding.contributions[1].date, date("2024-02-01"));
    }

    #[test]
    fn test_active_holdings_skips_archived() {
        let mut archived = Holding::new("h1", "Old ETF", dec!(0), dec!(10)).unwrap();
        archived.archived = true;
        let active = Holding::new("h2", "World ETF", dec!(100), dec!(10)).unwrap();
        let portfolio = Portfolio::new(vec![archived, active]);
        let ids: Vec<&str> = portfolio
            .active_holdings()
            .map(|holding| holding.id.as_str())
            .collect();
        assert_eq!(ids, vec!["h2"]);
    }
}
