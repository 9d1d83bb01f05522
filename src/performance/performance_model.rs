use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One dated monetary value in a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuePoint {
    pub date: NaiveDate,
    pub value: Decimal,
}

/// Full metric set for a single holding.
///
/// Percentages are plain `Decimal` values (10% == 10). `money_weighted_return`
/// is `None` when the solver has no defined answer, which is distinct from a
/// legitimate 0% return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingPerformance {
    pub id: String,
    pub name: String,
    pub total_invested: Decimal,
    pub current_value: Decimal,
    pub net_return: Decimal,
    pub return_on_investment: Decimal,
    pub duration_months: i64,
    pub annualized_growth_rate: Decimal,
    pub time_weighted_return: Decimal,
    pub annualized_time_weighted_return: Decimal,
    pub money_weighted_return: Option<Decimal>,
}

/// Metric set for the whole portfolio (active holdings only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPerformance {
    pub total_invested: Decimal,
    pub current_value: Decimal,
    pub net_return: Decimal,
    pub return_on_investment: Decimal,
    pub duration_months: i64,
    pub annualized_growth_rate: Decimal,
    pub time_weighted_return: Decimal,
    pub annualized_time_weighted_return: Decimal,
    pub money_weighted_return: Option<Decimal>,
}
