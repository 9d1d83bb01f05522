//! Forward projection under discrete monthly compounding.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::MONTHS_PER_YEAR;
use crate::errors::{CalculatorError, Result, ValidationError};
use crate::performance::ValuePoint;
use crate::series::round_display;
use crate::contributions::Portfolio;
use crate::performance::portfolio_calculator::portfolio_value;
use crate::series::scenario_model::Scenario;

/// Projection of one scenario over the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioProjection {
    pub scenario: Scenario,
    pub points: Vec<ValuePoint>,
}

/// Projects a starting value forward month by month:
/// `v_m = v_(m-1) * (1 + annual_rate/12) + monthly_contribution`.
///
/// One point per month for `horizon_years * 12` months, dated
/// `start_date + m` months (day clamped at month end). Emitted values are
/// rounded to cents; the running value keeps full precision between steps.
pub fn project_growth(
    initial_value: Decimal,
    monthly_contribution: Decimal,
    annual_rate: Decimal,
    horizon_years: u32,
    start_date: NaiveDate,
) -> Result<Vec<ValuePoint>> {
    if initial_value < Decimal::ZERO {
        return Err(ValidationError::InvalidInput(format!(
            "initial value must not be negative, got {}",
            initial_value
        ))
        .into());
    }
    if monthly_contribution < Decimal::ZERO {
        return Err(ValidationError::InvalidInput(format!(
            "monthly contribution must not be negative, got {}",
            monthly_contribution
        ))
        .into());
    }
    if annual_rate <= Decimal::NEGATIVE_ONE {
        return Err(ValidationError::InvalidInput(format!(
            "annual rate must be above -100%, got {}",
            annual_rate
        ))
        .into());
    }

    let monthly_rate = annual_rate / MONTHS_PER_YEAR;
    let months = horizon_years * 12;

    let mut points = Vec::with_capacity(months as usize);
    let mut value = initial_value;

    for month in 1..=months {
        value = value * (Decimal::ONE + monthly_rate) + monthly_contribution;
        let date = start_date
            .checked_add_months(Months::new(month))
            .ok_or_else(|| {
                CalculatorError::Calculation(format!(
                    "projection date overflow at month {} from {}",
                    month, start_date
                ))
            })?;
        points.push(ValuePoint {
            date,
            value: round_display(value),
        });
    }

    Ok(points)
}

/// Runs the projection once per scenario for the whole portfolio: starting
/// value is the portfolio's current value, the monthly contribution the sum
/// of active holdings' plan amounts.
pub fn project_scenarios(
    portfolio: &Portfolio,
    scenarios: &[Scenario],
    horizon_years: u32,
    start_date: NaiveDate,
) -> Result<Vec<ScenarioProjection>> {
    let initial_value = portfolio_value(portfolio);
    let monthly_contribution: Decimal = portfolio
        .active_holdings()
        .map(|holding| holding.monthly_contribution)
        .sum();

    scenarios
        .iter()
        .map(|scenario| {
            let points = project_growth(
                initial_value,
                monthly_contribution,
                scenario.annual_rate,
                horizon_years,
                start_date,
            )?;
            Ok(ScenarioProjection {
                scenario: scenario.clone(),
                points,
            })
        })
        .collect()
}
