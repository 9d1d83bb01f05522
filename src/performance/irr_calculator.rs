//! Money-weighted return (XIRR) for irregularly dated cash flows.
//!
//! Every contribution is a negative flow on its date and the current value
//! one positive flow at `now`. The solver finds the annual rate `r` with
//! `NPV(r) = sum(flow_i / (1+r)^(days_i/365)) = 0` by Newton-Raphson with
//! an analytic derivative. Day-count is actual days over 365, measured from
//! the earliest contribution.
//!
//! The result is `Option<Decimal>`: `None` means the metric is undefined
//! (no events, non-positive final value, vanishing derivative, a candidate
//! rate at or below -100%, or no convergence within the iteration cap) and
//! is deliberately distinguishable from a genuine 0% return.

use chrono::NaiveDate;
use log::debug;
use rust_decimal::{Decimal, MathematicalOps};

use crate::constants::{
    DAYS_PER_YEAR, IRR_CONVERGENCE_TOLERANCE, IRR_DERIVATIVE_EPSILON, IRR_INITIAL_GUESS,
    IRR_MAX_ITERATIONS,
};
use crate::contributions::{sorted_by_date, ContributionEvent};
use crate::performance::performance_calculator::current_value;

/// Tunable knobs for the Newton-Raphson solver.
///
/// The defaults are part of the engine's observable behavior; change them
/// only when output parity across installations does not matter.
#[derive(Debug, Clone, PartialEq)]
pub struct IrrParams {
    pub initial_guess: Decimal,
    pub max_iterations: u32,
    pub convergence_tolerance: Decimal,
    pub derivative_epsilon: Decimal,
}

impl Default for IrrParams {
    fn default() -> Self {
        Self {
            initial_guess: IRR_INITIAL_GUESS,
            max_iterations: IRR_MAX_ITERATIONS,
            convergence_tolerance: IRR_CONVERGENCE_TOLERANCE,
            derivative_epsilon: IRR_DERIVATIVE_EPSILON,
        }
    }
}

struct CashFlow {
    /// Signed day-count from the earliest contribution, in years (actual/365).
    year_fraction: Decimal,
    amount: Decimal,
}

/// Annualized money-weighted return as a percentage, with default solver
/// parameters.
pub fn money_weighted_return(
    events: &[ContributionEvent],
    current_price: Decimal,
    now: NaiveDate,
) -> Option<Decimal> {
    money_weighted_return_with(events, current_price, now, &IrrParams::default())
}

/// Annualized money-weighted return as a percentage.
pub fn money_weighted_return_with(
    events: &[ContributionEvent],
    current_price: Decimal,
    now: NaiveDate,
    params: &IrrParams,
) -> Option<Decimal> {
    let final_value = current_value(events, current_price);
    if events.is_empty() || final_value <= Decimal::ZERO {
        return None;
    }

    let sorted = sorted_by_date(events);
    let reference_date = sorted[0].date;

    let mut flows: Vec<CashFlow> = sorted
        .iter()
        .map(|event| CashFlow {
            year_fraction: year_fraction(reference_date, event.date),
            amount: -event.amount_invested,
        })
        .collect();
    flows.push(CashFlow {
        year_fraction: year_fraction(reference_date, now),
        amount: final_value,
    });

    let mut rate = params.initial_guess;
    for _ in 0..params.max_iterations {
        let derivative = net_present_value_derivative(&flows, rate)?;
        if derivative.abs() < params.derivative_epsilon {
            debug!("IRR derivative vanished at rate {}", rate);
            return None;
        }
        let next = rate - net_present_value(&flows, rate)? / derivative;
        if next <= Decimal::NEGATIVE_ONE {
            // Beyond a -100% total loss the discount power is undefined.
            return None;
        }
        if (next - rate).abs() < params.convergence_tolerance {
            return Some(next * Decimal::ONE_HUNDRED);
        }
        rate = next;
    }

    debug!(
        "IRR did not converge within {} iterations",
        params.max_iterations
    );
    None
}

fn year_fraction(from: NaiveDate, to: NaiveDate) -> Decimal {
    Decimal::from((to - from).num_days()) / DAYS_PER_YEAR
}

/// `NPV(r)`. `None` when a discount power is not representable, which the
/// caller treats as non-convergence.
fn net_present_value(flows: &[CashFlow], rate: Decimal) -> Option<Decimal> {
    let mut total = Decimal::ZERO;
    for flow in flows {
        let discount = (Decimal::ONE + rate).checked_powd(flow.year_fraction)?;
        if discount.is_zero() {
            return None;
        }
        total += flow.amount / discount;
    }
    Some(total)
}

/// `dNPV/dr = sum(-(t_i) * flow_i / (1+r)^(t_i + 1))`.
fn net_present_value_derivative(flows: &[CashFlow], rate: Decimal) -> Option<Decimal> {
    let mut total = Decimal::ZERO;
    for flow in flows {
        let discount = (Decimal::ONE + rate).checked_powd(flow.year_fraction + Decimal::ONE)?;
        if discount.is_zero() {
            return None;
        }
        total -= flow.year_fraction * flow.amount / discount;
    }
    Some(total)
}
