//! Single-holding return metrics over contribution events.
//!
//! All functions are pure: events may arrive in any order (they are sorted
//! by date internally) and "now" is always an explicit parameter. Undefined
//! metrics (zero investment, sub-month duration) resolve to `Decimal::ZERO`,
//! never a division by zero.

use chrono::{Datelike, Months, NaiveDate};
use log::warn;
use rust_decimal::{Decimal, MathematicalOps};

use crate::constants::MONTHS_PER_YEAR;
use crate::contributions::{sorted_by_date, ContributionEvent, Holding};
use crate::performance::irr_calculator::money_weighted_return;
use crate::performance::performance_model::HoldingPerformance;

/// Sum of cash invested across all events.
pub fn total_invested(events: &[ContributionEvent]) -> Decimal {
    events.iter().map(|event| event.amount_invested).sum()
}

/// Sum of units acquired across all events.
pub fn total_units(events: &[ContributionEvent]) -> Decimal {
    events.iter().map(|event| event.units_acquired).sum()
}

/// Market value of the accumulated units at `current_price`.
pub fn current_value(events: &[ContributionEvent], current_price: Decimal) -> Decimal {
    total_units(events) * current_price
}

/// Total return on investment, as a percentage of the cash invested.
pub fn return_on_investment(events: &[ContributionEvent], current_price: Decimal) -> Decimal {
    let invested = total_invested(events);
    if invested.is_zero() {
        return Decimal::ZERO;
    }
    (current_value(events, current_price) - invested) / invested * Decimal::ONE_HUNDRED
}

/// Signed gain or loss in currency units.
pub fn net_return(events: &[ContributionEvent], current_price: Decimal) -> Decimal {
    current_value(events, current_price) - total_invested(events)
}

/// Whole calendar months between the earliest event and `now`.
///
/// A month counts once the same day-of-month is reached again, with the day
/// clamped at month end (Jan 31 + 1 month = Feb 28/29). Empty input or a
/// `now` before the first event yields 0.
pub fn duration_months(events: &[ContributionEvent], now: NaiveDate) -> i64 {
    let first = match events.iter().map(|event| event.date).min() {
        Some(date) => date,
        None => return 0,
    };
    whole_months_between(first, now)
}

/// Compound annual growth rate, as a percentage.
///
/// Money-weighted: distorted by contribution timing, but cheap and familiar.
/// Returns 0 when nothing was invested or the plan is younger than a month
/// (the exponent explodes for tiny denominators).
pub fn annualized_growth_rate(
    events: &[ContributionEvent],
    current_price: Decimal,
    now: NaiveDate,
) -> Decimal {
    let invested = total_invested(events);
    if invested.is_zero() {
        return Decimal::ZERO;
    }
    let months = duration_months(events, now);
    if months < 1 {
        return Decimal::ZERO;
    }
    annualize_growth(current_value(events, current_price) / invested, months)
}

/// Time-weighted rate of return, as a percentage.
///
/// Chains one sub-period per contribution: each period runs from a purchase
/// to the next purchase's price (or `current_price` for the last one), with
/// the incoming cash flow removed from the period's start value. This
/// isolates market performance from the size and timing of contributions.
pub fn time_weighted_return(events: &[ContributionEvent], current_price: Decimal) -> Decimal {
    if events.is_empty() {
        return Decimal::ZERO;
    }
    let sorted = sorted_by_date(events);

    let mut product = Decimal::ONE;
    let mut accumulated_units = Decimal::ZERO;

    for (i, event) in sorted.iter().enumerate() {
        let value_before_flow = accumulated_units * event.unit_price;
        let value_after_flow = value_before_flow + event.amount_invested;

        accumulated_units += event.units_acquired;

        let end_price = match sorted.get(i + 1) {
            Some(next) => next.unit_price,
            None => current_price,
        };
        let end_value = accumulated_units * end_price;

        // A non-positive start value carries no return information; leave
        // the chain unchanged rather than dividing by it.
        if value_after_flow > Decimal::ZERO {
            product *= end_value / value_after_flow;
        }
    }

    (product - Decimal::ONE) * Decimal::ONE_HUNDRED
}

/// Annualized time-weighted return, as a percentage.
///
/// Returns 0 for an empty history or a duration under one month.
pub fn annualized_time_weighted_return(
    events: &[ContributionEvent],
    current_price: Decimal,
    now: NaiveDate,
) -> Decimal {
    if events.is_empty() {
        return Decimal::ZERO;
    }
    let months = duration_months(events, now);
    if months < 1 {
        return Decimal::ZERO;
    }
    let growth = time_weighted_return(events, current_price) / Decimal::ONE_HUNDRED + Decimal::ONE;
    annualize_growth(growth, months)
}

/// All metrics for one holding.
pub fn holding_performance(holding: &Holding, now: NaiveDate) -> HoldingPerformance {
    let events = &holding.contributions;
    let price = holding.current_unit_price;
    HoldingPerformance {
        id: holding.id.clone(),
        name: holding.name.clone(),
        total_invested: total_invested(events),
        current_value: current_value(events, price),
        net_return: net_return(events, price),
        return_on_investment: return_on_investment(events, price),
        duration_months: duration_months(events, now),
        annualized_growth_rate: annualized_growth_rate(events, price, now),
        time_weighted_return: time_weighted_return(events, price),
        annualized_time_weighted_return: annualized_time_weighted_return(events, price, now),
        money_weighted_return: money_weighted_return(events, price, now),
    }
}

/// Raises a growth factor to `12 / months` and converts to a percentage.
pub(crate) fn annualize_growth(growth_factor: Decimal, months: i64) -> Decimal {
    let exponent = MONTHS_PER_YEAR / Decimal::from(months);
    match growth_factor.checked_powd(exponent) {
        Some(annual) => (annual - Decimal::ONE) * Decimal::ONE_HUNDRED,
        None => {
            warn!(
                "annualization of growth factor {} over {} months is not representable",
                growth_factor, months
            );
            Decimal::ZERO
        }
    }
}

fn whole_months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    if end <= start {
        return 0;
    }
    let mut months =
        (end.year() as i64 - start.year() as i64) * 12 + (end.month() as i64 - start.month() as i64);
    if months > 0 {
        let landed = start.checked_add_months(Months::new(months as u32));
        if landed.map_or(false, |date| date > end) {
            months -= 1;
        }
    }
    months.max(0)
}
