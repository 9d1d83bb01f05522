//! Historical portfolio value series.
//!
//! The engine has no stored quote history, so each contribution's own unit
//! price serves as the NAV proxy for its date: a point's value is the units
//! accumulated so far priced at the *next* event's price (or the current
//! price after the last event), mirroring the TWRR sub-period boundaries.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::contributions::{sorted_by_date, ContributionEvent, Portfolio};
use crate::performance::ValuePoint;
use crate::series::round_display;

/// One value point per contribution plus a final synthetic point at `now`
/// priced at `current_price`. Values are rounded to cents. Empty input
/// yields an empty series.
pub fn historical_value_series(
    events: &[ContributionEvent],
    current_price: Decimal,
    now: NaiveDate,
) -> Vec<ValuePoint> {
    if events.is_empty() {
        return Vec::new();
    }
    let sorted = sorted_by_date(events);

    let mut points = Vec::with_capacity(sorted.len() + 1);
    let mut accumulated_units = Decimal::ZERO;

    for (i, event) in sorted.iter().enumerate() {
        accumulated_units += event.units_acquired;
        let end_price = match sorted.get(i + 1) {
            Some(next) => next.unit_price,
            None => current_price,
        };
        points.push(ValuePoint {
            date: event.date,
            value: round_display(accumulated_units * end_price),
        });
    }

    points.push(ValuePoint {
        date: now,
        value: round_display(accumulated_units * current_price),
    });

    points
}

/// Per-holding series merged by date across active holdings, values summed,
/// ordered by date.
pub fn portfolio_value_series(portfolio: &Portfolio, now: NaiveDate) -> Vec<ValuePoint> {
    let mut by_date: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for holding in portfolio.active_holdings() {
        for point in historical_value_series(&holding.contributions, holding.current_unit_price, now)
        {
            *by_date.entry(point.date).or_insert(Decimal::ZERO) += point.value;
        }
    }
    by_date
        .into_iter()
        .map(|(date, value)| ValuePoint { date, value })
        .collect()
}
