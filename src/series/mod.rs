pub mod history_calculator;
pub mod projection_calculator;
pub mod scenario_model;

pub use history_calculator::*;
pub use projection_calculator::*;
pub use scenario_model::*;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::DISPLAY_DECIMAL_PRECISION;

/// Display-grade rounding for emitted series values: cents, half away from
/// zero.
pub(crate) fn round_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DISPLAY_DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}
