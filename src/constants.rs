use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Months in a year, as a Decimal for rate conversions.
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Day-count convention: actual calendar days over a 365-day year.
pub const DAYS_PER_YEAR: Decimal = dec!(365);

/// Decimal precision for display-grade monetary values in series output.
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Initial guess for the money-weighted return solver (10% annual).
pub const IRR_INITIAL_GUESS: Decimal = dec!(0.10);

/// Hard iteration cap for the money-weighted return solver.
pub const IRR_MAX_ITERATIONS: u32 = 200;

/// Convergence tolerance on the rate step between iterations (1e-8).
pub const IRR_CONVERGENCE_TOLERANCE: Decimal = dec!(0.00000001);

/// Below this derivative magnitude the Newton step is meaningless (1e-14).
pub const IRR_DERIVATIVE_EPSILON: Decimal = dec!(0.00000000000001);

/// Tolerance when checking stored units against `amount / price` (1e-9).
pub const UNITS_DRIFT_TOLERANCE: Decimal = dec!(0.000000001);
