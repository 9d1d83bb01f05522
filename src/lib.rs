//! Pacfolio Core - performance calculations for recurring-contribution portfolios.
//!
//! This crate contains the pure calculation engine for PAC (piano di
//! accumulo / dollar-cost-averaging) portfolios: return metrics over
//! irregular dated purchases, a money-weighted return solver, historical
//! value series and forward projections. It holds no state and performs no
//! I/O; callers supply all data, including "now", on every call.

pub mod constants;
pub mod contributions;
pub mod errors;
pub mod performance;
pub mod series;

// Re-export the core model and calculator surface
pub use contributions::*;
pub use performance::*;
pub use series::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
