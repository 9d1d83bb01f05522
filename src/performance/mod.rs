pub mod irr_calculator;
pub mod performance_calculator;
pub mod performance_model;
pub mod portfolio_calculator;

pub use irr_calculator::*;
pub use performance_calculator::*;
pub use performance_model::*;
pub use portfolio_calculator::*;
