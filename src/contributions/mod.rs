pub mod contribution_model;
pub mod holding_model;

pub use contribution_model::*;
pub use holding_model::*;
