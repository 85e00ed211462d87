//! Utility modules

pub mod fixtures;
pub mod validation;

pub use fixtures::*;
pub use validation::*;
