//! Data loading and validation for game configuration.

pub mod load;

pub use load::*;
