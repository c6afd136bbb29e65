//! CLI command implementations.

mod generate;
mod health;

pub use generate::{GenerateOptions, generate};
pub use health::health;
