//! Configuration loading, validation, and persistence

mod color;
#[expect(clippy::module_inception, reason = "module organization")]
mod config;

pub use color::Color;
pub use config::{Config, DEFAULT_CONFIG_TOML, NUM_SCORING_BANDS};
