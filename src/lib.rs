//! Apple Picker: catch falling apples in a basket before they hit the ground.
//!
//! - `entities`: plain game data
//! - `compute`: pure per-tick game logic (tree, apples, basket)
//! - `hud`: score / lives / final-score text readouts
//! - `config`: TOML-backed tuning values
//! - `logging`: `env_logger` setup

pub mod compute;
pub mod config;
pub mod entities;
pub mod hud;
pub mod logging;

pub use config::{ConfigError, GameConfig};
