//! Configuration management for shopdash.
//!
//! This module handles loading and saving configuration from `~/.shopdash/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, GeneralConfig, LoginConfig, TrackingConfig};
