//! shopdash - a service-shop dashboard
//!
//! Job cards, a per-job session timer that clocks work and break time,
//! and shop reports, exposed as a CLI and an interactive terminal UI.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod analytics;
pub mod auth;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod jobs;
pub mod output;
pub mod tracking;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::ShopError;
pub use tracking::{SessionTimer, TrackerWidget};
