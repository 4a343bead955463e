//! Time tracking for job cards.
//!
//! Provides:
//! - Activity labels (work, break, waiting, quality check)
//! - The session timer and its append-only log
//! - A cancellable display-refresh ticker
//! - The tracker widget that clocks jobs in and out

pub mod activity;
pub mod entry;
pub mod format;
pub mod ticker;
pub mod timer;
pub mod widget;

pub use activity::ActivityLabel;
pub use entry::{ActiveSession, TimeLogEntry};
pub use format::{format_duration, format_elapsed, format_minutes, parse_duration};
pub use ticker::Ticker;
pub use timer::{SessionTimer, TimeOut};
pub use widget::{Tick, TrackerWidget, IDLE_DISPLAY};
