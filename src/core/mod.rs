//! Core abstractions for shopdash.

mod clock;

pub use clock::{Clock, ManualClock, SystemClock};
