//! Shop analytics.
//!
//! Status counts and worked-time breakdowns over the job board.

pub mod report;

pub use report::{ReportPeriod, ShopReport};
