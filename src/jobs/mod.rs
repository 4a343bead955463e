//! Job cards and the demo job-card store.
//!
//! Provides:
//! - Job card, customer, vehicle and technician records
//! - The `JobStore` trait the tracker writes time in/out through
//! - An in-memory store loaded with demo fixtures

pub mod fixtures;
pub mod store;
pub mod types;

pub use store::{InMemoryJobStore, JobStore};
pub use types::{Customer, JobCard, JobStatus, Priority, Technician, Vehicle};

#[cfg(test)]
pub use store::MockJobStore;
