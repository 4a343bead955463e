//! Output formatting for shopdash.
//!
//! This module provides formatters for displaying shop data in various formats.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::ShopError;
use crate::jobs::{JobCard, JobStore};
use crate::tracking::TimeLogEntry;

pub use json::*;
pub use pretty::*;

/// Format job cards based on output format
///
/// # Errors
///
/// Returns `ShopError::Parse` if JSON serialization fails.
pub fn format_jobs(jobs: &[JobCard], title: &str, format: OutputFormat) -> Result<String, ShopError> {
    match format {
        OutputFormat::Pretty => Ok(format_jobs_pretty(jobs, title)),
        OutputFormat::Json => format_jobs_json(jobs, title),
    }
}

/// Format a single job card, resolving its related records from `store`
///
/// # Errors
///
/// Returns `ShopError::Parse` if JSON serialization fails.
pub fn format_job(
    job: &JobCard,
    store: &dyn JobStore,
    format: OutputFormat,
) -> Result<String, ShopError> {
    let customer = store.customer(&job.customer_id);
    let vehicle = store.vehicle(&job.vehicle_id);
    let technician = store.technician(&job.technician_id);

    match format {
        OutputFormat::Pretty => Ok(format_job_pretty(
            job,
            customer.as_ref(),
            vehicle.as_ref(),
            technician.as_ref(),
        )),
        OutputFormat::Json => {
            format_job_json(job, customer.as_ref(), vehicle.as_ref(), technician.as_ref())
        }
    }
}

/// Format a time log based on output format
///
/// # Errors
///
/// Returns `ShopError::Parse` if JSON serialization fails.
pub fn format_time_log(entries: &[TimeLogEntry], format: OutputFormat) -> Result<String, ShopError> {
    match format {
        OutputFormat::Pretty => Ok(format_time_log_pretty(entries)),
        OutputFormat::Json => format_time_log_json(entries),
    }
}
