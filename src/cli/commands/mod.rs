//! Command implementations for shopdash.
//!
//! Every command returns the text to print; `main` does the printing.

mod completions;
mod config;
mod login;
mod report;
mod simulate;

pub use completions::completions;
pub use config::config;
pub use login::login;
pub use report::report;
pub use simulate::{simulate, Segment};

use crate::cli::args::OutputFormat;
use crate::error::ShopError;
use crate::jobs::{JobStatus, JobStore};
use crate::output::{format_job, format_jobs};

/// Execute the jobs command
///
/// # Errors
///
/// Returns an error if the status filter is unknown or output formatting fails.
pub fn jobs(
    store: &dyn JobStore,
    status: Option<&str>,
    format: OutputFormat,
) -> Result<String, ShopError> {
    let all = store.jobs();
    match status {
        Some(s) => {
            let status: JobStatus = s.parse()?;
            let filtered: Vec<_> = all.into_iter().filter(|j| j.status == status).collect();
            format_jobs(&filtered, &format!("Jobs: {status}"), format)
        }
        None => format_jobs(&all, "Job Board", format),
    }
}

/// Execute the job command
///
/// # Errors
///
/// Returns `ShopError::NotFound` if no job card has that id.
pub fn job(store: &dyn JobStore, id: &str, format: OutputFormat) -> Result<String, ShopError> {
    let card = store.job(id)?;
    format_job(&card, store, format)
}
