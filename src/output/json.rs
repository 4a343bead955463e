//! JSON output formatting for shopdash.

use serde::Serialize;
use serde_json::json;

use crate::error::ShopError;
use crate::jobs::{Customer, JobCard, Technician, Vehicle};
use crate::tracking::{ActivityLabel, TimeLogEntry};

/// Format job cards as JSON
///
/// # Errors
///
/// Returns `ShopError::Parse` if JSON serialization fails.
pub fn format_jobs_json(jobs: &[JobCard], title: &str) -> Result<String, ShopError> {
    let output = json!({
        "list": title,
        "count": jobs.len(),
        "items": jobs
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a single job card and its related records as JSON
///
/// # Errors
///
/// Returns `ShopError::Parse` if JSON serialization fails.
pub fn format_job_json(
    job: &JobCard,
    customer: Option<&Customer>,
    vehicle: Option<&Vehicle>,
    technician: Option<&Technician>,
) -> Result<String, ShopError> {
    let output = json!({
        "job": job,
        "customer": customer,
        "vehicle": vehicle,
        "technician": technician
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a time log with per-activity totals as JSON
///
/// # Errors
///
/// Returns `ShopError::Parse` if JSON serialization fails.
pub fn format_time_log_json(entries: &[TimeLogEntry]) -> Result<String, ShopError> {
    let totals: serde_json::Map<String, serde_json::Value> = ActivityLabel::ALL
        .iter()
        .map(|activity| {
            let total: i64 = entries
                .iter()
                .filter(|e| e.activity == *activity)
                .map(|e| e.duration_minutes)
                .sum();
            (activity.as_str().to_string(), json!(total))
        })
        .collect();

    let output = json!({
        "count": entries.len(),
        "entries": entries,
        "totals": totals
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Serialize any value as pretty JSON.
///
/// # Errors
///
/// Returns `ShopError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ShopError> {
    Ok(serde_json::to_string_pretty(value)?)
}
