//! Report command implementation.

use chrono::NaiveDate;

use crate::analytics::{ReportPeriod, ShopReport};
use crate::cli::args::OutputFormat;
use crate::error::ShopError;
use crate::jobs::JobStore;
use crate::output::to_json;

/// Execute the report command.
///
/// # Errors
///
/// Returns an error if the period is unknown or output formatting fails.
pub fn report(
    store: &dyn JobStore,
    period: &str,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, ShopError> {
    let period: ReportPeriod = period.parse()?;
    let report = ShopReport::generate(store, period, today);

    match format {
        OutputFormat::Json => to_json(&report),
        OutputFormat::Pretty => Ok(report.format()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::InMemoryJobStore;
    use chrono::{TimeZone, Utc};

    fn store() -> (InMemoryJobStore, NaiveDate) {
        let now = Utc.with_ymd_and_hms(2024, 5, 15, 18, 0, 0).unwrap();
        (InMemoryJobStore::demo_at(now), now.date_naive())
    }

    #[test]
    fn test_report_json() {
        let (store, today) = store();
        let text = report(&store, "all", today, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["period"], "All Time");
        assert_eq!(value["total_minutes"], 435);
    }

    #[test]
    fn test_report_unknown_period() {
        let (store, today) = store();
        let err = report(&store, "fortnight", today, OutputFormat::Pretty).unwrap_err();
        assert!(matches!(err, ShopError::Parse(_)));
    }
}
