//! Simulate command implementation.
//!
//! Drives a tracker widget through scripted segments on a manual clock,
//! so a whole shift can be replayed instantly.

use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use colored::Colorize;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;

use crate::cli::args::{OutputFormat, SimulateArgs};
use crate::config::Config;
use crate::core::{Clock, ManualClock};
use crate::error::ShopError;
use crate::jobs::{InMemoryJobStore, JobStore};
use crate::output::{format_job, format_time_log};
use crate::tracking::{
    format_duration, parse_duration, ActivityLabel, SessionTimer, TrackerWidget,
};

// label:duration[:note]
static SEGMENT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z_-]+)\s*:\s*([0-9hmsHMS]+)\s*(?::\s*(.+?))?\s*$")
        .unwrap_or_else(|e| panic!("Invalid segment regex: {e}"))
});

/// One scripted interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub activity: ActivityLabel,
    pub duration: Duration,
    pub note: Option<String>,
}

impl FromStr for Segment {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = SEGMENT_PATTERN.captures(s).ok_or_else(|| {
            ShopError::Parse(format!("invalid segment '{s}' (expected label:duration)"))
        })?;

        let activity: ActivityLabel = caps[1].parse()?;
        let duration = parse_duration(&caps[2])
            .ok_or_else(|| ShopError::Parse(format!("invalid duration '{}'", &caps[2])))?;
        let note = caps.get(3).map(|m| m.as_str().to_string());

        Ok(Self {
            activity,
            duration,
            note,
        })
    }
}

/// Execute the simulate command.
///
/// # Errors
///
/// Returns an error if a segment cannot be parsed, the job does not exist,
/// or tracking preconditions fail.
pub fn simulate(
    config: &Config,
    args: SimulateArgs,
    format: OutputFormat,
) -> Result<String, ShopError> {
    let segments = args
        .segments
        .iter()
        .map(|s| s.parse::<Segment>())
        .collect::<Result<Vec<_>, _>>()?;

    let start = match args.start.as_deref() {
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| ShopError::Parse(format!("invalid --start '{s}': {e}")))?,
        None => Utc::now(),
    };

    let mut store = InMemoryJobStore::demo_at(start);
    let job_id = store.job(&args.job)?.id;

    let clock = ManualClock::new(start);
    let timer = SessionTimer::with_clock(clock.clone())
        .require_job(config.tracking.require_job_selection);
    let mut widget = TrackerWidget::new(
        timer,
        std::time::Duration::from_millis(config.tracking.tick_interval_ms),
    );
    widget.select_job(Some(job_id.clone()))?;

    let clock_out = !args.no_clock_out;
    let last = segments.len().saturating_sub(1);

    for (i, segment) in segments.iter().enumerate() {
        widget.start(segment.activity, &mut store)?;
        if let Some(note) = &segment.note {
            widget.set_note(note.clone())?;
        }
        clock.try_advance(segment.duration)?;

        if i == last && clock_out {
            widget.stop(&mut store)?;
        } else {
            widget.pause()?;
        }
    }

    let job = store.job(&job_id)?;
    let timer = widget.timer();

    match format {
        OutputFormat::Json => {
            let output = json!({
                "job": job,
                "entries": timer.entries(),
                "totals": {
                    "work": timer.total_work_minutes(),
                    "break": timer.total_break_minutes(),
                    "waiting": timer.total_minutes(ActivityLabel::Waiting),
                    "quality_check": timer.total_minutes(ActivityLabel::QualityCheck),
                },
                "clockedOut": clock_out,
            });
            Ok(serde_json::to_string_pretty(&output)?)
        }
        OutputFormat::Pretty => {
            let mut output = Vec::new();

            output.push(
                format!(
                    "⏱  Simulated {} segment{} on {} ({})",
                    segments.len(),
                    if segments.len() == 1 { "" } else { "s" },
                    job.id,
                    format_duration(clock.now() - start)
                )
                .bold()
                .to_string(),
            );
            output.push(String::new());
            output.push(format_time_log(timer.entries(), format)?);

            if clock_out {
                output.push("✅ Job clocked out".green().to_string());
            } else {
                output.push("⏸  Job left open".yellow().to_string());
            }
            output.push(String::new());
            output.push(format_job(&job, &store, format)?);

            Ok(output.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::JobStatus;

    fn args(job: &str, segments: &[&str], no_clock_out: bool) -> SimulateArgs {
        SimulateArgs {
            job: job.to_string(),
            segments: segments.iter().map(ToString::to_string).collect(),
            no_clock_out,
            start: Some("2024-05-15T08:00:00Z".to_string()),
        }
    }

    #[test]
    fn test_parse_segment() {
        let seg: Segment = "work:90m".parse().unwrap();
        assert_eq!(seg.activity, ActivityLabel::Work);
        assert_eq!(seg.duration, Duration::minutes(90));
        assert!(seg.note.is_none());

        let seg: Segment = "qc:1h5m:road test".parse().unwrap();
        assert_eq!(seg.activity, ActivityLabel::QualityCheck);
        assert_eq!(seg.duration, Duration::minutes(65));
        assert_eq!(seg.note.as_deref(), Some("road test"));

        let seg: Segment = "break:15".parse().unwrap();
        assert_eq!(seg.duration, Duration::minutes(15));
    }

    #[test]
    fn test_parse_segment_errors() {
        assert!("work".parse::<Segment>().is_err());
        assert!("nap:10m".parse::<Segment>().is_err());
        assert!("work:ten".parse::<Segment>().is_err());
    }

    #[test]
    fn test_parse_segment_out_of_range() {
        let err = "work:99999999999999999".parse::<Segment>().unwrap_err();
        assert!(matches!(err, ShopError::Parse(_)));
        let err = "work:9999999999999999h".parse::<Segment>().unwrap_err();
        assert!(matches!(err, ShopError::Parse(_)));
    }

    #[test]
    fn test_simulate_clock_overflow_is_an_error() {
        let config = Config::default();
        let err = simulate(
            &config,
            args("JC-1001", &["work:999999999999m"], false),
            OutputFormat::Json,
        )
        .unwrap_err();
        assert!(matches!(err, ShopError::Parse(_)));
    }

    #[test]
    fn test_simulate_json_totals() {
        let config = Config::default();
        let text = simulate(
            &config,
            args("JC-1001", &["work:90m", "break:15m", "work:75m"], false),
            OutputFormat::Json,
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["totals"]["work"], 165);
        assert_eq!(value["totals"]["break"], 15);
        assert_eq!(value["job"]["workedMinutes"], 165);
        assert_eq!(value["job"]["status"], "completed");
        assert_eq!(value["job"]["timeOut"], "2024-05-15T11:00:00Z");
        assert_eq!(value["entries"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_simulate_without_clock_out() {
        let config = Config::default();
        let text = simulate(
            &config,
            args("JC-1001", &["work:30m"], true),
            OutputFormat::Json,
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["job"]["status"], JobStatus::InProgress.as_str());
        assert_eq!(value["job"]["workedMinutes"], 0);
        assert_eq!(value["clockedOut"], false);
    }

    #[test]
    fn test_simulate_unknown_job() {
        let config = Config::default();
        let err = simulate(&config, args("JC-0000", &["work:5m"], false), OutputFormat::Json)
            .unwrap_err();
        assert!(matches!(err, ShopError::NotFound(_)));
    }
}
