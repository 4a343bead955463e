//! Shop reports.
//!
//! Aggregates job cards into the numbers behind the dashboard charts.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ShopError;
use crate::jobs::{JobCard, JobStatus, JobStore};
use crate::tracking::format::{format_minutes, render_bar};

/// Report time period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    /// Today only
    Today,
    /// Last 7 days
    Week,
    /// Last 30 days
    Month,
    /// All time
    AllTime,
}

impl ReportPeriod {
    /// Half-open UTC range `[start, end)` for this period, ending after
    /// `today`. `None` means unbounded.
    #[must_use]
    pub fn date_range(&self, today: NaiveDate) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let days_back = match self {
            Self::Today => 0,
            Self::Week => 6,
            Self::Month => 29,
            Self::AllTime => return None,
        };

        let midnight = |d: NaiveDate| d.and_time(NaiveTime::MIN).and_utc();
        Some((
            midnight(today - Duration::days(days_back)),
            midnight(today + Duration::days(1)),
        ))
    }

    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Week => "This Week",
            Self::Month => "This Month",
            Self::AllTime => "All Time",
        }
    }
}

impl FromStr for ReportPeriod {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "today" | "t" | "d" => Ok(Self::Today),
            "week" | "w" | "7d" => Ok(Self::Week),
            "month" | "m" | "30d" => Ok(Self::Month),
            "all" | "alltime" | "all-time" => Ok(Self::AllTime),
            other => Err(ShopError::Parse(format!(
                "unknown period '{other}' (expected today, week, month, all)"
            ))),
        }
    }
}

/// Shop report data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopReport {
    /// Report period name
    pub period: String,
    /// Job count per status across the whole board
    pub by_status: Vec<StatusCount>,
    /// Jobs clocked in during the period
    pub jobs_in_period: usize,
    /// Worked minutes across jobs in the period
    pub total_minutes: i64,
    /// Average worked minutes per job with recorded time
    pub avg_job_minutes: f64,
    /// Longest single job in minutes
    pub longest_job_minutes: i64,
    /// Worked minutes by day of week, Monday first
    pub by_day_of_week: [i64; 7],
    /// Worked time per technician
    pub by_technician: Vec<TechnicianTime>,
    /// Worked time per service
    pub by_service: Vec<ServiceTime>,
    /// Daily breakdown, newest first
    pub daily: Vec<DailyTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: JobStatus,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicianTime {
    pub technician_id: String,
    pub name: String,
    pub minutes: i64,
    pub jobs: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceTime {
    pub service: String,
    pub minutes: i64,
    pub jobs: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyTime {
    pub date: String,
    pub minutes: i64,
    pub jobs: usize,
}

impl ShopReport {
    /// Generate a report for `period` ending on `today`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn generate(store: &dyn JobStore, period: ReportPeriod, today: NaiveDate) -> Self {
        let all = store.jobs();
        let range = period.date_range(today);

        let in_period: Vec<&JobCard> = all
            .iter()
            .filter(|j| match (j.time_in, range) {
                (Some(t), Some((start, end))) => t >= start && t < end,
                (Some(_), None) => true,
                (None, _) => false,
            })
            .collect();

        let by_status = JobStatus::ALL
            .iter()
            .map(|&status| StatusCount {
                status,
                count: all.iter().filter(|j| j.status == status).count(),
            })
            .collect();

        let timed: Vec<&&JobCard> = in_period.iter().filter(|j| j.worked_minutes > 0).collect();
        let total_minutes: i64 = timed.iter().map(|j| j.worked_minutes).sum();
        let avg_job_minutes = if timed.is_empty() {
            0.0
        } else {
            total_minutes as f64 / timed.len() as f64
        };
        let longest_job_minutes = timed.iter().map(|j| j.worked_minutes).max().unwrap_or(0);

        let mut by_day_of_week = [0_i64; 7];
        let mut tech_map: HashMap<&str, (i64, usize)> = HashMap::new();
        let mut service_map: HashMap<&str, (i64, usize)> = HashMap::new();
        let mut daily_map: HashMap<NaiveDate, (i64, usize)> = HashMap::new();

        for job in &in_period {
            let Some(time_in) = job.time_in else { continue };

            let weekday = time_in.weekday().num_days_from_monday() as usize;
            by_day_of_week[weekday] += job.worked_minutes;

            let tech = tech_map.entry(job.technician_id.as_str()).or_default();
            tech.0 += job.worked_minutes;
            tech.1 += 1;

            let service = service_map.entry(job.service.as_str()).or_default();
            service.0 += job.worked_minutes;
            service.1 += 1;

            let day = daily_map.entry(time_in.date_naive()).or_default();
            day.0 += job.worked_minutes;
            day.1 += 1;
        }

        let mut by_technician: Vec<TechnicianTime> = tech_map
            .into_iter()
            .map(|(id, (minutes, jobs))| TechnicianTime {
                technician_id: id.to_string(),
                name: store
                    .technician(id)
                    .map_or_else(|| id.to_string(), |t| t.name),
                minutes,
                jobs,
            })
            .collect();
        by_technician.sort_by(|a, b| {
            b.minutes
                .cmp(&a.minutes)
                .then_with(|| a.technician_id.cmp(&b.technician_id))
        });

        let mut by_service: Vec<ServiceTime> = service_map
            .into_iter()
            .map(|(service, (minutes, jobs))| ServiceTime {
                service: service.to_string(),
                minutes,
                jobs,
            })
            .collect();
        by_service.sort_by(|a, b| b.minutes.cmp(&a.minutes).then_with(|| a.service.cmp(&b.service)));

        let mut daily: Vec<DailyTime> = daily_map
            .into_iter()
            .map(|(date, (minutes, jobs))| DailyTime {
                date: date.to_string(),
                minutes,
                jobs,
            })
            .collect();
        daily.sort_by(|a, b| b.date.cmp(&a.date));

        Self {
            period: period.display_name().to_string(),
            by_status,
            jobs_in_period: in_period.len(),
            total_minutes,
            avg_job_minutes,
            longest_job_minutes,
            by_day_of_week,
            by_technician,
            by_service,
            daily,
        }
    }

    /// Count of jobs with `status`.
    #[must_use]
    pub fn status_count(&self, status: JobStatus) -> usize {
        self.by_status
            .iter()
            .find(|s| s.status == status)
            .map_or(0, |s| s.count)
    }

    /// Get total hours.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn total_hours(&self) -> f64 {
        self.total_minutes as f64 / 60.0
    }

    /// Format the report for display.
    #[must_use]
    pub fn format(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("📊 Shop Report: {}", self.period));
        lines.push("═".repeat(50));
        lines.push(String::new());

        lines.push("Board".to_string());
        lines.push("─".repeat(40));
        for status in &self.by_status {
            lines.push(format!("  {:<14} {}", status.status.to_string(), status.count));
        }
        lines.push(String::new());

        lines.push("Summary".to_string());
        lines.push("─".repeat(40));
        lines.push(format!("  Jobs clocked in:  {}", self.jobs_in_period));
        lines.push(format!("  Worked time:      {}", format_minutes(self.total_minutes)));
        lines.push(format!("  Average job:      {:.0} minutes", self.avg_job_minutes));
        lines.push(format!("  Longest job:      {} minutes", self.longest_job_minutes));
        lines.push(String::new());

        if self.total_minutes > 0 {
            lines.push("By Day of Week".to_string());
            lines.push("─".repeat(40));
            let days = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
            let max_day = self.by_day_of_week.iter().copied().max().unwrap_or(0);

            for (day, minutes) in days.iter().zip(self.by_day_of_week) {
                lines.push(format!("  {day} {minutes:>4}m {}", render_bar(minutes, max_day, 20)));
            }
            lines.push(String::new());
        }

        if !self.by_technician.is_empty() {
            lines.push("Technicians".to_string());
            lines.push("─".repeat(40));
            for tech in &self.by_technician {
                lines.push(format!(
                    "  {:<20} {:>5}m ({} jobs)",
                    tech.name, tech.minutes, tech.jobs
                ));
            }
            lines.push(String::new());
        }

        if !self.by_service.is_empty() {
            lines.push("Top Services".to_string());
            lines.push("─".repeat(40));
            for service in self.by_service.iter().take(5) {
                let name: String = if service.service.chars().count() > 28 {
                    format!("{}...", service.service.chars().take(25).collect::<String>())
                } else {
                    service.service.clone()
                };
                lines.push(format!("  {name:<28} {:>5}m", service.minutes));
            }
            lines.push(String::new());
        }

        if !self.daily.is_empty() {
            lines.push("Recent Days".to_string());
            lines.push("─".repeat(40));
            for day in self.daily.iter().take(7) {
                lines.push(format!("  {} {:>5}m ({} jobs)", day.date, day.minutes, day.jobs));
            }
        }

        lines.join("\n")
    }
}
