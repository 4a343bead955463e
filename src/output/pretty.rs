use colored::{ColoredString, Colorize};

use crate::jobs::{Customer, JobCard, JobStatus, Priority, Technician, Vehicle};
use crate::tracking::{format_minutes, ActivityLabel, TimeLogEntry};

fn status_badge(status: JobStatus) -> ColoredString {
    match status {
        JobStatus::Pending => "[ ]".white(),
        JobStatus::InProgress => "[>]".cyan(),
        JobStatus::OnHold => "[=]".yellow(),
        JobStatus::Completed => "[x]".green(),
    }
}

fn activity_name(activity: ActivityLabel) -> ColoredString {
    let name = activity.display_name();
    match activity {
        ActivityLabel::Work => name.green(),
        ActivityLabel::Break => name.yellow(),
        ActivityLabel::Waiting => name.red(),
        ActivityLabel::QualityCheck => name.cyan(),
    }
}

/// Format a list of job cards as a pretty table
pub fn format_jobs_pretty(jobs: &[JobCard], title: &str) -> String {
    if jobs.is_empty() {
        return format!("{title} (0 jobs)\n  No jobs");
    }

    let mut output = format!("{} ({} jobs)\n", title, jobs.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for job in jobs {
        let mut line = format!(
            "{} {}  {}",
            status_badge(job.status),
            job.id.bold(),
            job.service
        );

        if job.priority == Priority::High {
            line.push_str(&format!("  {}", "!high".red()));
        }
        if job.worked_minutes > 0 {
            line.push_str(&format!("  {}", format_minutes(job.worked_minutes).dimmed()));
        }

        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format a single job card with its related records
pub fn format_job_pretty(
    job: &JobCard,
    customer: Option<&Customer>,
    vehicle: Option<&Vehicle>,
    technician: Option<&Technician>,
) -> String {
    let mut output = format!("{} {}  {}\n", status_badge(job.status), job.id.bold(), job.service);
    output.push_str(&format!("  {}: {}\n", "Status".dimmed(), job.status));
    output.push_str(&format!("  {}: {}\n", "Priority".dimmed(), job.priority));

    if let Some(customer) = customer {
        output.push_str(&format!(
            "  {}: {} ({})\n",
            "Customer".dimmed(),
            customer.name,
            customer.phone
        ));
    }
    if let Some(vehicle) = vehicle {
        output.push_str(&format!("  {}: {}\n", "Vehicle".dimmed(), vehicle.label()));
    }
    if let Some(technician) = technician {
        output.push_str(&format!(
            "  {}: {} ({})\n",
            "Technician".dimmed(),
            technician.name,
            technician.specialty
        ));
    }
    if let Some(time_in) = job.time_in {
        output.push_str(&format!(
            "  {}: {}\n",
            "Time in".dimmed(),
            time_in.format("%Y-%m-%d %H:%M UTC")
        ));
    }
    if let Some(time_out) = job.time_out {
        output.push_str(&format!(
            "  {}: {}\n",
            "Time out".dimmed(),
            time_out.format("%Y-%m-%d %H:%M UTC")
        ));
    }
    output.push_str(&format!(
        "  {}: {}\n",
        "Worked".dimmed(),
        format_minutes(job.worked_minutes)
    ));
    if !job.notes.is_empty() {
        output.push_str(&format!("  {}: {}\n", "Notes".dimmed(), job.notes));
    }

    output
}

/// Format a time log with per-activity totals
pub fn format_time_log_pretty(entries: &[TimeLogEntry]) -> String {
    let mut output = format!("Time Log ({} entries)\n", entries.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for entry in entries {
        let end = entry
            .ended_at
            .map_or_else(|| "--:--".to_string(), |t| t.format("%H:%M").to_string());
        let mut line = format!(
            "  #{:<3} {:<14} {} → {}  {:>7}",
            entry.id,
            activity_name(entry.activity),
            entry.started_at.format("%H:%M"),
            end,
            format_minutes(entry.duration_minutes)
        );
        if let Some(note) = &entry.note {
            line.push_str(&format!("  {}", note.dimmed()));
        }
        output.push_str(&line);
        output.push('\n');
    }

    output.push_str(&"─".repeat(60));
    output.push('\n');
    for activity in ActivityLabel::ALL {
        let total: i64 = entries
            .iter()
            .filter(|e| e.activity == activity)
            .map(|e| e.duration_minutes)
            .sum();
        if total > 0 || activity.is_work() {
            output.push_str(&format!(
                "  {:<14} {:>7}\n",
                activity.display_name(),
                format_minutes(total)
            ));
        }
    }

    output
}
