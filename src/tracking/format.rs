//! Duration parsing and formatting.

use chrono::Duration;

/// Format a duration as HH:MM:SS for the running-timer display.
#[must_use]
pub fn format_elapsed(d: Duration) -> String {
    let total_seconds = d.num_seconds().max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Format whole minutes as a short string (e.g., "25m", "1h 30m").
#[must_use]
pub fn format_minutes(total_minutes: i64) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Format a duration as a human-readable string.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let total_minutes = d.num_minutes();

    if total_minutes < 1 {
        let seconds = d.num_seconds();
        return format!("{} second{}", seconds, if seconds == 1 { "" } else { "s" });
    }

    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    let plural = |n: i64| if n == 1 { "" } else { "s" };

    match (hours, minutes) {
        (0, m) => format!("{m} minute{}", plural(m)),
        (h, 0) => format!("{h} hour{}", plural(h)),
        (h, m) => format!("{h} hour{}, {m} minute{}", plural(h), plural(m)),
    }
}

/// Parse a duration string like "25m", "1h30m", "90s".
///
/// A bare number is minutes. Zero is allowed, since a zero-length interval
/// is a valid log entry.
#[must_use]
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim().to_lowercase();
    if s.is_empty() {
        return None;
    }

    if let Ok(minutes) = s.parse::<i64>() {
        return if minutes >= 0 {
            Duration::try_minutes(minutes)
        } else {
            None
        };
    }

    let mut total_seconds: i64 = 0;
    let mut current_num = String::new();
    let mut saw_unit = false;

    for c in s.chars() {
        if c.is_ascii_digit() {
            current_num.push(c);
            continue;
        }

        if current_num.is_empty() {
            return None;
        }
        let num: i64 = current_num.parse().ok()?;
        current_num.clear();

        let seconds = match c {
            'h' => num.checked_mul(3600)?,
            'm' => num.checked_mul(60)?,
            's' => num,
            _ => return None,
        };
        total_seconds = total_seconds.checked_add(seconds)?;
        saw_unit = true;
    }

    // Trailing number without unit: minutes
    if !current_num.is_empty() {
        let num: i64 = current_num.parse().ok()?;
        total_seconds = total_seconds.checked_add(num.checked_mul(60)?)?;
    }

    if saw_unit {
        Duration::try_seconds(total_seconds)
    } else {
        None
    }
}

/// Render a horizontal bar scaled against `max`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_bar(value: i64, max: i64, width: usize) -> String {
    if max <= 0 || value <= 0 {
        return String::new();
    }
    let filled = ((value as f64 / max as f64) * width as f64).round() as usize;
    "█".repeat(filled.min(width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::zero()), "00:00:00");
        assert_eq!(format_elapsed(Duration::seconds(75)), "00:01:15");
        assert_eq!(format_elapsed(Duration::seconds(5400)), "01:30:00");
        assert_eq!(format_elapsed(Duration::seconds(-5)), "00:00:00");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(25), "25m");
        assert_eq!(format_minutes(90), "1h 30m");
        assert_eq!(format_minutes(0), "0m");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::minutes(25)), "25 minutes");
        assert_eq!(format_duration(Duration::minutes(1)), "1 minute");
        assert_eq!(format_duration(Duration::hours(2)), "2 hours");
        assert_eq!(format_duration(Duration::minutes(90)), "1 hour, 30 minutes");
        assert_eq!(format_duration(Duration::seconds(30)), "30 seconds");
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("25"), Some(Duration::minutes(25)));
        assert_eq!(parse_duration("25m"), Some(Duration::minutes(25)));
        assert_eq!(parse_duration("1h"), Some(Duration::hours(1)));
        assert_eq!(parse_duration("2h30m"), Some(Duration::minutes(150)));
        assert_eq!(parse_duration("1m30s"), Some(Duration::seconds(90)));
        assert_eq!(parse_duration("0"), Some(Duration::zero()));
        assert_eq!(parse_duration("0m"), Some(Duration::zero()));
    }

    #[test]
    fn test_parse_duration_invalid() {
        assert!(parse_duration("").is_none());
        assert!(parse_duration("abc").is_none());
        assert!(parse_duration("-5").is_none());
        assert!(parse_duration("5x").is_none());
    }

    #[test]
    fn test_parse_duration_out_of_range() {
        assert!(parse_duration("99999999999999999").is_none());
        assert!(parse_duration("9999999999999999h").is_none());
        assert!(parse_duration("9223372036854775807s").is_none());
        assert!(parse_duration("1h9223372036854775807").is_none());
    }

    #[test]
    fn test_render_bar() {
        assert_eq!(render_bar(5, 10, 10), "█████");
        assert_eq!(render_bar(10, 10, 10), "██████████");
        assert_eq!(render_bar(0, 10, 10), "");
        assert_eq!(render_bar(3, 0, 10), "");
    }
}
