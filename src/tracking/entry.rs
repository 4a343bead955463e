//! Open sessions and closed log entries.

use chrono::{DateTime, Duration, Local, Utc};
use serde::{Deserialize, Serialize};

use super::activity::ActivityLabel;

/// The one open, uncommitted interval of a timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSession {
    /// What the technician is doing
    pub activity: ActivityLabel,
    /// When the interval started
    pub started_at: DateTime<Utc>,
    /// Optional free-text note carried into the log entry
    pub note: Option<String>,
}

impl ActiveSession {
    /// Open a session at `started_at`.
    #[must_use]
    pub const fn new(activity: ActivityLabel, started_at: DateTime<Utc>) -> Self {
        Self {
            activity,
            started_at,
            note: None,
        }
    }

    /// Wall-clock time since the session started, never negative.
    #[must_use]
    pub fn elapsed_at(&self, now: DateTime<Utc>) -> Duration {
        (now - self.started_at).max(Duration::zero())
    }

    /// Close the session at `ended_at`, producing log entry `id`.
    ///
    /// An `ended_at` earlier than the start (clock stepped backwards) is
    /// clamped to the start, giving a zero-length entry.
    #[must_use]
    pub fn close(self, id: u64, ended_at: DateTime<Utc>) -> TimeLogEntry {
        let ended_at = ended_at.max(self.started_at);
        TimeLogEntry {
            id,
            activity: self.activity,
            started_at: self.started_at,
            ended_at: Some(ended_at),
            duration_minutes: whole_minutes(self.started_at, ended_at),
            note: self.note,
        }
    }
}

/// A closed timed interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeLogEntry {
    /// Sequential id within the owning timer
    pub id: u64,
    /// Activity label of the closed session
    pub activity: ActivityLabel,
    /// When the interval started
    pub started_at: DateTime<Utc>,
    /// When the interval ended
    pub ended_at: Option<DateTime<Utc>>,
    /// `floor((ended_at - started_at) / 1 minute)`
    pub duration_minutes: i64,
    /// Optional note
    pub note: Option<String>,
}

impl TimeLogEntry {
    /// Check if the entry is closed.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.ended_at.is_some()
    }

    /// Get start time in local timezone.
    #[must_use]
    pub fn started_at_local(&self) -> DateTime<Local> {
        self.started_at.with_timezone(&Local)
    }

    /// Get end time in local timezone.
    #[must_use]
    pub fn ended_at_local(&self) -> Option<DateTime<Local>> {
        self.ended_at.map(|t| t.with_timezone(&Local))
    }
}

/// Whole minutes between two instants, rounded down. Zero if `end < start`.
#[must_use]
pub fn whole_minutes(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let millis = (end - start).num_milliseconds().max(0);
    millis / 60_000
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH
    }

    #[test]
    fn test_whole_minutes_rounds_down() {
        assert_eq!(whole_minutes(t0(), t0() + Duration::seconds(59)), 0);
        assert_eq!(whole_minutes(t0(), t0() + Duration::seconds(60)), 1);
        assert_eq!(whole_minutes(t0(), t0() + Duration::milliseconds(5_399_999)), 89);
        assert_eq!(whole_minutes(t0(), t0() + Duration::seconds(5400)), 90);
    }

    #[test]
    fn test_whole_minutes_negative_is_zero() {
        assert_eq!(whole_minutes(t0() + Duration::minutes(5), t0()), 0);
    }

    #[test]
    fn test_close_session() {
        let mut session = ActiveSession::new(ActivityLabel::Break, t0());
        session.note = Some("coffee".to_string());

        let entry = session.close(3, t0() + Duration::seconds(900));
        assert_eq!(entry.id, 3);
        assert_eq!(entry.activity, ActivityLabel::Break);
        assert_eq!(entry.duration_minutes, 15);
        assert_eq!(entry.note.as_deref(), Some("coffee"));
        assert!(entry.is_closed());
    }

    #[test]
    fn test_close_before_start_clamps() {
        let session = ActiveSession::new(ActivityLabel::Work, t0() + Duration::minutes(10));
        let entry = session.close(1, t0());
        assert_eq!(entry.ended_at, Some(entry.started_at));
        assert_eq!(entry.duration_minutes, 0);
    }
}
