//! Session timer.
//!
//! Tracks at most one open interval and an append-only log of closed ones.
//! Elapsed time is always `clock.now() - started_at`; nothing here counts
//! ticks.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, info};

use super::activity::ActivityLabel;
use super::entry::{ActiveSession, TimeLogEntry};
use crate::core::{Clock, SystemClock};
use crate::error::ShopError;

/// Aggregate "time out" event produced by [`SessionTimer::stop`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeOut {
    /// The interval that was just closed
    pub entry: TimeLogEntry,
    /// When tracking stopped
    pub ended_at: DateTime<Utc>,
    /// Sum of all closed `work` entries, including `entry`
    pub total_work_minutes: i64,
}

/// Start/pause/stop stopwatch with a log of closed intervals.
#[derive(Debug)]
pub struct SessionTimer<C: Clock = SystemClock> {
    clock: C,
    require_job: bool,
    job_id: Option<String>,
    active: Option<ActiveSession>,
    log: Vec<TimeLogEntry>,
    next_id: u64,
}

impl SessionTimer<SystemClock> {
    /// Create a timer on the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for SessionTimer<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> SessionTimer<C> {
    /// Create a timer on a custom clock.
    #[must_use]
    pub const fn with_clock(clock: C) -> Self {
        Self {
            clock,
            require_job: false,
            job_id: None,
            active: None,
            log: Vec::new(),
            next_id: 1,
        }
    }

    /// Require a non-empty job id before [`start`](Self::start) is allowed.
    #[must_use]
    pub fn require_job(mut self, required: bool) -> Self {
        self.require_job = required;
        self
    }

    /// Set the job this timer is tracking for.
    ///
    /// Blank ids are treated as no selection.
    pub fn set_job(&mut self, job_id: Option<String>) {
        self.job_id = job_id.filter(|id| !id.trim().is_empty());
    }

    /// Currently selected job id.
    #[must_use]
    pub fn job_id(&self) -> Option<&str> {
        self.job_id.as_deref()
    }

    /// The clock this timer reads.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Check whether `start` would succeed.
    #[must_use]
    pub fn can_start(&self) -> bool {
        self.active.is_none() && (!self.require_job || self.job_id.is_some())
    }

    /// Check whether `pause`/`stop` would succeed.
    #[must_use]
    pub const fn can_stop(&self) -> bool {
        self.active.is_some()
    }

    /// Check if a session is open.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The open session, if any.
    #[must_use]
    pub const fn active(&self) -> Option<&ActiveSession> {
        self.active.as_ref()
    }

    /// Closed entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[TimeLogEntry] {
        &self.log
    }

    /// Open a session labeled `activity` at the current instant.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Session` if a session is already open or a job is
    /// required but none is selected. The timer is left unchanged.
    pub fn start(&mut self, activity: ActivityLabel) -> Result<&ActiveSession, ShopError> {
        if let Some(active) = &self.active {
            return Err(ShopError::Session(format!(
                "a {} session is already active",
                active.activity.as_str()
            )));
        }
        if self.require_job && self.job_id.is_none() {
            return Err(ShopError::Session("no job selected".to_string()));
        }

        let session = ActiveSession::new(activity, self.clock.now());
        info!(
            activity = activity.as_str(),
            job = self.job_id.as_deref().unwrap_or("-"),
            started_at = %session.started_at,
            "session started"
        );
        Ok(self.active.insert(session))
    }

    /// Attach a note to the open session.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Session` if no session is open.
    pub fn set_note(&mut self, note: impl Into<String>) -> Result<(), ShopError> {
        let session = self
            .active
            .as_mut()
            .ok_or_else(|| ShopError::Session("no active session".to_string()))?;
        session.note = Some(note.into());
        Ok(())
    }

    /// Close the open session and append it to the log.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Session` if no session is open.
    pub fn pause(&mut self) -> Result<&TimeLogEntry, ShopError> {
        let index = self.close_active()?;
        let entry = &self.log[index];
        info!(
            id = entry.id,
            activity = entry.activity.as_str(),
            minutes = entry.duration_minutes,
            "session paused"
        );
        Ok(entry)
    }

    /// Close the open session and produce the job's time-out event.
    ///
    /// The reported work total is recomputed from the log after the closed
    /// interval has been appended, so it is never counted twice.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Session` if no session is open.
    pub fn stop(&mut self) -> Result<TimeOut, ShopError> {
        let index = self.close_active()?;
        let entry = self.log[index].clone();
        let ended_at = entry.ended_at.unwrap_or(entry.started_at);
        let total_work_minutes = self.total_work_minutes();

        info!(
            id = entry.id,
            activity = entry.activity.as_str(),
            minutes = entry.duration_minutes,
            total_work_minutes,
            "session stopped"
        );

        Ok(TimeOut {
            entry,
            ended_at,
            total_work_minutes,
        })
    }

    /// Wall-clock time since the open session started, or zero when idle.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.active
            .as_ref()
            .map_or_else(Duration::zero, |s| s.elapsed_at(self.clock.now()))
    }

    /// Total closed minutes labeled `activity`.
    #[must_use]
    pub fn total_minutes(&self, activity: ActivityLabel) -> i64 {
        self.log
            .iter()
            .filter(|e| e.activity == activity)
            .map(|e| e.duration_minutes)
            .sum()
    }

    /// Total closed work minutes.
    #[must_use]
    pub fn total_work_minutes(&self) -> i64 {
        self.total_minutes(ActivityLabel::Work)
    }

    /// Total closed break minutes.
    #[must_use]
    pub fn total_break_minutes(&self) -> i64 {
        self.total_minutes(ActivityLabel::Break)
    }

    /// Drop the open session without logging it.
    pub(crate) fn abandon(&mut self) -> Option<ActiveSession> {
        let session = self.active.take();
        if let Some(session) = &session {
            debug!(activity = session.activity.as_str(), "session abandoned");
        }
        session
    }

    /// Undo the most recent close: the last entry leaves the log and its
    /// session is open again. Does nothing while a session is open.
    pub(crate) fn reopen_last(&mut self) -> Option<&ActiveSession> {
        if self.active.is_some() {
            return None;
        }
        let entry = self.log.pop()?;
        self.next_id = entry.id;
        debug!(id = entry.id, "log entry reopened");
        Some(self.active.insert(ActiveSession {
            activity: entry.activity,
            started_at: entry.started_at,
            note: entry.note,
        }))
    }

    fn close_active(&mut self) -> Result<usize, ShopError> {
        let session = self
            .active
            .take()
            .ok_or_else(|| ShopError::Session("no active session".to_string()))?;

        let entry = session.close(self.next_id, self.clock.now());
        debug!(id = entry.id, "appending log entry");
        self.next_id += 1;
        self.log.push(entry);
        Ok(self.log.len() - 1)
    }
}
