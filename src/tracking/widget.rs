//! Tracker widget.
//!
//! Owns one [`SessionTimer`] for a job card, keeps the displayed elapsed
//! string current via a [`Ticker`], and reports time in/out to the job
//! store.

use std::sync::mpsc::Sender;
use std::time::Duration as StdDuration;

use tracing::{info, warn};

use super::activity::ActivityLabel;
use super::entry::TimeLogEntry;
use super::format::format_elapsed;
use super::ticker::Ticker;
use super::timer::SessionTimer;
use crate::config::TrackingConfig;
use crate::core::{Clock, SystemClock};
use crate::error::ShopError;
use crate::jobs::{JobStatus, JobStore};

/// Message a running widget sends once per tick interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick;

/// Elapsed display shown while idle.
pub const IDLE_DISPLAY: &str = "00:00:00";

/// Timer widget bound to the job-card store.
#[derive(Debug)]
pub struct TrackerWidget<C: Clock = SystemClock> {
    timer: SessionTimer<C>,
    tick_interval: StdDuration,
    tick_sink: Option<Sender<Tick>>,
    ticker: Option<Ticker>,
    display: String,
}

impl TrackerWidget<SystemClock> {
    /// Create a widget on the system clock using `config`.
    #[must_use]
    pub fn from_config(config: &TrackingConfig) -> Self {
        Self::new(
            SessionTimer::new().require_job(config.require_job_selection),
            StdDuration::from_millis(config.tick_interval_ms),
        )
    }
}

impl<C: Clock> TrackerWidget<C> {
    /// Wrap an existing timer.
    #[must_use]
    pub fn new(timer: SessionTimer<C>, tick_interval: StdDuration) -> Self {
        Self {
            timer,
            tick_interval,
            tick_sink: None,
            ticker: None,
            display: IDLE_DISPLAY.to_string(),
        }
    }

    /// Deliver [`Tick`]s into `tx` while a session is running.
    #[must_use]
    pub fn with_tick_sink(mut self, tx: Sender<Tick>) -> Self {
        self.tick_sink = Some(tx);
        self
    }

    /// The underlying timer.
    #[must_use]
    pub const fn timer(&self) -> &SessionTimer<C> {
        &self.timer
    }

    /// Closed entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[TimeLogEntry] {
        self.timer.entries()
    }

    /// Select the job to track. Not allowed while a session is running.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Session` while tracking is on.
    pub fn select_job(&mut self, job_id: Option<String>) -> Result<(), ShopError> {
        if self.timer.is_active() {
            return Err(ShopError::Session(
                "cannot change job while tracking".to_string(),
            ));
        }
        self.timer.set_job(job_id);
        Ok(())
    }

    /// Currently selected job id.
    #[must_use]
    pub fn selected_job(&self) -> Option<&str> {
        self.timer.job_id()
    }

    /// Whether the start controls should be enabled.
    #[must_use]
    pub fn can_start(&self) -> bool {
        self.timer.can_start()
    }

    /// Whether the pause/stop controls should be enabled.
    #[must_use]
    pub const fn can_stop(&self) -> bool {
        self.timer.can_stop()
    }

    /// Check if the refresh ticker is running.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(Ticker::is_running)
    }

    /// Elapsed time as last refreshed, HH:MM:SS.
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Start tracking `activity` and record time in on the selected job.
    ///
    /// The first start on a job sets its `time_in`; every start moves it to
    /// in progress. If the store rejects the update the session is
    /// discarded, so the timer stays idle.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Session` if tracking cannot start,
    /// `ShopError::NotFound` if the selected job is not in the store, or
    /// whatever error the store's update returns.
    pub fn start(
        &mut self,
        activity: ActivityLabel,
        store: &mut dyn JobStore,
    ) -> Result<(), ShopError> {
        // Resolve the job before opening the session so a bad id leaves the
        // timer idle.
        let card = match self.timer.job_id() {
            Some(id) if self.timer.can_start() => Some(store.job(id)?),
            _ => None,
        };

        let started_at = self.timer.start(activity)?.started_at;

        if let Some(mut card) = card {
            card.time_in.get_or_insert(started_at);
            card.status = JobStatus::InProgress;
            if let Err(err) = store.update(card) {
                self.timer.abandon();
                warn!(%err, "time in rejected by store");
                return Err(err);
            }
        }

        self.spawn_ticker();
        self.on_tick();
        Ok(())
    }

    /// Attach a note to the running session.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Session` if nothing is running.
    pub fn set_note(&mut self, note: impl Into<String>) -> Result<(), ShopError> {
        self.timer.set_note(note)
    }

    /// Close the running interval without clocking the job out.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Session` if nothing is running.
    pub fn pause(&mut self) -> Result<TimeLogEntry, ShopError> {
        let entry = self.timer.pause()?.clone();
        self.halt_display();
        Ok(entry)
    }

    /// Close the running interval and clock the selected job out.
    ///
    /// The job's `worked_minutes` becomes the sum of this widget's closed
    /// work entries, and its status becomes completed. If the job cannot be
    /// read or updated the session stays open and `stop` can be retried.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Session` if nothing is running,
    /// `ShopError::NotFound` if the selected job vanished from the store, or
    /// whatever error the store's update returns.
    pub fn stop(&mut self, store: &mut dyn JobStore) -> Result<TimeLogEntry, ShopError> {
        let card = match self.timer.job_id() {
            Some(id) if self.timer.can_stop() => Some(store.job(id)?),
            _ => None,
        };

        let out = self.timer.stop()?;

        if let Some(mut card) = card {
            card.time_out = Some(out.ended_at);
            card.worked_minutes = out.total_work_minutes;
            card.status = JobStatus::Completed;
            let job = card.id.clone();
            if let Err(err) = store.update(card) {
                self.timer.reopen_last();
                warn!(%err, job = %job, "time out rejected by store");
                return Err(err);
            }
            info!(
                job = %job,
                worked_minutes = out.total_work_minutes,
                "job clocked out"
            );
        }

        self.halt_display();
        Ok(out.entry)
    }

    /// Refresh the displayed elapsed time from the clock.
    pub fn on_tick(&mut self) {
        self.display = format_elapsed(self.timer.elapsed());
    }

    fn spawn_ticker(&mut self) {
        let Some(tx) = self.tick_sink.clone() else {
            return;
        };
        match Ticker::to_channel(self.tick_interval, tx, Tick) {
            Ok(ticker) => self.ticker = Some(ticker),
            // Display refresh is cosmetic; tracking itself continues.
            Err(err) => warn!(%err, "display refresh unavailable"),
        }
    }

    fn halt_display(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
        self.display = IDLE_DISPLAY.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;
    use crate::jobs::{InMemoryJobStore, JobCard, MockJobStore, Priority};
    use std::sync::mpsc;

    fn widget(clock: &ManualClock) -> TrackerWidget<ManualClock> {
        let timer = SessionTimer::with_clock(clock.clone()).require_job(true);
        TrackerWidget::new(timer, StdDuration::from_millis(5))
    }

    fn card(id: &str) -> JobCard {
        JobCard {
            id: id.to_string(),
            customer_id: "C-001".to_string(),
            vehicle_id: "V-101".to_string(),
            technician_id: "T-01".to_string(),
            service: "Brake pad replacement".to_string(),
            status: JobStatus::Pending,
            priority: Priority::Normal,
            time_in: None,
            time_out: None,
            worked_minutes: 0,
            notes: String::new(),
        }
    }

    #[test]
    fn test_start_requires_selected_job() {
        let clock = ManualClock::default();
        let mut widget = widget(&clock);
        let mut store = InMemoryJobStore::demo();

        assert!(!widget.can_start());
        let err = widget.start(ActivityLabel::Work, &mut store).unwrap_err();
        assert!(matches!(err, ShopError::Session(_)));
        assert!(!widget.timer().is_active());
    }

    #[test]
    fn test_start_unknown_job_leaves_timer_idle() {
        let clock = ManualClock::default();
        let mut widget = widget(&clock);
        let mut store = InMemoryJobStore::demo();

        widget.select_job(Some("JC-0000".to_string())).unwrap();
        let err = widget.start(ActivityLabel::Work, &mut store).unwrap_err();
        assert!(matches!(err, ShopError::NotFound(_)));
        assert!(!widget.timer().is_active());
    }

    #[test]
    fn test_start_records_time_in() {
        let clock = ManualClock::default();
        let mut widget = widget(&clock);
        let mut store = InMemoryJobStore::demo();

        widget.select_job(Some("JC-1001".to_string())).unwrap();
        widget.start(ActivityLabel::Work, &mut store).unwrap();

        let job = store.job("JC-1001").unwrap();
        assert_eq!(job.status, JobStatus::InProgress);
        assert_eq!(job.time_in, Some(clock.now()));
    }

    #[test]
    fn test_stop_writes_time_out_and_work_total() {
        let clock = ManualClock::default();
        let mut widget = widget(&clock);
        let mut store = InMemoryJobStore::demo();
        widget.select_job(Some("JC-1001".to_string())).unwrap();

        widget.start(ActivityLabel::Work, &mut store).unwrap();
        clock.advance_secs(5400);
        widget.pause().unwrap();

        widget.start(ActivityLabel::Break, &mut store).unwrap();
        clock.advance_secs(900);
        widget.pause().unwrap();

        widget.start(ActivityLabel::Work, &mut store).unwrap();
        clock.advance_secs(4500);
        let entry = widget.stop(&mut store).unwrap();

        assert_eq!(entry.duration_minutes, 75);
        let job = store.job("JC-1001").unwrap();
        assert_eq!(job.worked_minutes, 165);
        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.time_out, Some(clock.now()));
    }

    #[test]
    fn test_stop_updates_store_once() {
        let clock = ManualClock::default();
        let mut widget = widget(&clock);
        widget.select_job(Some("JC-7".to_string())).unwrap();

        let mut store = MockJobStore::new();
        store.expect_job().returning(|id| Ok(card(id)));
        store
            .expect_update()
            .withf(|c| c.status == JobStatus::InProgress)
            .times(1)
            .returning(|_| Ok(()));
        store
            .expect_update()
            .withf(|c| c.status == JobStatus::Completed && c.worked_minutes == 90)
            .times(1)
            .returning(|_| Ok(()));

        widget.start(ActivityLabel::Work, &mut store).unwrap();
        clock.advance_secs(5400);
        widget.stop(&mut store).unwrap();
    }

    #[test]
    fn test_start_rolls_back_when_store_rejects() {
        let clock = ManualClock::default();
        let (tx, _rx) = mpsc::channel();
        let mut widget = widget(&clock).with_tick_sink(tx);
        widget.select_job(Some("JC-7".to_string())).unwrap();

        let mut store = MockJobStore::new();
        store.expect_job().returning(|id| Ok(card(id)));
        store
            .expect_update()
            .times(1)
            .returning(|_| Err(ShopError::Io("disk full".to_string())));

        let err = widget.start(ActivityLabel::Work, &mut store).unwrap_err();
        assert!(matches!(err, ShopError::Io(_)));
        assert!(!widget.timer().is_active());
        assert!(!widget.is_ticking());
        assert!(widget.can_start());
        assert!(widget.entries().is_empty());
    }

    #[test]
    fn test_stop_lookup_failure_keeps_session_open() {
        let clock = ManualClock::default();
        let (tx, _rx) = mpsc::channel();
        let mut widget = widget(&clock).with_tick_sink(tx);
        let mut store = InMemoryJobStore::demo();
        widget.select_job(Some("JC-1001".to_string())).unwrap();
        widget.start(ActivityLabel::Work, &mut store).unwrap();
        clock.advance_secs(1800);

        let mut missing = MockJobStore::new();
        missing
            .expect_job()
            .returning(|id| Err(ShopError::NotFound(format!("job {id}"))));
        missing.expect_update().never();

        let err = widget.stop(&mut missing).unwrap_err();
        assert!(matches!(err, ShopError::NotFound(_)));
        assert!(widget.can_stop());
        assert!(widget.is_ticking());
        assert!(widget.entries().is_empty());

        let entry = widget.stop(&mut store).unwrap();
        assert_eq!(entry.duration_minutes, 30);
        assert_eq!(store.job("JC-1001").unwrap().worked_minutes, 30);
    }

    #[test]
    fn test_stop_update_failure_can_be_retried() {
        let clock = ManualClock::default();
        let mut widget = widget(&clock);
        let mut store = InMemoryJobStore::demo();
        widget.select_job(Some("JC-1001".to_string())).unwrap();
        widget.start(ActivityLabel::Work, &mut store).unwrap();
        clock.advance_secs(5400);

        let mut failing = MockJobStore::new();
        failing.expect_job().returning(|id| Ok(card(id)));
        failing
            .expect_update()
            .times(1)
            .returning(|_| Err(ShopError::Io("disk full".to_string())));

        assert!(widget.stop(&mut failing).is_err());
        assert!(widget.can_stop());
        assert!(widget.entries().is_empty());

        let entry = widget.stop(&mut store).unwrap();
        assert_eq!(entry.id, 1);
        assert_eq!(entry.duration_minutes, 90);
        assert_eq!(widget.entries().len(), 1);
        assert_eq!(store.job("JC-1001").unwrap().status, JobStatus::Completed);
    }

    #[test]
    fn test_pause_does_not_touch_store() {
        let clock = ManualClock::default();
        let mut widget = widget(&clock);
        widget.select_job(Some("JC-7".to_string())).unwrap();

        let mut store = MockJobStore::new();
        store.expect_job().returning(|id| Ok(card(id)));
        store.expect_update().times(1).returning(|_| Ok(()));

        widget.start(ActivityLabel::Break, &mut store).unwrap();
        clock.advance_secs(120);
        let entry = widget.pause().unwrap();
        assert_eq!(entry.duration_minutes, 2);
    }

    #[test]
    fn test_cannot_switch_job_while_tracking() {
        let clock = ManualClock::default();
        let mut widget = widget(&clock);
        let mut store = InMemoryJobStore::demo();

        widget.select_job(Some("JC-1001".to_string())).unwrap();
        widget.start(ActivityLabel::Work, &mut store).unwrap();

        assert!(widget.select_job(Some("JC-1002".to_string())).is_err());
        assert_eq!(widget.selected_job(), Some("JC-1001"));
    }

    #[test]
    fn test_display_follows_clock_and_resets() {
        let clock = ManualClock::default();
        let mut widget = widget(&clock);
        let mut store = InMemoryJobStore::demo();
        widget.select_job(Some("JC-1001".to_string())).unwrap();

        widget.start(ActivityLabel::Work, &mut store).unwrap();
        assert_eq!(widget.display(), "00:00:00");

        clock.advance_secs(3725);
        widget.on_tick();
        assert_eq!(widget.display(), "01:02:05");

        widget.pause().unwrap();
        assert_eq!(widget.display(), IDLE_DISPLAY);
    }

    #[test]
    fn test_ticker_runs_only_while_tracking() {
        let clock = ManualClock::default();
        let (tx, rx) = mpsc::channel();
        let mut widget = widget(&clock).with_tick_sink(tx);
        let mut store = InMemoryJobStore::demo();
        widget.select_job(Some("JC-1001".to_string())).unwrap();

        assert!(!widget.is_ticking());
        widget.start(ActivityLabel::Work, &mut store).unwrap();
        assert!(widget.is_ticking());
        rx.recv_timeout(StdDuration::from_secs(2)).unwrap();

        widget.stop(&mut store).unwrap();
        assert!(!widget.is_ticking());

        // Drain what was in flight, then nothing more arrives.
        while rx.try_recv().is_ok() {}
        std::thread::sleep(StdDuration::from_millis(30));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_dropping_widget_stops_ticker() {
        let clock = ManualClock::default();
        let (tx, rx) = mpsc::channel();
        let mut widget = widget(&clock).with_tick_sink(tx);
        let mut store = InMemoryJobStore::demo();
        widget.select_job(Some("JC-1001".to_string())).unwrap();

        widget.start(ActivityLabel::Work, &mut store).unwrap();
        rx.recv_timeout(StdDuration::from_secs(2)).unwrap();
        drop(widget);

        // Every sender is gone once the ticker thread has been joined.
        while rx.try_recv().is_ok() {}
        assert_eq!(rx.try_recv(), Err(mpsc::TryRecvError::Disconnected));
    }
}
