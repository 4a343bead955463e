//! Application state for the TUI.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crate::auth::{Authenticator, Operator};
use crate::config::{Config, TrackingConfig};
use crate::core::{Clock, SystemClock};
use crate::error::ShopError;
use crate::jobs::{InMemoryJobStore, JobCard, JobStore};
use crate::tracking::{ActivityLabel, SessionTimer, Tick, TrackerWidget};

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Credentials form.
    Login,
    /// Job board with the tracker panel.
    Board,
}

/// Focused login field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

/// Login form contents.
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    pub error: Option<String>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            focus: LoginField::Username,
            error: None,
        }
    }
}

/// Application state.
pub struct App<C: Clock + Clone = SystemClock> {
    store: InMemoryJobStore,
    auth: Authenticator,
    tracking: TrackingConfig,
    clock: C,
    /// Current screen.
    pub screen: Screen,
    /// Login form state.
    pub login: LoginForm,
    /// Logged-in operator.
    pub operator: Option<Operator>,
    /// Job board snapshot.
    pub jobs: Vec<JobCard>,
    /// Currently selected index.
    pub selected: usize,
    /// One tracker per job card that has been tracked.
    trackers: HashMap<String, TrackerWidget<C>>,
    tick_tx: Sender<Tick>,
    tick_rx: Receiver<Tick>,
    /// Status message to display.
    pub status: Option<String>,
    /// Pending 'g' key for 'gg' command.
    pub pending_g: bool,
}

impl App<SystemClock> {
    /// Create a new app on the system clock.
    #[must_use]
    pub fn new(store: InMemoryJobStore, config: &Config) -> Self {
        Self::with_clock(store, config, SystemClock)
    }
}

impl<C: Clock + Clone> App<C> {
    /// Create a new app whose trackers read `clock`.
    #[must_use]
    pub fn with_clock(store: InMemoryJobStore, config: &Config, clock: C) -> Self {
        let (tick_tx, tick_rx) = mpsc::channel();
        let jobs = store.jobs();

        Self {
            store,
            auth: Authenticator::new(&config.login),
            tracking: config.tracking.clone(),
            clock,
            screen: Screen::Login,
            login: LoginForm::default(),
            operator: None,
            jobs,
            selected: 0,
            trackers: HashMap::new(),
            tick_tx,
            tick_rx,
            status: None,
            pending_g: false,
        }
    }

    /// Type a character into the focused login field.
    pub fn login_input(&mut self, c: char) {
        match self.login.focus {
            LoginField::Username => self.login.username.push(c),
            LoginField::Password => self.login.password.push(c),
        }
    }

    /// Delete the last character of the focused login field.
    pub fn login_backspace(&mut self) {
        match self.login.focus {
            LoginField::Username => self.login.username.pop(),
            LoginField::Password => self.login.password.pop(),
        };
    }

    /// Move focus to the other login field.
    pub fn login_toggle_field(&mut self) {
        self.login.focus = match self.login.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    /// Check the entered credentials and open the board on success.
    ///
    /// A rejected login stays on the form with the password cleared.
    pub fn submit_login(&mut self) {
        match self.auth.login(&self.login.username, &self.login.password) {
            Ok(operator) => {
                self.status = Some(format!("Welcome, {}", operator.display_name));
                self.operator = Some(operator);
                self.login = LoginForm::default();
                self.screen = Screen::Board;
            }
            Err(e) => {
                self.login.password.clear();
                self.login.focus = LoginField::Password;
                self.login.error = Some(e.to_string());
                self.status = None;
            }
        }
    }

    /// Reload the board from the store.
    pub fn refresh(&mut self) {
        self.jobs = self.store.jobs();

        // Adjust selection if it's out of bounds
        if !self.jobs.is_empty() && self.selected >= self.jobs.len() {
            self.selected = self.jobs.len() - 1;
        }
    }

    /// Get the currently selected job card.
    #[must_use]
    pub fn selected_job(&self) -> Option<&JobCard> {
        self.jobs.get(self.selected)
    }

    /// Tracker for the selected job, if one exists yet.
    #[must_use]
    pub fn selected_tracker(&self) -> Option<&TrackerWidget<C>> {
        self.selected_job().and_then(|job| self.trackers.get(&job.id))
    }

    /// Whether start keys do anything for the selected job.
    #[must_use]
    pub fn can_start_selected(&self) -> bool {
        self.selected_job().is_some() && self.selected_tracker().map_or(true, TrackerWidget::can_start)
    }

    /// Whether pause and stop keys do anything for the selected job.
    #[must_use]
    pub fn can_stop_selected(&self) -> bool {
        self.selected_tracker().is_some_and(TrackerWidget::can_stop)
    }

    /// Activity the plain start key begins.
    #[must_use]
    pub const fn default_activity(&self) -> ActivityLabel {
        self.tracking.default_activity
    }

    /// Number of jobs with a running session.
    #[must_use]
    pub fn running_count(&self) -> usize {
        self.trackers.values().filter(|w| w.can_stop()).count()
    }

    /// Start `activity` on the selected job.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Session` if a session is already running for the
    /// job, or a store error if the job cannot be updated.
    pub fn start_selected(&mut self, activity: ActivityLabel) -> Result<(), ShopError> {
        let Some(job_id) = self.selected_job().map(|j| j.id.clone()) else {
            return Err(ShopError::Session("no job selected".to_string()));
        };

        let widget = match self.trackers.entry(job_id.clone()) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                let timer = SessionTimer::with_clock(self.clock.clone())
                    .require_job(self.tracking.require_job_selection);
                let mut widget = TrackerWidget::new(
                    timer,
                    Duration::from_millis(self.tracking.tick_interval_ms),
                )
                .with_tick_sink(self.tick_tx.clone());
                widget.select_job(Some(job_id.clone()))?;
                e.insert(widget)
            }
        };

        widget.start(activity, &mut self.store)?;
        self.status = Some(format!("{job_id}: {activity} started"));
        self.refresh();
        Ok(())
    }

    /// Pause the selected job's session.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Session` if nothing is running for the job.
    pub fn pause_selected(&mut self) -> Result<(), ShopError> {
        let (job_id, widget) = self.selected_tracker_mut()?;
        let entry = widget.pause()?;
        self.status = Some(format!(
            "{job_id}: {} paused after {} min",
            entry.activity, entry.duration_minutes
        ));
        Ok(())
    }

    /// Stop the selected job's session and clock the job out.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Session` if nothing is running for the job.
    pub fn stop_selected(&mut self) -> Result<(), ShopError> {
        let Some(job_id) = self.selected_job().map(|j| j.id.clone()) else {
            return Err(ShopError::Session("no job selected".to_string()));
        };
        let widget = self
            .trackers
            .get_mut(&job_id)
            .ok_or_else(|| ShopError::Session("no active session".to_string()))?;

        widget.stop(&mut self.store)?;
        let worked = widget.timer().total_work_minutes();
        self.status = Some(format!("{job_id}: clocked out, {worked} min worked"));
        self.refresh();
        Ok(())
    }

    /// Consume pending ticks and refresh running displays.
    ///
    /// Returns how many ticks were consumed.
    pub fn drain_ticks(&mut self) -> usize {
        let mut ticks = 0;
        while self.tick_rx.try_recv().is_ok() {
            ticks += 1;
        }
        if ticks > 0 {
            self.refresh_displays();
        }
        ticks
    }

    /// Recompute the elapsed display of every running tracker.
    pub fn refresh_displays(&mut self) {
        for widget in self.trackers.values_mut().filter(|w| w.can_stop()) {
            widget.on_tick();
        }
    }

    /// Move selection up.
    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
        self.pending_g = false;
    }

    /// Move selection down.
    pub fn select_next(&mut self) {
        if !self.jobs.is_empty() && self.selected < self.jobs.len() - 1 {
            self.selected += 1;
        }
        self.pending_g = false;
    }

    /// Jump to first item.
    pub fn select_first(&mut self) {
        self.selected = 0;
        self.pending_g = false;
    }

    /// Jump to last item.
    pub fn select_last(&mut self) {
        if !self.jobs.is_empty() {
            self.selected = self.jobs.len() - 1;
        }
        self.pending_g = false;
    }

    /// Handle 'g' key for 'gg' command.
    pub fn handle_g(&mut self) {
        if self.pending_g {
            self.select_first();
        } else {
            self.pending_g = true;
            self.status = Some("g-".to_string());
        }
    }

    /// Cancel pending 'g' command.
    pub fn cancel_pending(&mut self) {
        self.pending_g = false;
        self.status = None;
    }

    fn selected_tracker_mut(&mut self) -> Result<(String, &mut TrackerWidget<C>), ShopError> {
        let job_id = self
            .jobs
            .get(self.selected)
            .map(|j| j.id.clone())
            .ok_or_else(|| ShopError::Session("no job selected".to_string()))?;
        let widget = self
            .trackers
            .get_mut(&job_id)
            .ok_or_else(|| ShopError::Session("no active session".to_string()))?;
        Ok((job_id, widget))
    }
}
