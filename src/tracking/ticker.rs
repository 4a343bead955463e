//! Display-refresh ticker.
//!
//! A background thread that fires a callback once per interval until it is
//! cancelled. Ticks only prompt a redraw; durations never depend on them.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::ShopError;

/// Handle to a running ticker. Dropping it cancels the ticker.
#[derive(Debug)]
pub struct Ticker {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<u64>>,
}

impl Ticker {
    /// Spawn a ticker that calls `on_tick` every `interval`.
    ///
    /// The callback returns `false` to end the ticker early, e.g. when the
    /// receiving side of a channel has gone away.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Io` if the thread cannot be spawned.
    pub fn spawn<F>(interval: Duration, mut on_tick: F) -> Result<Self, ShopError>
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::Builder::new()
            .name("shopdash-ticker".to_string())
            .spawn(move || {
                let mut ticks = 0_u64;
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {
                            ticks += 1;
                            if !on_tick() {
                                break;
                            }
                        }
                        // Explicit stop, or the handle was dropped
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                ticks
            })
            .map_err(|e| ShopError::Io(format!("Failed to spawn ticker thread: {e}")))?;

        debug!(interval_ms = interval.as_millis(), "ticker started");

        Ok(Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Spawn a ticker that sends `message` into `tx` every `interval`.
    ///
    /// The ticker ends on its own once the receiver is dropped.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Io` if the thread cannot be spawned.
    pub fn to_channel<T>(interval: Duration, tx: Sender<T>, message: T) -> Result<Self, ShopError>
    where
        T: Clone + Send + 'static,
    {
        Self::spawn(interval, move || tx.send(message.clone()).is_ok())
    }

    /// Check if the ticker thread is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the ticker and wait for its thread to exit.
    ///
    /// Returns the number of ticks delivered.
    pub fn cancel(mut self) -> u64 {
        self.shutdown()
    }

    fn shutdown(&mut self) -> u64 {
        if let Some(tx) = self.stop_tx.take() {
            // The thread may already have exited; nothing to signal then.
            let _ = tx.send(());
        }

        let Some(handle) = self.handle.take() else {
            return 0;
        };

        match handle.join() {
            Ok(ticks) => {
                debug!(ticks, "ticker stopped");
                ticks
            }
            Err(_) => {
                warn!("ticker thread panicked");
                0
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
