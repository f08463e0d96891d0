//! Sorting session facade.
//!
//! A `SortSession` is the one object a renderer talks to: it wires a
//! tracker and its decay watchdog together and enforces the concurrency
//! contract. All transitions for a session, whether from an action source
//! or from the watchdog, go through one mutex and are strictly serialized;
//! reads go through the watch cell and never touch the mutex.
//!
//! The timer-versus-action race therefore resolves cleanly either way:
//! the action wins the lock and the fire lands on a superseded slot as a
//! no-op, or the fire wins and the action starts a fresh streak at 1.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use uuid::Uuid;

use crate::combo::{ComboState, ComboTracker, DecayScheduler};
use crate::config::ComboConfig;
use crate::error::ConfigError;

/// One continuous triage run: a tracker, its watchdog, and a session id.
#[derive(Debug)]
pub struct SortSession {
    id: Uuid,
    tracker: Arc<Mutex<ComboTracker>>,
    states: watch::Receiver<ComboState>,
    scheduler: DecayScheduler,
}

impl SortSession {
    /// Validate the config, build the tracker, and spawn the watchdog.
    ///
    /// Must be called within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero decay window or a malformed threshold
    /// table; no session exists if construction fails.
    pub fn start(config: ComboConfig) -> Result<Self, ConfigError> {
        let tracker = ComboTracker::new(&config)?;
        let states = tracker.subscribe();
        let tracker = Arc::new(Mutex::new(tracker));
        let scheduler = DecayScheduler::spawn(Arc::clone(&tracker));
        let id = Uuid::new_v4();
        tracing::info!(
            session = %id,
            window_ms = config.decay_window_ms,
            "sorting session started"
        );
        Ok(Self {
            id,
            tracker,
            states,
            scheduler,
        })
    }

    /// Count one sort action at `now`. Serialized with the watchdog.
    pub fn record_action(&self, now: DateTime<Utc>) -> ComboState {
        ComboTracker::lock(&self.tracker).record_action(now)
    }

    /// Clear the streak at `now`. Serialized with the watchdog.
    pub fn reset(&self, now: DateTime<Utc>) -> ComboState {
        ComboTracker::lock(&self.tracker).reset(now)
    }

    /// Snapshot of the last completed transition.
    ///
    /// Reads the watch cell directly, so it never blocks, even while an
    /// action or a fire holds the tracker lock on another thread.
    pub fn state(&self) -> ComboState {
        self.states.borrow().clone()
    }

    /// Subscription handle for push (`changed().await`) or pull
    /// (`borrow()`) consumption of published snapshots.
    pub fn subscribe(&self) -> watch::Receiver<ComboState> {
        self.states.clone()
    }

    /// Session id, for logs and diagnostics.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Tear the session down, canceling any armed decay timer.
    /// Dropping the session has the same effect, minus the log line.
    pub fn shutdown(self) {
        self.scheduler.shutdown();
        tracing::info!(session = %self.id, "sorting session closed");
    }
}
