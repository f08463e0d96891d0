//! Combo tracker implementation.
//!
//! The tracker is a wall-clock-based state machine and the single
//! authority over one session's combo streak. It does not read the clock
//! itself; callers pass `now` into every transition, which keeps the
//! counting rules deterministic and directly testable.
//!
//! ## Counting rule
//!
//! ```text
//! record_action(now):
//!   streak continues  if active and 0 <= now - last_action_at <= window
//!   streak restarts   otherwise (first action, window expired, clock skew)
//! ```
//!
//! A backwards clock is deliberately not an error: the user did act, so
//! the action counts, just as the start of a fresh streak.
//!
//! ## Publication
//!
//! State lives in a tokio `watch` cell, so every transition is an atomic
//! replacement of the whole snapshot. Readers and subscribers always see
//! the last *completed* transition, never a torn update. Calls that
//! mutate (`record_action`, `reset`) take `&mut self`; wrap the tracker
//! in a mutex to serialize concurrent sources (see `SortSession`).

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::watch;

use super::level::LevelClassifier;
use super::state::ComboState;
use crate::config::ComboConfig;
use crate::error::ConfigError;

/// Authoritative combo state machine for one sorting session.
#[derive(Debug)]
pub struct ComboTracker {
    classifier: LevelClassifier,
    decay_window: Duration,
    states: watch::Sender<ComboState>,
}

impl ComboTracker {
    /// Build a tracker from a config, validating it.
    ///
    /// # Errors
    ///
    /// Returns an error for an out-of-range decay window or a malformed
    /// threshold table. Nothing is constructed from a bad config.
    pub fn new(config: &ComboConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let classifier = LevelClassifier::new(config.thresholds.clone())?;
        let (states, _) = watch::channel(ComboState::initial());
        Ok(Self {
            classifier,
            decay_window: config.decay_window(),
            states,
        })
    }

    /// Count one sort action at `now` and publish the new snapshot.
    ///
    /// Keep and discard actions count the same; asymmetric scoring is a
    /// product decision that has not been made, so the tracker takes no
    /// outcome parameter.
    pub fn record_action(&mut self, now: DateTime<Utc>) -> ComboState {
        let prev = self.states.borrow().clone();
        let continues = prev.is_active && {
            let elapsed = now.signed_duration_since(prev.last_action_at);
            elapsed >= Duration::zero() && elapsed <= self.decay_window
        };
        let count = if continues { prev.count.saturating_add(1) } else { 1 };
        let next = ComboState {
            count,
            level: self.classifier.classify(count),
            is_active: true,
            last_action_at: now,
        };
        self.states.send_replace(next.clone());
        next
    }

    /// Clear the streak at `now` and publish the cold snapshot.
    ///
    /// Idempotent: resetting an already-inactive tracker just republishes
    /// the cold shape with a fresh timestamp.
    pub fn reset(&mut self, now: DateTime<Utc>) -> ComboState {
        let next = ComboState::cleared(now);
        self.states.send_replace(next.clone());
        next
    }

    /// Snapshot of the last completed transition. Never blocks.
    pub fn state(&self) -> ComboState {
        self.states.borrow().clone()
    }

    /// Subscribe to published snapshots: `borrow()` polls the latest,
    /// `changed().await` waits for the next one.
    pub fn subscribe(&self) -> watch::Receiver<ComboState> {
        self.states.subscribe()
    }

    /// Decay window this tracker was built with.
    pub fn decay_window(&self) -> Duration {
        self.decay_window
    }

    /// Lock a shared tracker, recovering from a poisoned mutex.
    ///
    /// Tracker transitions are pure arithmetic and cannot leave the state
    /// half-written, so a guard from a poisoned lock is still coherent.
    pub(crate) fn lock(shared: &Mutex<Self>) -> MutexGuard<'_, Self> {
        shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
