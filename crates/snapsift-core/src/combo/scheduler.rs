//! Idle-decay watchdog.
//!
//! A combo meter has to cool down on its own: if the user stops sorting,
//! nothing else will ever call into the tracker, so waiting for the next
//! action to notice staleness is not enough. The scheduler is a real
//! timer that forces the reset.
//!
//! ## Arming
//!
//! One watchdog task runs per session. On every published snapshot with
//! `is_active == true` it arms a single deadline at `last_action_at +
//! decay_window`; a newer snapshot supersedes the previous deadline, so
//! at most one timer is ever outstanding. Inactive snapshots leave the
//! watchdog disarmed, as does a deadline past the representable time
//! range.
//!
//! ## Firing
//!
//! A fire takes the tracker lock and re-checks that the snapshot it was
//! armed against is still current. If an action slipped in between the
//! timer firing and the lock being acquired, the fire hits a superseded
//! slot and is a no-op; the loop simply rearms from the newer snapshot.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::state::ComboState;
use super::tracker::ComboTracker;

/// Handle to a session's spawned decay watchdog.
#[derive(Debug)]
pub struct DecayScheduler {
    handle: JoinHandle<()>,
}

impl DecayScheduler {
    /// Spawn the watchdog for a shared tracker.
    ///
    /// Must be called within a tokio runtime. The task serializes with
    /// action sources through the tracker mutex, so a fire can never
    /// interleave with a half-applied action.
    pub fn spawn(tracker: Arc<Mutex<ComboTracker>>) -> Self {
        let (states, window) = {
            let guard = ComboTracker::lock(&tracker);
            (guard.subscribe(), guard.decay_window())
        };
        let handle = tokio::spawn(run(tracker, states, window));
        Self { handle }
    }

    /// Cancel the watchdog, dropping any armed timer.
    /// Session teardown calls this; `Drop` does the same.
    pub fn shutdown(&self) {
        self.handle.abort();
    }

    /// Whether the watchdog task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for DecayScheduler {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn run(
    tracker: Arc<Mutex<ComboTracker>>,
    mut states: watch::Receiver<ComboState>,
    window: chrono::Duration,
) {
    loop {
        let armed = states.borrow_and_update().clone();
        if !armed.is_active {
            if states.changed().await.is_err() {
                break;
            }
            continue;
        }

        // An unrepresentable deadline can never fire; leave the slot
        // unarmed and wait for the next snapshot.
        let deadline = match armed.last_action_at.checked_add_signed(window) {
            Some(deadline) => deadline,
            None => {
                if states.changed().await.is_err() {
                    break;
                }
                continue;
            }
        };
        let sleep_for = (deadline - Utc::now())
            .to_std()
            .unwrap_or(std::time::Duration::ZERO);

        tokio::select! {
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                // Newer snapshot published; rearm from it.
            }
            () = tokio::time::sleep(sleep_for) => {
                let mut guard = ComboTracker::lock(&tracker);
                if guard.state() == armed {
                    tracing::debug!(count = armed.count, "combo streak decayed after idle window");
                    guard.reset(Utc::now());
                } else {
                    tracing::trace!("decay timer fired on a superseded slot, ignoring");
                }
            }
        }
    }
}
