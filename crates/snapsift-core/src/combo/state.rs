//! Combo state snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::level::ComboLevel;

/// Immutable snapshot of one session's combo streak.
///
/// Trackers never mutate a snapshot in place; every transition publishes a
/// whole new value, so readers always see a coherent `(count, level,
/// is_active, last_action_at)` tuple from a completed transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboState {
    /// Consecutive sort actions in the current streak.
    pub count: u32,
    /// Heat level classified from `count`.
    pub level: ComboLevel,
    /// Whether a streak is currently running.
    pub is_active: bool,
    /// Timestamp of the most recent action (or of the reset that cleared
    /// the streak). `UNIX_EPOCH` before the first action of a session.
    pub last_action_at: DateTime<Utc>,
}

impl ComboState {
    /// State of a freshly started session: nothing counted yet.
    pub fn initial() -> Self {
        Self {
            count: 0,
            level: ComboLevel::None,
            is_active: false,
            last_action_at: DateTime::UNIX_EPOCH,
        }
    }

    /// State after a reset at `now`: streak gone, meter cold.
    pub fn cleared(now: DateTime<Utc>) -> Self {
        Self {
            count: 0,
            level: ComboLevel::None,
            is_active: false,
            last_action_at: now,
        }
    }
}

impl Default for ComboState {
    fn default() -> Self {
        Self::initial()
    }
}
