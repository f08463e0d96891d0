use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::combo::{ComboLevel, ComboState};

/// Transition-level view of a combo state change.
/// Renderers use these to pick animations; the CLI prints them as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ComboEvent {
    /// First action from a cold meter.
    StreakStarted {
        count: u32,
        level: ComboLevel,
        at: DateTime<Utc>,
    },
    /// Action landed inside the decay window.
    StreakExtended {
        count: u32,
        level: ComboLevel,
        at: DateTime<Utc>,
    },
    /// Action broke an active streak and started over at 1
    /// (idle gap too long, or the clock went backwards).
    StreakRestarted {
        count: u32,
        level: ComboLevel,
        at: DateTime<Utc>,
    },
    /// Active streak went cold: idle decay or an explicit reset.
    StreakEnded {
        at: DateTime<Utc>,
    },
}

impl ComboEvent {
    /// Derive the event for a published state pair.
    ///
    /// Returns `None` when the pair is not a meaningful transition, e.g.
    /// a reset republished over an already-cold state.
    pub fn from_transition(prev: &ComboState, next: &ComboState) -> Option<ComboEvent> {
        let at = next.last_action_at;
        match (prev.is_active, next.is_active) {
            (false, true) => Some(ComboEvent::StreakStarted {
                count: next.count,
                level: next.level,
                at,
            }),
            (true, true) if next.count > prev.count => Some(ComboEvent::StreakExtended {
                count: next.count,
                level: next.level,
                at,
            }),
            (true, true) if next.count == 1 => Some(ComboEvent::StreakRestarted {
                count: next.count,
                level: next.level,
                at,
            }),
            (true, true) => None,
            (true, false) => Some(ComboEvent::StreakEnded { at }),
            (false, false) => None,
        }
    }

    /// Timestamp the event happened at.
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            ComboEvent::StreakStarted { at, .. }
            | ComboEvent::StreakExtended { at, .. }
            | ComboEvent::StreakRestarted { at, .. }
            | ComboEvent::StreakEnded { at } => *at,
        }
    }
}
