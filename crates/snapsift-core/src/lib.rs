//! # Snapsift Core Library
//!
//! This library provides the combo scoring engine for the Snapsift
//! photo-triage app. It implements an engine-first philosophy: every combo
//! rule (counting, heat classification, idle decay) lives here, and
//! renderers are thin layers that feed sort actions in and subscribe to
//! the resulting state. The CLI binary drives the same engine for
//! scripting and debugging.
//!
//! ## Architecture
//!
//! - **Combo Tracker**: A wall-clock-based state machine; callers pass
//!   `now` into every transition, so the counting rules are deterministic
//! - **Decay Scheduler**: A per-session watchdog timer that clears idle
//!   streaks without relying on any renderer frame clock
//! - **Sort Session**: Facade that serializes actions and watchdog fires
//!   through one lock and publishes atomic state snapshots
//! - **Config**: TOML-based configuration, validated at construction
//!
//! ## Key Components
//!
//! - [`ComboTracker`]: Authoritative streak state machine
//! - [`LevelClassifier`]: Validated count-to-level threshold table
//! - [`DecayScheduler`]: Idle-decay watchdog
//! - [`SortSession`]: Per-session wiring and concurrency contract

pub mod combo;
pub mod config;
pub mod error;
pub mod events;
pub mod session;

pub use combo::{ComboLevel, ComboState, ComboTracker, DecayScheduler, LevelClassifier, LevelThreshold};
pub use config::ComboConfig;
pub use error::{ConfigError, Result};
pub use events::ComboEvent;
pub use session::SortSession;
