mod level;
mod scheduler;
mod state;
mod tracker;

pub use level::{ComboLevel, LevelClassifier, LevelThreshold};
pub use scheduler::DecayScheduler;
pub use state::ComboState;
pub use tracker::ComboTracker;
