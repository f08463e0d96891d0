//! Heat level classification for combo streaks.
//!
//! A streak count maps to an escalating "heat" level through an ordered
//! threshold table. The mapping is pure and total: every count classifies
//! to exactly one level, and a higher count never classifies to a lower
//! level.
//!
//! ## Stock thresholds
//!
//! - **0**: None - no streak
//! - **1-4**: Normal - streak started
//! - **5-9**: Warm - picking up speed
//! - **10-19**: Hot - sustained triage
//! - **20+**: Fire - top tier
//!
//! Tables are validated once at construction; a malformed table is a
//! configuration error, never a runtime fallback.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Heat level of a combo streak, ordered from coldest to hottest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComboLevel {
    /// No active streak
    None,
    /// Streak of 1 or more
    Normal,
    Warm,
    Hot,
    /// Highest tier
    Fire,
}

impl ComboLevel {
    /// Lowercase name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            ComboLevel::None => "none",
            ComboLevel::Normal => "normal",
            ComboLevel::Warm => "warm",
            ComboLevel::Hot => "hot",
            ComboLevel::Fire => "fire",
        }
    }
}

impl fmt::Display for ComboLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a threshold table: `level` applies from `min_count` upward,
/// until the next row takes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelThreshold {
    pub min_count: u32,
    pub level: ComboLevel,
}

/// Pure count-to-level mapping backed by a validated threshold table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelClassifier {
    table: Vec<LevelThreshold>,
}

impl LevelClassifier {
    /// Build a classifier from a threshold table.
    ///
    /// # Errors
    ///
    /// Fails if the table is empty, does not classify count 0 as
    /// [`ComboLevel::None`], or has counts or levels that are not strictly
    /// increasing. Validation happens here and nowhere else; a constructed
    /// classifier is always safe to query.
    pub fn new(table: Vec<LevelThreshold>) -> Result<Self, ConfigError> {
        let Some(first) = table.first() else {
            return Err(ConfigError::EmptyThresholds);
        };
        if first.min_count != 0 {
            return Err(ConfigError::ThresholdsNotFromZero(first.min_count));
        }
        if first.level != ComboLevel::None {
            return Err(ConfigError::BaseLevelNotNone(first.level));
        }
        for pair in table.windows(2) {
            if pair[1].min_count <= pair[0].min_count {
                return Err(ConfigError::UnorderedThresholdCounts {
                    prev: pair[0].min_count,
                    next: pair[1].min_count,
                });
            }
            if pair[1].level <= pair[0].level {
                return Err(ConfigError::UnorderedThresholdLevels {
                    prev: pair[0].level,
                    next: pair[1].level,
                });
            }
        }
        Ok(Self { table })
    }

    /// The stock threshold table (see module docs).
    pub fn default_table() -> Vec<LevelThreshold> {
        vec![
            LevelThreshold { min_count: 0, level: ComboLevel::None },
            LevelThreshold { min_count: 1, level: ComboLevel::Normal },
            LevelThreshold { min_count: 5, level: ComboLevel::Warm },
            LevelThreshold { min_count: 10, level: ComboLevel::Hot },
            LevelThreshold { min_count: 20, level: ComboLevel::Fire },
        ]
    }

    /// Classify a streak count. Total: every count maps to a level.
    pub fn classify(&self, count: u32) -> ComboLevel {
        self.table
            .iter()
            .rev()
            .find(|row| row.min_count <= count)
            .map_or(ComboLevel::None, |row| row.level)
    }

    /// Rows of the validated table, lowest first.
    pub fn thresholds(&self) -> &[LevelThreshold] {
        &self.table
    }
}

impl Default for LevelClassifier {
    fn default() -> Self {
        // The stock table is known-valid, so no Result here.
        Self {
            table: Self::default_table(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_stock_table_boundaries() {
        let classifier = LevelClassifier::default();
        assert_eq!(classifier.classify(0), ComboLevel::None);
        assert_eq!(classifier.classify(1), ComboLevel::Normal);
        assert_eq!(classifier.classify(4), ComboLevel::Normal);
        assert_eq!(classifier.classify(5), ComboLevel::Warm);
        assert_eq!(classifier.classify(9), ComboLevel::Warm);
        assert_eq!(classifier.classify(10), ComboLevel::Hot);
        assert_eq!(classifier.classify(19), ComboLevel::Hot);
        assert_eq!(classifier.classify(20), ComboLevel::Fire);
        assert_eq!(classifier.classify(1000), ComboLevel::Fire);
    }

    #[test]
    fn test_levels_are_ordered() {
        assert!(ComboLevel::None < ComboLevel::Normal);
        assert!(ComboLevel::Normal < ComboLevel::Warm);
        assert!(ComboLevel::Warm < ComboLevel::Hot);
        assert!(ComboLevel::Hot < ComboLevel::Fire);
    }

    #[test]
    fn test_empty_table_rejected() {
        let err = LevelClassifier::new(vec![]).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyThresholds));
    }

    #[test]
    fn test_table_must_start_at_zero() {
        let table = vec![
            LevelThreshold { min_count: 1, level: ComboLevel::Normal },
            LevelThreshold { min_count: 5, level: ComboLevel::Warm },
        ];
        let err = LevelClassifier::new(table).unwrap_err();
        assert!(matches!(err, ConfigError::ThresholdsNotFromZero(1)));
    }

    #[test]
    fn test_count_zero_must_be_cold() {
        let table = vec![
            LevelThreshold { min_count: 0, level: ComboLevel::Normal },
            LevelThreshold { min_count: 5, level: ComboLevel::Warm },
        ];
        let err = LevelClassifier::new(table).unwrap_err();
        assert!(matches!(err, ConfigError::BaseLevelNotNone(ComboLevel::Normal)));
    }

    #[test]
    fn test_non_monotonic_counts_rejected() {
        let table = vec![
            LevelThreshold { min_count: 0, level: ComboLevel::None },
            LevelThreshold { min_count: 5, level: ComboLevel::Warm },
            LevelThreshold { min_count: 3, level: ComboLevel::Normal },
        ];
        let err = LevelClassifier::new(table).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnorderedThresholdCounts { prev: 5, next: 3 }
        ));
    }

    #[test]
    fn test_non_escalating_levels_rejected() {
        let table = vec![
            LevelThreshold { min_count: 0, level: ComboLevel::None },
            LevelThreshold { min_count: 5, level: ComboLevel::Hot },
            LevelThreshold { min_count: 10, level: ComboLevel::Warm },
        ];
        let err = LevelClassifier::new(table).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnorderedThresholdLevels {
                prev: ComboLevel::Hot,
                next: ComboLevel::Warm,
            }
        ));
    }

    #[test]
    fn test_duplicate_counts_rejected() {
        let table = vec![
            LevelThreshold { min_count: 0, level: ComboLevel::None },
            LevelThreshold { min_count: 5, level: ComboLevel::Warm },
            LevelThreshold { min_count: 5, level: ComboLevel::Hot },
        ];
        assert!(LevelClassifier::new(table).is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&ComboLevel::Fire).unwrap();
        assert_eq!(json, "\"fire\"");
        let level: ComboLevel = serde_json::from_str("\"warm\"").unwrap();
        assert_eq!(level, ComboLevel::Warm);
    }

    proptest! {
        /// A higher count never classifies to a lower level.
        #[test]
        fn prop_classification_is_monotonic(a in 0u32..1000, b in 0u32..1000) {
            let classifier = LevelClassifier::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(classifier.classify(lo) <= classifier.classify(hi));
        }

        /// Every count classifies to some level without panicking.
        #[test]
        fn prop_classification_is_total(count in any::<u32>()) {
            let classifier = LevelClassifier::default();
            let _ = classifier.classify(count);
        }
    }
}
