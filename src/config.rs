//! Generator configuration.
//!
//! All fields have defaults, so an empty document (`{}`) deserializes to
//! [`GeneratorConfig::default`].

use serde::{Deserialize, Serialize};

/// Default cap on search nodes before giving up.
pub const DEFAULT_NODE_BUDGET: u64 = 5_000_000;

/// Default soft cap on sessions of one subject per section per day.
pub const DEFAULT_MAX_SUBJECT_PER_DAY: u32 = 2;

/// Tuning knobs for timetable generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Maximum search nodes per term. `None` = unbounded.
    ///
    /// Exceeding the budget aborts the search with
    /// [`TimetableError::SearchAborted`](crate::TimetableError::SearchAborted).
    pub node_budget: Option<u64>,
    /// Soft cap on sessions of the same subject for one section on one
    /// day. Slots beyond the cap stay candidates, at lowest priority.
    pub max_subject_per_day: u32,
    /// Seed for permuting the base slot order.
    ///
    /// `None` keeps natural grid order (Mon P1, Mon P2, ...). A seed
    /// yields a different but reproducible timetable.
    pub shuffle_seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            node_budget: Some(DEFAULT_NODE_BUDGET),
            max_subject_per_day: DEFAULT_MAX_SUBJECT_PER_DAY,
            shuffle_seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the node budget.
    pub fn with_node_budget(mut self, budget: u64) -> Self {
        self.node_budget = Some(budget);
        self
    }

    /// Removes the node budget.
    pub fn unbounded(mut self) -> Self {
        self.node_budget = None;
        self
    }

    /// Sets the per-day subject soft cap.
    pub fn with_max_subject_per_day(mut self, cap: u32) -> Self {
        self.max_subject_per_day = cap;
        self
    }

    /// Sets the slot-order shuffle seed.
    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.node_budget, Some(DEFAULT_NODE_BUDGET));
        assert_eq!(config.max_subject_per_day, 2);
        assert_eq!(config.shuffle_seed, None);
    }

    #[test]
    fn test_builder() {
        let config = GeneratorConfig::new()
            .with_node_budget(10)
            .with_max_subject_per_day(1)
            .with_shuffle_seed(7);
        assert_eq!(config.node_budget, Some(10));
        assert_eq!(config.max_subject_per_day, 1);
        assert_eq!(config.shuffle_seed, Some(7));
        assert_eq!(config.unbounded().node_budget, None);
    }

    #[test]
    fn test_partial_document() {
        let config: GeneratorConfig = serde_json::from_str(r#"{ "shuffleSeed": 42 }"#).unwrap();
        assert_eq!(config.shuffle_seed, Some(42));
        assert_eq!(config.node_budget, Some(DEFAULT_NODE_BUDGET));

        let empty: GeneratorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, GeneratorConfig::default());
    }
}
