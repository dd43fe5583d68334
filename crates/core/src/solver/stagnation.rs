use std::collections::HashSet;

use crate::constraint::AttemptRecord;

use super::config::SolverConfig;

/// Detects a run of recent guesses with too little variety.
#[derive(Debug, Clone, Copy)]
pub struct StagnationDetector {
    window: usize,
    min_entries: usize,
    max_distinct: usize,
}

impl StagnationDetector {
    pub fn new(window: usize, min_entries: usize, max_distinct: usize) -> Self {
        Self {
            window,
            min_entries,
            max_distinct,
        }
    }

    /// True if the last `window` attempts hold at least `min_entries`
    /// entries and no more than `max_distinct` distinct guesses.
    pub fn is_stagnating(&self, history: &[AttemptRecord]) -> bool {
        let recent = &history[history.len().saturating_sub(self.window)..];
        if recent.len() < self.min_entries {
            return false;
        }
        let distinct: HashSet<&str> = recent.iter().map(|a| a.guess.as_str()).collect();
        distinct.len() <= self.max_distinct
    }
}

impl From<&SolverConfig> for StagnationDetector {
    fn from(config: &SolverConfig) -> Self {
        Self::new(
            config.stagnation_window,
            config.stagnation_min_entries,
            config.stagnation_max_distinct,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Strategy;

    fn history(guesses: &[&str]) -> Vec<AttemptRecord> {
        guesses
            .iter()
            .map(|g| AttemptRecord {
                guess: g.to_string(),
                verdicts: vec![],
                strategy: Strategy::Suggestion,
            })
            .collect()
    }

    fn detector() -> StagnationDetector {
        StagnationDetector::from(&SolverConfig::default())
    }

    #[test]
    fn test_repeating_pair_stagnates() {
        assert!(detector().is_stagnating(&history(&["guess1", "guess2", "guess1"])));
    }

    #[test]
    fn test_too_few_entries() {
        assert!(!detector().is_stagnating(&history(&["guess1", "guess1"])));
        assert!(!detector().is_stagnating(&[]));
    }

    #[test]
    fn test_diverse_history() {
        assert!(!detector().is_stagnating(&history(&["alpha", "bravo", "charl"])));
    }

    #[test]
    fn test_only_window_is_inspected() {
        let h = history(&["one", "two", "three", "four", "x", "y", "x", "y", "x"]);
        assert!(detector().is_stagnating(&h));

        let h = history(&["x", "x", "x", "a", "b", "c", "d", "e"]);
        assert!(!detector().is_stagnating(&h));
    }
}
