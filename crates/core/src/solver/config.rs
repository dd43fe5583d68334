//! Solver configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the round-based solver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Rounds before giving up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Number of recent attempts inspected for stagnation.
    #[serde(default = "default_stagnation_window")]
    pub stagnation_window: usize,

    /// Stagnation is only declared once this many attempts are in the window.
    #[serde(default = "default_stagnation_min_entries")]
    pub stagnation_min_entries: usize,

    /// A window with at most this many distinct guesses is stagnating.
    #[serde(default = "default_stagnation_max_distinct")]
    pub stagnation_max_distinct: usize,

    /// Random candidates drawn per emergency guess.
    #[serde(default = "default_emergency_samples")]
    pub emergency_samples: usize,

    /// Probability (0.0-1.0) of filling an open slot with an unplaced
    /// present letter rather than any allowed letter.
    #[serde(default = "default_present_bias")]
    pub present_bias: f64,

    /// The permutation sweep is skipped above this many present letters.
    #[serde(default = "default_max_permutation_letters")]
    pub max_permutation_letters: usize,

    /// First guess is this letter repeated to the word length.
    #[serde(default = "default_opening_letter")]
    pub opening_letter: char,

    /// Rendered for undetermined slots in the best-guess output.
    #[serde(default = "default_placeholder")]
    pub placeholder: char,

    /// Seed for the emergency generator. Unset means seeded from the OS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,
}

fn default_max_attempts() -> u32 {
    100
}

fn default_stagnation_window() -> usize {
    5
}

fn default_stagnation_min_entries() -> usize {
    3
}

fn default_stagnation_max_distinct() -> usize {
    2
}

fn default_emergency_samples() -> usize {
    50
}

fn default_present_bias() -> f64 {
    0.7
}

fn default_max_permutation_letters() -> usize {
    7
}

fn default_opening_letter() -> char {
    'a'
}

fn default_placeholder() -> char {
    '_'
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            stagnation_window: default_stagnation_window(),
            stagnation_min_entries: default_stagnation_min_entries(),
            stagnation_max_distinct: default_stagnation_max_distinct(),
            emergency_samples: default_emergency_samples(),
            present_bias: default_present_bias(),
            max_permutation_letters: default_max_permutation_letters(),
            opening_letter: default_opening_letter(),
            placeholder: default_placeholder(),
            rng_seed: None,
        }
    }
}

/// Configuration for the batch presence probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Pads vowel chunks; must not be a vowel.
    #[serde(default = "default_vowel_filler")]
    pub vowel_filler: char,

    /// Pads consonant chunks; must not be a consonant.
    #[serde(default = "default_consonant_filler")]
    pub consonant_filler: char,
}

fn default_vowel_filler() -> char {
    'z'
}

fn default_consonant_filler() -> char {
    'e'
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            vowel_filler: default_vowel_filler(),
            consonant_filler: default_consonant_filler(),
        }
    }
}
