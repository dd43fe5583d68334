//! Randomized and deterministic candidates used when no better source is available.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::constraint::{ConstraintState, ALPHABET};

use super::config::SolverConfig;

const DETERMINED_SLOT_SCORE: u32 = 2;
const PRESENT_LETTER_SCORE: u32 = 1;
const VALID_CANDIDATE_SCORE: u32 = 5;

/// Letter used when no letter is allowed in a slot.
const LAST_RESORT_LETTER: char = 'a';

/// Builds random candidates slot by slot and keeps the best untried one.
#[derive(Debug, Clone, Copy)]
pub struct EmergencyGenerator {
    samples: usize,
    present_bias: f64,
}

impl EmergencyGenerator {
    pub fn new(samples: usize, present_bias: f64) -> Self {
        Self {
            samples,
            present_bias: present_bias.clamp(0.0, 1.0),
        }
    }

    /// Best-scoring untried candidate out of `samples` draws, if any.
    pub fn generate<R: Rng + ?Sized>(&self, state: &ConstraintState, rng: &mut R) -> Option<String> {
        let mut best: Option<(u32, String)> = None;
        for _ in 0..self.samples {
            let candidate = self.sample(state, rng);
            if state.was_tried(&candidate) {
                continue;
            }
            let score = score(state, &candidate);
            if best.as_ref().is_none_or(|(s, _)| score > *s) {
                best = Some((score, candidate));
            }
        }
        best.map(|(_, word)| word)
    }

    fn sample<R: Rng + ?Sized>(&self, state: &ConstraintState, rng: &mut R) -> String {
        let movable = state.movable_present();
        let mut placed: Vec<char> = Vec::new();

        state
            .known_slots()
            .iter()
            .enumerate()
            .map(|(slot, known)| {
                if let Some(letter) = known {
                    return *letter;
                }

                let present_pool: Vec<char> = movable
                    .iter()
                    .copied()
                    .filter(|c| !placed.contains(c) && state.is_allowed_at(*c, slot))
                    .collect();
                let pick = if !present_pool.is_empty() && rng.random_bool(self.present_bias) {
                    present_pool.choose(rng).copied()
                } else {
                    let pool: Vec<char> = ALPHABET
                        .chars()
                        .filter(|c| state.is_allowed_at(*c, slot))
                        .collect();
                    pool.choose(rng).copied()
                };

                let letter = pick.unwrap_or(LAST_RESORT_LETTER);
                if movable.contains(&letter) {
                    placed.push(letter);
                }
                letter
            })
            .collect()
    }
}

impl From<&SolverConfig> for EmergencyGenerator {
    fn from(config: &SolverConfig) -> Self {
        Self::new(config.emergency_samples, config.present_bias)
    }
}

fn score(state: &ConstraintState, candidate: &str) -> u32 {
    let determined = state
        .known_slots()
        .iter()
        .zip(candidate.chars())
        .filter(|(known, c)| **known == Some(*c))
        .count() as u32;
    let present = state
        .movable_present()
        .iter()
        .filter(|c| candidate.contains(**c))
        .count() as u32;
    let valid = if state.is_candidate_valid(candidate) {
        VALID_CANDIDATE_SCORE
    } else {
        0
    };
    determined * DETERMINED_SLOT_SCORE + present * PRESENT_LETTER_SCORE + valid
}

/// Deterministic candidate: determined slots verbatim, unplaced present
/// letters where allowed, then the first allowed letter of the alphabet.
///
/// If that word was already tried, the first open slot is varied until an
/// untried word turns up. When nothing untried exists the word is returned
/// anyway.
pub fn deterministic_fallback(state: &ConstraintState) -> String {
    let movable = state.movable_present();
    let mut placed: Vec<char> = Vec::new();

    let mut letters: Vec<char> = state
        .known_slots()
        .iter()
        .enumerate()
        .map(|(slot, known)| {
            if let Some(letter) = known {
                return *letter;
            }
            if let Some(&letter) = movable
                .iter()
                .find(|c| !placed.contains(*c) && state.is_allowed_at(**c, slot))
            {
                placed.push(letter);
                return letter;
            }
            ALPHABET
                .chars()
                .find(|c| state.is_allowed_at(*c, slot))
                .unwrap_or(LAST_RESORT_LETTER)
        })
        .collect();

    let word: String = letters.iter().collect();
    if !state.was_tried(&word) {
        return word;
    }

    if let Some(&slot) = state.unknown_slots().first() {
        for letter in ALPHABET.chars().filter(|c| !state.is_absent(*c)) {
            letters[slot] = letter;
            let variant: String = letters.iter().collect();
            if !state.was_tried(&variant) {
                return variant;
            }
        }
    }

    word
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::{LetterFeedback, Strategy, Verdict};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn apply(state: &mut ConstraintState, word: &str, verdicts: &str) {
        let feedback: Vec<_> = word
            .chars()
            .zip(verdicts.chars())
            .enumerate()
            .map(|(slot, (letter, v))| {
                let verdict = match v {
                    'c' => Verdict::Correct,
                    'p' => Verdict::Present,
                    _ => Verdict::Absent,
                };
                LetterFeedback::new(slot, letter, verdict)
            })
            .collect();
        state.apply_verdicts(word, &feedback, Strategy::Suggestion);
    }

    fn planet_state() -> ConstraintState {
        // Hidden word "planet".
        let mut state = ConstraintState::new(6);
        apply(&mut state, "aaaaaa", "aacaaa");
        apply(&mut state, "ontxey", "appaca");
        state
    }

    #[test]
    fn test_generated_candidate_respects_constraints() {
        let state = planet_state();
        let generator = EmergencyGenerator::from(&SolverConfig::default());
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..20 {
            let word = generator.generate(&state, &mut rng).unwrap();
            assert_eq!(word.len(), 6);
            assert_eq!(word.chars().nth(2), Some('a'));
            assert_eq!(word.chars().nth(4), Some('e'));
            assert!(!state.was_tried(&word));
            for absent in state.absent_letters() {
                assert!(!word.contains(*absent), "{word} contains absent {absent}");
            }
        }
    }

    #[test]
    fn test_generated_candidate_avoids_excluded_slots() {
        let state = planet_state();
        let generator = EmergencyGenerator::new(50, 1.0);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let word = generator.generate(&state, &mut rng).unwrap();
            // 'n' was reported present at slot 1, 't' at slot 2.
            assert_ne!(word.chars().nth(1), Some('n'));
            assert!(word.contains('n'));
        }
    }

    #[test]
    fn test_same_seed_same_candidate() {
        let state = planet_state();
        let generator = EmergencyGenerator::from(&SolverConfig::default());
        let a = generator.generate(&state, &mut StdRng::seed_from_u64(1));
        let b = generator.generate(&state, &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_samples_yields_nothing() {
        let generator = EmergencyGenerator::new(0, 0.7);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(generator.generate(&ConstraintState::new(5), &mut rng).is_none());
    }

    #[test]
    fn test_deterministic_fallback_places_present_letters() {
        let state = planet_state();
        let word = deterministic_fallback(&state);
        assert_eq!(word.len(), 6);
        assert!(word.contains('n'));
        assert_eq!(&word[2..3], "a");
        assert_eq!(&word[4..5], "e");
        assert!(state.is_candidate_valid(&word));
    }

    #[test]
    fn test_deterministic_fallback_varies_tried_word() {
        let mut state = ConstraintState::new(2);
        apply(&mut state, "ab", "ca");
        let first = deterministic_fallback(&state);
        assert_eq!(first, "aa");
        apply(&mut state, "aa", "ca");
        let second = deterministic_fallback(&state);
        assert_ne!(second, "aa");
        assert!(!state.was_tried(&second));
    }

    #[test]
    fn test_deterministic_fallback_degrades_when_nothing_allowed() {
        let mut state = ConstraintState::new(1);
        for letter in ALPHABET.chars() {
            let word = letter.to_string();
            apply(&mut state, &word, "a");
        }
        assert_eq!(deterministic_fallback(&state), "a");
    }
}
