//! Batch presence probe.
//!
//! A one-shot alternative to the round loop: find which letters occur by
//! probing the alphabet in word-sized chunks, then find where each of them
//! sits with a repeated-letter guess. Every guess within a phase is
//! independent, so a phase is issued as one concurrent batch and merged
//! once all of it has answered.

use std::collections::BTreeSet;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::constraint::{LetterFeedback, Strategy, Verdict};
use crate::metrics;
use crate::oracle::FeedbackOracle;

use super::config::BatchConfig;

pub const VOWELS: &str = "aeiou";
pub const CONSONANTS: &str = "bcdfghjklmnpqrstvwxyz";

/// Result of one batch probe run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Letter found at each slot, if any.
    pub slots: Vec<Option<char>>,
    /// Letters reported `correct` or `present` by some chunk guess.
    pub matched_letters: BTreeSet<char>,
    /// Guesses the oracle answered.
    pub submissions: usize,
}

impl BatchOutcome {
    /// Resolved slots in order. Unresolved slots contribute nothing.
    pub fn word(&self) -> String {
        self.slots.iter().flatten().collect()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }
}

/// One chunk guess: the submitted word and which slots carry chunk letters.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ChunkGuess {
    word: String,
    padding: usize,
}

pub struct BatchProbe {
    config: BatchConfig,
    oracle: Arc<dyn FeedbackOracle>,
}

impl BatchProbe {
    pub fn new(config: BatchConfig, oracle: Arc<dyn FeedbackOracle>) -> Self {
        Self { config, oracle }
    }

    pub async fn run(&self) -> BatchOutcome {
        let span = info_span!("batch_probe", oracle = self.oracle.name());
        self.run_inner().instrument(span).await
    }

    async fn run_inner(&self) -> BatchOutcome {
        let word_size = self.oracle.word_size();
        let mut outcome = BatchOutcome {
            slots: vec![None; word_size],
            matched_letters: BTreeSet::new(),
            submissions: 0,
        };
        if word_size == 0 {
            return outcome;
        }

        for (alphabet, filler) in [
            (VOWELS, self.config.vowel_filler),
            (CONSONANTS, self.config.consonant_filler),
        ] {
            let guesses = chunk_guesses(alphabet, word_size, filler);
            let words: Vec<String> = guesses.iter().map(|g| g.word.clone()).collect();
            let results = self.submit_all(&words).await;

            for (guess, result) in guesses.iter().zip(results) {
                let Some(verdicts) = result else { continue };
                outcome.submissions += 1;
                outcome.matched_letters.extend(
                    verdicts
                        .iter()
                        .filter(|f| f.slot >= guess.padding && f.verdict != Verdict::Absent)
                        .map(|f| f.letter),
                );
            }
        }
        info!(matched = ?outcome.matched_letters, "Letter presence resolved");

        let letters: Vec<char> = outcome.matched_letters.iter().copied().collect();
        let words: Vec<String> = letters
            .iter()
            .map(|c| c.to_string().repeat(word_size))
            .collect();
        let results = self.submit_all(&words).await;

        for (letter, result) in letters.iter().zip(results) {
            let Some(verdicts) = result else { continue };
            outcome.submissions += 1;
            for f in verdicts.iter().filter(|f| f.verdict == Verdict::Correct) {
                match outcome.slots.get_mut(f.slot) {
                    None => warn!(
                        slot = f.slot,
                        word_size,
                        letter = %letter,
                        "Feedback slot out of range, ignoring"
                    ),
                    Some(entry @ None) => *entry = Some(*letter),
                    Some(Some(existing)) => warn!(
                        slot = f.slot,
                        existing = %existing,
                        letter = %letter,
                        "Slot claimed twice, keeping first letter"
                    ),
                }
            }
        }

        info!(
            word = %outcome.word(),
            submissions = outcome.submissions,
            complete = outcome.is_complete(),
            "Batch probe finished"
        );
        outcome
    }

    /// Submit every word concurrently. Failed calls come back as `None`.
    async fn submit_all(&self, words: &[String]) -> Vec<Option<Vec<LetterFeedback>>> {
        let calls = words.iter().map(|word| async move {
            debug!(guess = %word, "Submitting batch guess");
            match self.oracle.guess(word).await {
                Ok(verdicts) => {
                    metrics::BATCH_SUBMISSIONS.inc();
                    metrics::GUESSES_SUBMITTED
                        .with_label_values(&[Strategy::Batch.as_str()])
                        .inc();
                    Some(verdicts)
                }
                Err(e) => {
                    warn!(guess = %word, error = %e, "Batch guess failed, skipping");
                    None
                }
            }
        });
        join_all(calls).await
    }
}

/// Split `alphabet` into chunks of `word_size` letters, left-padding the
/// last chunk with `filler`.
fn chunk_guesses(alphabet: &str, word_size: usize, filler: char) -> Vec<ChunkGuess> {
    let letters: Vec<char> = alphabet.chars().collect();
    letters
        .chunks(word_size)
        .map(|chunk| {
            let padding = word_size - chunk.len();
            let word = std::iter::repeat_n(filler, padding)
                .chain(chunk.iter().copied())
                .collect();
            ChunkGuess { word, padding }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::OracleError;
    use crate::testing::MockOracle;
    use async_trait::async_trait;

    /// Grades every letter correct but reports slots past the end of the word.
    struct ShiftedSlotOracle;

    #[async_trait]
    impl FeedbackOracle for ShiftedSlotOracle {
        fn name(&self) -> &str {
            "shifted"
        }

        fn word_size(&self) -> usize {
            3
        }

        async fn guess(&self, word: &str) -> Result<Vec<LetterFeedback>, OracleError> {
            Ok(word
                .chars()
                .enumerate()
                .map(|(i, c)| LetterFeedback::new(i + 5, c, Verdict::Correct))
                .collect())
        }
    }

    #[test]
    fn test_chunking() {
        let vowels = chunk_guesses(VOWELS, 5, 'z');
        assert_eq!(vowels.len(), 1);
        assert_eq!(vowels[0].word, "aeiou");
        assert_eq!(vowels[0].padding, 0);

        let consonants = chunk_guesses(CONSONANTS, 5, 'e');
        let words: Vec<&str> = consonants.iter().map(|g| g.word.as_str()).collect();
        assert_eq!(words, vec!["bcdfg", "hjklm", "npqrs", "tvwxy", "eeeez"]);
        assert_eq!(consonants[4].padding, 4);
    }

    #[test]
    fn test_chunking_pads_vowels_for_long_words() {
        let vowels = chunk_guesses(VOWELS, 6, 'z');
        assert_eq!(vowels[0].word, "zaeiou");
        assert_eq!(vowels[0].padding, 1);
    }

    #[tokio::test]
    async fn test_resolves_word() {
        let oracle = Arc::new(MockOracle::new("apart"));
        let probe = BatchProbe::new(BatchConfig::default(), oracle.clone());

        let outcome = probe.run().await;
        assert_eq!(outcome.word(), "apart");
        assert!(outcome.is_complete());
        assert_eq!(
            outcome.matched_letters,
            ['a', 'p', 'r', 't'].into_iter().collect()
        );
        // 1 vowel chunk + 5 consonant chunks + 4 letter probes
        assert_eq!(outcome.submissions, 10);
        assert!(oracle.recorded_guesses().await.contains(&"aaaaa".to_string()));
    }

    #[tokio::test]
    async fn test_filler_verdicts_ignored() {
        // 'e' pads the last consonant chunk and is in the word.
        let oracle = Arc::new(MockOracle::new("eject"));
        let outcome = BatchProbe::new(BatchConfig::default(), oracle).run().await;

        assert_eq!(outcome.word(), "eject");
        assert!(!outcome.matched_letters.contains(&'z'));
    }

    #[tokio::test]
    async fn test_failed_chunk_is_skipped() {
        let oracle = Arc::new(MockOracle::new("apart"));
        oracle.fail_on("tvwxy").await;
        let outcome = BatchProbe::new(BatchConfig::default(), oracle).run().await;

        assert!(!outcome.matched_letters.contains(&'t'));
        assert_eq!(outcome.word(), "apar");
        assert!(!outcome.is_complete());
    }

    #[tokio::test]
    async fn test_out_of_range_slots_ignored() {
        let probe = BatchProbe::new(BatchConfig::default(), Arc::new(ShiftedSlotOracle));
        let outcome = probe.run().await;

        assert_eq!(outcome.slots, vec![None; 3]);
        assert_eq!(outcome.word(), "");
        assert!(!outcome.is_complete());
        assert!(outcome.matched_letters.contains(&'a'));
    }
}
