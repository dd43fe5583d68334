//! Session-scoped knowledge about the hidden word.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use tracing::warn;

use super::types::{AttemptRecord, LetterFeedback, Strategy, Verdict};

/// The lowercase alphabet, in enumeration order.
pub const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// Everything learned about the hidden word during one solving session.
///
/// Knowledge only grows: determined slots are never cleared, and present,
/// absent and excluded sets are never shrunk, except that a letter reported
/// `correct` or `present` is always taken out of the absent set.
#[derive(Debug, Clone)]
pub struct ConstraintState {
    word_size: usize,
    known_slots: Vec<Option<char>>,
    present: BTreeSet<char>,
    absent: BTreeSet<char>,
    /// Slots each letter is known not to occupy.
    exclusions: BTreeMap<char, BTreeSet<usize>>,
    history: Vec<AttemptRecord>,
    tried: HashSet<String>,
}

impl ConstraintState {
    pub fn new(word_size: usize) -> Self {
        Self {
            word_size,
            known_slots: vec![None; word_size],
            present: BTreeSet::new(),
            absent: BTreeSet::new(),
            exclusions: BTreeMap::new(),
            history: Vec::new(),
            tried: HashSet::new(),
        }
    }

    pub fn word_size(&self) -> usize {
        self.word_size
    }

    /// Fold one oracle answer into the state and record the attempt.
    ///
    /// `correct` and `present` verdicts are applied before any `absent`
    /// verdict of the same guess, so a repeated letter whose extra
    /// occurrence is reported absent is never classified as absent.
    pub fn apply_verdicts(&mut self, guess: &str, verdicts: &[LetterFeedback], strategy: Strategy) {
        for feedback in verdicts.iter().filter(|f| f.verdict != Verdict::Absent) {
            let letter = feedback.letter.to_ascii_lowercase();
            if feedback.verdict == Verdict::Correct {
                self.pin(feedback.slot, letter);
            } else {
                self.present.insert(letter);
                self.exclude(letter, feedback.slot);
            }
            if self.absent.remove(&letter) {
                warn!(
                    letter = %letter,
                    "Letter previously reported absent is now in the word, dropping it from absent set"
                );
            }
        }

        for feedback in verdicts.iter().filter(|f| f.verdict == Verdict::Absent) {
            let letter = feedback.letter.to_ascii_lowercase();
            self.exclude(letter, feedback.slot);
            if !self.is_known_letter(letter) {
                self.absent.insert(letter);
            }
        }

        self.history.push(AttemptRecord {
            guess: guess.to_string(),
            verdicts: verdicts.to_vec(),
            strategy,
        });
        self.tried.insert(guess.to_string());
    }

    fn pin(&mut self, slot: usize, letter: char) {
        let Some(entry) = self.known_slots.get_mut(slot) else {
            warn!(slot, word_size = self.word_size, "Ignoring verdict for out-of-range slot");
            return;
        };
        match entry {
            Some(existing) if *existing != letter => {
                warn!(
                    slot,
                    existing = %existing,
                    reported = %letter,
                    "Conflicting correct verdict, keeping the first one"
                );
            }
            Some(_) => {}
            None => *entry = Some(letter),
        }
    }

    fn exclude(&mut self, letter: char, slot: usize) {
        if slot < self.word_size {
            self.exclusions.entry(letter).or_default().insert(slot);
        }
    }

    /// True iff every slot is determined.
    pub fn is_solved(&self) -> bool {
        self.known_slots.iter().all(Option::is_some)
    }

    /// Whether `word` may be submitted: right length, not tried yet,
    /// containing every present letter and no absent letter.
    pub fn is_candidate_valid(&self, word: &str) -> bool {
        if word.chars().count() != self.word_size || self.tried.contains(word) {
            return false;
        }
        if !self.present.iter().all(|&c| word.contains(c)) {
            return false;
        }
        !word.chars().any(|c| self.absent.contains(&c))
    }

    /// Letter known to be in the word, pinned or not.
    pub fn is_known_letter(&self, letter: char) -> bool {
        self.present.contains(&letter) || self.known_slots.contains(&Some(letter))
    }

    pub fn is_absent(&self, letter: char) -> bool {
        self.absent.contains(&letter)
    }

    /// True if `letter` is known not to occupy `slot`.
    pub fn is_excluded(&self, letter: char, slot: usize) -> bool {
        self.exclusions
            .get(&letter)
            .is_some_and(|slots| slots.contains(&slot))
    }

    /// Letter may still be tried at `slot`.
    pub fn is_allowed_at(&self, letter: char, slot: usize) -> bool {
        !self.is_absent(letter) && !self.is_excluded(letter, slot)
    }

    pub fn known_slots(&self) -> &[Option<char>] {
        &self.known_slots
    }

    pub fn unknown_slots(&self) -> Vec<usize> {
        self.known_slots
            .iter()
            .enumerate()
            .filter(|(_, l)| l.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn present_letters(&self) -> &BTreeSet<char> {
        &self.present
    }

    pub fn absent_letters(&self) -> &BTreeSet<char> {
        &self.absent
    }

    /// Present letters that are not yet pinned to any slot.
    pub fn movable_present(&self) -> Vec<char> {
        self.present
            .iter()
            .copied()
            .filter(|c| !self.known_slots.contains(&Some(*c)))
            .collect()
    }

    pub fn history(&self) -> &[AttemptRecord] {
        &self.history
    }

    pub fn last_attempt(&self) -> Option<&AttemptRecord> {
        self.history.last()
    }

    pub fn was_tried(&self, word: &str) -> bool {
        self.tried.contains(word)
    }

    /// Tried words in submission order, without repeats.
    pub fn tried_words(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.history
            .iter()
            .map(|h| h.guess.as_str())
            .filter(|g| seen.insert(*g))
            .collect()
    }

    /// Determined slots verbatim, `placeholder` everywhere else.
    pub fn partial_reconstruction(&self, placeholder: char) -> String {
        self.known_slots
            .iter()
            .map(|l| l.unwrap_or(placeholder))
            .collect()
    }

    /// The solved word, if every slot is determined.
    pub fn solution(&self) -> Option<String> {
        self.known_slots.iter().copied().collect()
    }
}
