//! Compact textual summary of the constraint state for the language model.

use std::fmt::Write;

use crate::constraint::{ConstraintState, Verdict};

/// Instruction sent as the system message of every suggestion request.
pub const SYSTEM_PROMPT: &str =
    "You are playing Wordle. Reply with exactly one lowercase English word and nothing else.";

/// Build the suggestion prompt.
///
/// Only the most recent `history_limit` attempts are listed line by line;
/// the tried-word list always covers the whole session.
pub fn build_prompt(state: &ConstraintState, history_limit: usize) -> String {
    let size = state.word_size();
    let mut prompt = format!("Wordle {size}-letter. Next guess must be NEW and valid.\n\n");

    let history = state.history();
    let skip = history.len().saturating_sub(history_limit);
    prompt.push_str("History:\n");
    for (i, attempt) in history.iter().enumerate().skip(skip) {
        let marks: Vec<String> = attempt
            .verdicts
            .iter()
            .map(|v| {
                let mark = match v.verdict {
                    Verdict::Correct => '✓',
                    Verdict::Present => '→',
                    Verdict::Absent => '✗',
                };
                format!("{mark}{}", v.letter)
            })
            .collect();
        let _ = writeln!(prompt, "{}. \"{}\": {}", i + 1, attempt.guess, marks.join(" "));
    }

    prompt.push_str("\nKnown:\n");
    for (slot, letter) in state.known_slots().iter().enumerate() {
        if let Some(letter) = letter {
            let _ = write!(prompt, "Pos{}={} ", slot + 1, letter);
        }
    }

    let present = state.present_letters();
    if !present.is_empty() {
        let _ = write!(prompt, "Present:{} ", present.iter().collect::<String>());
    }

    let misplaced: Vec<String> = state
        .movable_present()
        .into_iter()
        .filter_map(|letter| {
            let slots: Vec<String> = (0..size)
                .filter(|&slot| state.is_excluded(letter, slot))
                .map(|slot| (slot + 1).to_string())
                .collect();
            (!slots.is_empty()).then(|| format!("{letter}≠{}", slots.join(",")))
        })
        .collect();
    if !misplaced.is_empty() {
        let _ = write!(prompt, "NotAt:{} ", misplaced.join(" "));
    }

    let absent = state.absent_letters();
    if !absent.is_empty() {
        let _ = write!(prompt, "Absent:{}", absent.iter().collect::<String>());
    }

    let _ = write!(prompt, "\nTried:{}", state.tried_words().join(","));
    let _ = write!(
        prompt,
        "\n\nRules: New word, respect above, {size} letters, English valid."
    );
    prompt.push_str("\nResponse: ONLY the word.");

    prompt
}
