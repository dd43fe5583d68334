use crate::constraint::{ConstraintState, ALPHABET};

/// Candidates filling the single undetermined slot, in alphabetical order.
///
/// Returns an empty list unless exactly one slot is unknown. Absent letters,
/// already-tried words and words violating the present/absent constraints
/// are skipped.
pub fn single_unknown_candidates(state: &ConstraintState) -> Vec<String> {
    let unknown = state.unknown_slots();
    let [slot] = unknown.as_slice() else {
        return Vec::new();
    };

    ALPHABET
        .chars()
        .filter(|c| !state.is_absent(*c))
        .map(|c| {
            state
                .known_slots()
                .iter()
                .enumerate()
                .map(|(i, known)| if i == *slot { c } else { known.unwrap_or(c) })
                .collect::<String>()
        })
        .filter(|candidate| state.is_candidate_valid(candidate))
        .collect()
}
