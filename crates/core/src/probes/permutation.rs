use crate::constraint::ConstraintState;

/// Every ordering of `letters`, in generation order.
///
/// The output has `letters.len()!` entries; callers must keep the input small.
pub fn permutations(letters: &[char]) -> Vec<String> {
    let mut out = Vec::new();
    permute(letters.to_vec(), &mut String::with_capacity(letters.len()), &mut out);
    out
}

fn permute(remaining: Vec<char>, prefix: &mut String, out: &mut Vec<String>) {
    if remaining.is_empty() {
        out.push(prefix.clone());
        return;
    }
    for i in 0..remaining.len() {
        let mut rest = remaining.clone();
        let next = rest.remove(i);
        prefix.push(next);
        permute(rest, prefix, out);
        prefix.pop();
    }
}

/// Whether the permutation sweep should run this round.
///
/// The last attempt must have come back all `present`, with at least two and
/// at most `max_letters` letters known present.
pub fn permutation_applicable(state: &ConstraintState, max_letters: usize) -> bool {
    let Some(last) = state.last_attempt() else {
        return false;
    };
    let count = state.present_letters().len();
    last.all_present() && count >= 2 && count <= max_letters
}

/// Permutations of the present letters that could be submitted now:
/// full word length and not tried yet.
pub fn permutation_candidates(state: &ConstraintState) -> Vec<String> {
    let letters: Vec<char> = state.present_letters().iter().copied().collect();
    permutations(&letters)
        .into_iter()
        .filter(|p| p.chars().count() == state.word_size() && !state.was_tried(p))
        .collect()
}
