// ABOUTME: Answer normalization for the interview engine
// ABOUTME: Each heuristic lives in one named function so call sites never reimplement it

/// Tokens treated as agreement by `parse_affirmative`
const AFFIRMATIVE_TOKENS: &[&str] = &["yes", "ja", "yep", "sure", "ok"];

/// Trim an answer. Whitespace-only input is rejected.
pub fn clean_answer(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Split a multi-value answer on commas, trimming tokens and dropping empty ones
pub fn split_multi_value(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Loose boolean coercion: case-insensitive substring match against a small
/// affirmative token set. "Ja, unbedingt" is true, "Nein danke" is false.
/// A heuristic by intent; replace this function to tighten the parse.
pub fn parse_affirmative(raw: &str) -> bool {
    let lowered = raw.to_lowercase();
    AFFIRMATIVE_TOKENS
        .iter()
        .any(|token| lowered.contains(token))
}
