//! Guess-to-answer matching engine
//!
//! This module decides whether a free-text guess refers to a canonical
//! answer phrase. Matching is case-insensitive and whitespace-trimmed and
//! accepts three progressively looser relations: exact equality, a naive
//! singular/plural tolerance, and subset-of-words coverage under a prefix
//! relation. It is a pure leaf component with no state.

/// Normalizes a phrase for comparison
///
/// Lower-cases the input and trims leading and trailing whitespace.
/// Internal whitespace is preserved; word splitting collapses it later.
///
/// # Arguments
/// * `phrase` - The raw guess or answer text
///
/// # Returns
/// * The normalized phrase
pub fn normalize(phrase: &str) -> String {
    phrase.trim().to_lowercase()
}

/// Whether two normalized phrases are equal up to one trailing `s`
///
/// This is a naive suffix rule, not morphological analysis: it accepts
/// "taco"/"tacos" in either direction but also treats "bus" as the plural
/// of "bu". That mishandling is an accepted limitation of the rule.
fn plural_tolerant_eq(a: &str, b: &str) -> bool {
    a.strip_suffix('s').is_some_and(|stem| stem == b)
        || b.strip_suffix('s').is_some_and(|stem| stem == a)
}

/// Whether one word covers another: equal, or either is a prefix of the other
fn covers(a: &str, b: &str) -> bool {
    a.starts_with(b) || b.starts_with(a)
}

/// Whether every word of `subset` is covered by some word of `superset`
///
/// Vacuously true for an empty `subset`; callers must reject empty guesses
/// before matching to avoid the degenerate match-anything case.
fn words_covered_by(subset: &str, superset: &str) -> bool {
    subset
        .split_whitespace()
        .all(|word| superset.split_whitespace().any(|other| covers(word, other)))
}

/// Decides whether a free-text guess refers to a canonical answer phrase
///
/// Both inputs are normalized first. The guess matches if any of the
/// following hold:
/// 1. the normalized strings are equal;
/// 2. they are equal after dropping a trailing `s` from either side;
/// 3. every word of one side is covered by some word of the other, where a
///    word covers another if they are equal or one is a prefix of the
///    other ("pizza" matches "pizza pie", "ice cream sundae" matches
///    "ice cream").
///
/// # Arguments
/// * `guess` - The raw text typed by the moderator
/// * `answer` - The canonical answer phrase from the board
///
/// # Returns
/// * `true` if the guess refers to the answer, `false` otherwise
pub fn matches(guess: &str, answer: &str) -> bool {
    let guess = normalize(guess);
    let answer = normalize(answer);

    if guess == answer {
        return true;
    }

    if plural_tolerant_eq(&guess, &answer) {
        return true;
    }

    words_covered_by(&guess, &answer) || words_covered_by(&answer, &guess)
}
