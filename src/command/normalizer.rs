//! Input normalization - raw utterance to canonical query

use crate::core::types::NormalizedQuery;

/// Sentence punctuation dropped from the end of an utterance
const TRAILING_PUNCTUATION: &[char] = &['?', '!', '.'];

/// Canonicalize an utterance: trim, drop trailing `?!.`, lower-case
///
/// Total; an all-whitespace utterance yields an empty query, which callers
/// filter out before dispatch.
pub fn normalize(utterance: &str) -> NormalizedQuery {
    let trimmed = utterance
        .trim_start()
        .trim_end_matches(|c: char| c.is_whitespace() || TRAILING_PUNCTUATION.contains(&c));
    NormalizedQuery::from_canonical(trimmed.to_lowercase())
}
