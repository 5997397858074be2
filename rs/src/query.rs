//! Intent to query-text assembly
//!
//! Deterministic bag-of-words construction. Term order does not matter to
//! the scorer, but the exact output is fixed so the emitted query itself is
//! testable.

use crate::constants::{
    MAX_QUERY_KEYWORDS, NEGATIVE_POLARITY_THRESHOLD, NEGATIVE_SENTIMENT_TERMS,
    POSITIVE_POLARITY_THRESHOLD, POSITIVE_SENTIMENT_TERMS,
};
use crate::models::IntentRecord;

/// Build the query text for an intent: all moods, all activity types, the
/// first three keywords, then a fixed sentiment phrase when polarity is
/// decisive.
pub fn build_query(intent: &IntentRecord) -> String {
    let mut parts: Vec<&str> = Vec::new();

    parts.extend(intent.mood.iter().map(String::as_str));
    parts.extend(intent.activity_types.iter().map(String::as_str));
    parts.extend(
        intent
            .keywords
            .iter()
            .take(MAX_QUERY_KEYWORDS)
            .map(String::as_str),
    );

    if intent.sentiment.polarity > POSITIVE_POLARITY_THRESHOLD {
        parts.push(POSITIVE_SENTIMENT_TERMS);
    } else if intent.sentiment.polarity < NEGATIVE_POLARITY_THRESHOLD {
        parts.push(NEGATIVE_SENTIMENT_TERMS);
    }

    parts.join(" ")
}
