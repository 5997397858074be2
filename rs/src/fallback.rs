//! Degraded-mode ranking
//!
//! Used only when the primary scoring pipeline fails. Matches the first
//! intent mood as a case-insensitive substring of each record's mood and
//! carries flat placeholder scores that signal degraded mode to callers.

use crate::constants::FALLBACK_SCORE;
use crate::models::{ActivityRecord, IntentRecord, Recommendation};

/// Rank by direct mood-string containment only.
///
/// Falls through to the first `top_k` records when no mood matches; returns
/// an empty sequence only when the catalog itself is empty.
pub fn rank_fallback(
    intent: &IntentRecord,
    records: &[ActivityRecord],
    top_k: usize,
) -> Vec<Recommendation> {
    let mood = intent.primary_mood().to_lowercase();

    let matched: Vec<&ActivityRecord> = records
        .iter()
        .filter(|record| record.mood.to_lowercase().contains(&mood))
        .collect();

    let selected: Vec<&ActivityRecord> = if matched.is_empty() {
        records.iter().take(top_k).collect()
    } else {
        matched.into_iter().take(top_k).collect()
    };

    selected
        .into_iter()
        .map(|record| Recommendation::from_record(record, FALLBACK_SCORE, FALLBACK_SCORE))
        .collect()
}
