//! Primary ranking pipeline
//!
//! Composes cosine similarity with the hard time filter, multiplicative
//! mood/category boosts and a small seeded tie-break perturbation, then
//! selects the top-k positive scores. Errors here are recoverable: the
//! engine answers them with the fallback ranker instead of surfacing them.

use crate::constants::{CATEGORY_BOOST, MOOD_BOOST, TIE_BREAK_RANGE};
use crate::index::{FeatureIndex, IndexError};
use crate::models::{ActivityRecord, IntentRecord, Recommendation};
use crate::query::build_query;
use rand::Rng;
use thiserror::Error;

/// Recoverable ranking-pipeline errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RankingError {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error("index has {index_rows} rows but catalog has {catalog_len} records")]
    RowMismatch {
        index_rows: usize,
        catalog_len: usize,
    },
}

/// Categories boosted for a given intent activity type.
fn boosted_categories(activity_type: &str) -> &'static [&'static str] {
    match activity_type {
        "physical" => &["Fitness"],
        "mental" => &["Learning"],
        "creative" => &["Creative"],
        "social" => &["Social"],
        "wellness" => &["Wellness"],
        "outdoor" => &["Fitness", "Wellness"],
        "indoor" => &["Learning", "Creative", "Wellness"],
        _ => &[],
    }
}

/// Parse a `"min-max"` minute range. Returns `None` for unparsable input or
/// an inverted range, in which case the time filter is skipped for the
/// request.
pub fn parse_time_range(time_preference: &str) -> Option<(u32, u32)> {
    let (min, max) = time_preference.split_once('-')?;
    let min: u32 = min.trim().parse().ok()?;
    let max: u32 = max.trim().parse().ok()?;
    (min <= max).then_some((min, max))
}

/// Compose the pre-tie-break score for every catalog row:
/// similarity x time eligibility, then the mood and category boosts.
fn compose_scores(
    intent: &IntentRecord,
    records: &[ActivityRecord],
    similarities: &[f64],
) -> Vec<f64> {
    let time_range = parse_time_range(&intent.time_preference);

    records
        .iter()
        .zip(similarities.iter())
        .map(|(record, &similarity)| {
            let eligible = match time_range {
                Some((min, max)) => record.time_minutes >= min && record.time_minutes <= max,
                None => true,
            };
            if !eligible {
                return 0.0;
            }

            let mut score = similarity;

            if intent.mood.iter().any(|mood| *mood == record.mood) {
                score *= MOOD_BOOST;
            }

            // Boosts compound once per matching intent type, in intent order
            for activity_type in &intent.activity_types {
                if boosted_categories(activity_type).contains(&record.category.as_str()) {
                    score *= CATEGORY_BOOST;
                }
            }

            score
        })
        .collect()
}

/// Rank the catalog for an intent, returning at most `top_k` recommendations
/// in strictly descending score order, positive scores only.
///
/// The perturbation drawn from `rng` breaks exact ties without materially
/// reordering distinct results; it is only added to rows that are already
/// in contention, so the hard filter and the positive-score contract hold.
pub fn rank<R: Rng>(
    intent: &IntentRecord,
    records: &[ActivityRecord],
    index: &FeatureIndex,
    top_k: usize,
    rng: &mut R,
) -> Result<Vec<Recommendation>, RankingError> {
    if records.is_empty() {
        return Err(IndexError::EmptyCatalog.into());
    }
    if index.rows() != records.len() {
        return Err(RankingError::RowMismatch {
            index_rows: index.rows(),
            catalog_len: records.len(),
        });
    }

    let query_text = build_query(intent);
    let query_vector = index.project(&query_text);

    let similarities: Vec<f64> = (0..records.len())
        .map(|row| index.similarity(&query_vector, row))
        .collect();

    let mut scores = compose_scores(intent, records, &similarities);
    for score in &mut scores {
        if *score > 0.0 {
            *score += rng.random_range(0.0..TIE_BREAK_RANGE);
        }
    }

    let mut scored: Vec<(usize, f64)> = scores
        .into_iter()
        .enumerate()
        .filter(|&(_, score)| score > 0.0)
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(top_k);

    let recommendations: Vec<Recommendation> = scored
        .into_iter()
        .map(|(row, score)| Recommendation::from_record(&records[row], score, similarities[row]))
        .collect();

    tracing::debug!(
        "Ranked {} recommendations for query '{}'",
        recommendations.len(),
        query_text
    );
    Ok(recommendations)
}
