//! Constants for the pastime recommendation engine
//!
//! Scoring multipliers and defaults match the original content-based
//! filtering implementation.

// Feature index parameters

/// Maximum number of terms retained in the TF-IDF vocabulary.
/// On overflow the highest-document-frequency terms are kept.
pub const MAX_VOCAB_TERMS: usize = 5000;

// Query building parameters

/// Only the first N intent keywords contribute to the query text.
pub const MAX_QUERY_KEYWORDS: usize = 3;

/// Polarity above this threshold appends the positive sentiment terms.
pub const POSITIVE_POLARITY_THRESHOLD: f64 = 0.1;

/// Polarity below this threshold appends the calming sentiment terms.
pub const NEGATIVE_POLARITY_THRESHOLD: f64 = -0.1;

/// Query terms appended for positive sentiment.
pub const POSITIVE_SENTIMENT_TERMS: &str = "positive happy";

/// Query terms appended for negative sentiment.
pub const NEGATIVE_SENTIMENT_TERMS: &str = "calm relaxing peaceful";

// Score composition parameters

/// Multiplier applied when a record's mood exactly matches an intent mood.
pub const MOOD_BOOST: f64 = 1.3;

/// Multiplier applied once per intent activity type whose mapped
/// categories include the record's category.
pub const CATEGORY_BOOST: f64 = 1.2;

/// Upper bound (exclusive) of the additive tie-break perturbation.
pub const TIE_BREAK_RANGE: f64 = 0.01;

// Fallback ranking parameters

/// Flat placeholder score carried by every degraded-mode recommendation.
pub const FALLBACK_SCORE: f64 = 0.5;

// Intent defaults

/// Mood assumed when the intent carries none.
pub const DEFAULT_MOOD: &str = "relaxed";

/// Time preference assumed when the intent carries none.
pub const DEFAULT_TIME_PREFERENCE: &str = "30-60";

/// Default number of recommendations returned by the CLI.
pub const DEFAULT_TOP_K: usize = 5;
