//! Pastime: mood-to-activity recommendation engine
//!
//! Matches a structured intent record (moods, time budget, activity types,
//! keywords, sentiment) against a small activity catalog, combining TF-IDF
//! text similarity with a hard time filter, multiplicative mood/category
//! boosts and a seeded tie-break, with a mood-containment fallback when the
//! primary pipeline fails.
//!
//! This library is the core behind upstream speech/NLP collaborators and a
//! presentation layer; it exposes exactly `rank`, `add_activity`,
//! `list_activities` and `stats`.

pub mod catalog;
pub mod constants;
pub mod engine;
pub mod fallback;
pub mod index;
pub mod models;
pub mod query;
pub mod scorer;

// Re-export main types for convenience
pub use catalog::{seed_records, CatalogError, CatalogStore, FileCatalog};
pub use engine::Recommender;
pub use index::{FeatureIndex, IndexError};
pub use models::{
    ActivityRecord, IntentRecord, Recommendation, Sentiment, StatsSummary, TimeRange,
};
pub use scorer::RankingError;

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
