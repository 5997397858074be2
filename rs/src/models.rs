//! Core data models for the pastime recommendation engine
//!
//! These models keep JSON compatibility with the original catalog and intent
//! formats so existing data and upstream extractors keep working.

use crate::constants::{DEFAULT_MOOD, DEFAULT_TIME_PREFERENCE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One catalog entry describing a suggestible activity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityRecord {
    /// Display text describing the action
    pub activity: String,

    /// Category label (open set: Wellness, Fitness, Learning, Creative, Social, ...)
    pub category: String,

    /// Comma-separated free-text descriptors, used only as indexed text
    pub tags: String,

    /// Single free-text mood label, compared by exact or substring match
    pub mood: String,

    /// Positive duration in minutes
    pub time_minutes: u32,
}

impl ActivityRecord {
    /// Create a new activity record.
    pub fn new(
        activity: impl Into<String>,
        category: impl Into<String>,
        tags: impl Into<String>,
        mood: impl Into<String>,
        time_minutes: u32,
    ) -> Self {
        Self {
            activity: activity.into(),
            category: category.into(),
            tags: tags.into(),
            mood: mood.into(),
            time_minutes,
        }
    }

    /// The text used as the unit of vectorization: activity, category, tags
    /// and mood concatenated with spaces.
    pub fn combined_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.activity, self.category, self.tags, self.mood
        )
    }

    /// Check the catalog invariant: non-empty activity text and a positive
    /// duration. Duplicate activities are permitted, nothing else is checked.
    pub fn validate(&self) -> Result<(), String> {
        if self.activity.trim().is_empty() {
            return Err("activity text must not be empty".to_string());
        }
        if self.time_minutes == 0 {
            return Err("time_minutes must be positive".to_string());
        }
        Ok(())
    }
}

/// Sentiment analysis output carried inside an intent.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Sentiment {
    /// Polarity in [-1, 1]
    #[serde(default)]
    pub polarity: f64,

    /// Subjectivity in [0, 1]
    #[serde(default)]
    pub subjectivity: f64,
}

/// Structured summary of a user's request, produced by the upstream
/// intent extractor and consumed here.
///
/// Every field defaults so partial intents parse, and unknown fields are
/// ignored rather than rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntentRecord {
    /// Ordered mood labels detected in the input
    #[serde(default)]
    pub mood: Vec<String>,

    /// Either a "min-max" minute range or an unparsed literal
    #[serde(default = "default_time_preference")]
    pub time_preference: String,

    /// Activity type labels: physical, mental, creative, social,
    /// outdoor, indoor, wellness
    #[serde(default)]
    pub activity_types: Vec<String>,

    /// Free-text phrases extracted from the input
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Sentiment analysis of the input
    #[serde(default)]
    pub sentiment: Sentiment,

    /// Detected emotion labels (carried through, not consumed by scoring)
    #[serde(default)]
    pub emotions: Vec<String>,

    /// Urgency level: low, medium, high (carried through, not consumed by scoring)
    #[serde(default = "default_urgency")]
    pub urgency: String,
}

fn default_time_preference() -> String {
    DEFAULT_TIME_PREFERENCE.to_string()
}

fn default_urgency() -> String {
    "low".to_string()
}

impl Default for IntentRecord {
    fn default() -> Self {
        Self {
            mood: Vec::new(),
            time_preference: default_time_preference(),
            activity_types: Vec::new(),
            keywords: Vec::new(),
            sentiment: Sentiment::default(),
            emotions: Vec::new(),
            urgency: default_urgency(),
        }
    }
}

impl IntentRecord {
    /// First detected mood, or the default mood when none was detected.
    pub fn primary_mood(&self) -> &str {
        self.mood.first().map(String::as_str).unwrap_or(DEFAULT_MOOD)
    }

    /// Human-readable one-line summary of the intent.
    pub fn summary(&self) -> String {
        let mood_str = if self.mood.is_empty() {
            "neutral".to_string()
        } else {
            self.mood.join(", ")
        };
        let types_str = if self.activity_types.is_empty() {
            "general".to_string()
        } else {
            self.activity_types.join(", ")
        };

        format!(
            "Mood: {} | Time: {} minutes | Types: {} | Urgency: {}",
            mood_str, self.time_preference, types_str, self.urgency
        )
    }
}

/// A ranked catalog entry returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub activity: String,
    pub category: String,
    pub mood: String,
    pub time_minutes: u32,
    pub tags: String,

    /// Final composed ranking value (similarity x filters x boosts x tie-break)
    pub score: f64,

    /// Raw vector-space similarity before filters and boosts, kept for
    /// transparency
    pub similarity: f64,
}

impl Recommendation {
    /// Build a recommendation from a catalog record and its scores.
    pub fn from_record(record: &ActivityRecord, score: f64, similarity: f64) -> Self {
        Self {
            activity: record.activity.clone(),
            category: record.category.clone(),
            mood: record.mood.clone(),
            time_minutes: record.time_minutes,
            tags: record.tags.clone(),
            score,
            similarity,
        }
    }
}

/// Read-only aggregate view of the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatsSummary {
    pub total_activities: usize,
    pub categories: BTreeMap<String, usize>,
    pub moods: BTreeMap<String, usize>,
    pub avg_time: f64,
    pub time_range: TimeRange,
}

/// Minimum and maximum activity duration in the catalog.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeRange {
    pub min: u32,
    pub max: u32,
}

impl StatsSummary {
    /// Aggregate the given records. Recomputed on demand, never cached.
    pub fn from_records(records: &[ActivityRecord]) -> Self {
        let mut categories: BTreeMap<String, usize> = BTreeMap::new();
        let mut moods: BTreeMap<String, usize> = BTreeMap::new();

        for record in records {
            *categories.entry(record.category.clone()).or_insert(0) += 1;
            *moods.entry(record.mood.clone()).or_insert(0) += 1;
        }

        let total = records.len();
        let avg_time = if total == 0 {
            0.0
        } else {
            records.iter().map(|r| r.time_minutes as f64).sum::<f64>() / total as f64
        };
        let time_range = TimeRange {
            min: records.iter().map(|r| r.time_minutes).min().unwrap_or(0),
            max: records.iter().map(|r| r.time_minutes).max().unwrap_or(0),
        };

        Self {
            total_activities: total,
            categories,
            moods,
            avg_time,
            time_range,
        }
    }
}
