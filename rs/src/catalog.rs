//! File-based catalog storage
//!
//! Persists the activity catalog as a single JSON document and seeds a
//! built-in sample set when no usable catalog is found, so the engine is
//! never empty.

use crate::models::ActivityRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Catalog-specific errors
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid activity record: {message}")]
    InvalidRecord { message: String },
}

/// Persisted catalog document shape.
#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    saved_at: DateTime<Utc>,
    activities: Vec<ActivityRecord>,
}

/// Storage backend for the activity catalog.
///
/// Abstracts over where the catalog lives; the engine owns the in-memory
/// record set and calls back here for durability.
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// Load the persisted catalog. Implementations must return a non-empty
    /// record set, falling back to the built-in seed when nothing usable
    /// is found.
    async fn load(&self) -> Result<Vec<ActivityRecord>, CatalogError>;

    /// Persist the full record set, replacing any previous content.
    async fn persist(&self, records: &[ActivityRecord]) -> Result<(), CatalogError>;
}

/// File-based catalog store.
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    /// Create a store backed by the given JSON file. The file does not need
    /// to exist yet; a missing catalog loads as the seed set.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Parse catalog content, accepting both the document shape and a bare
    /// array of records (legacy files).
    fn parse(content: &str) -> Result<Vec<ActivityRecord>, CatalogError> {
        match serde_json::from_str::<CatalogFile>(content) {
            Ok(file) => Ok(file.activities),
            Err(_) => Ok(serde_json::from_str::<Vec<ActivityRecord>>(content)?),
        }
    }
}

#[async_trait::async_trait]
impl CatalogStore for FileCatalog {
    async fn load(&self) -> Result<Vec<ActivityRecord>, CatalogError> {
        if !self.path.exists() {
            tracing::warn!(
                "Catalog file {} not found, seeding sample activities",
                self.path.display()
            );
            return Ok(seed_records());
        }

        let content = fs::read_to_string(&self.path).await?;
        match Self::parse(&content) {
            Ok(records) if !records.is_empty() => {
                tracing::info!(
                    "Loaded {} activities from {}",
                    records.len(),
                    self.path.display()
                );
                Ok(records)
            }
            Ok(_) => {
                tracing::warn!(
                    "Catalog file {} is empty, seeding sample activities",
                    self.path.display()
                );
                Ok(seed_records())
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse catalog file {}: {}, seeding sample activities",
                    self.path.display(),
                    e
                );
                Ok(seed_records())
            }
        }
    }

    async fn persist(&self, records: &[ActivityRecord]) -> Result<(), CatalogError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }

        let file = CatalogFile {
            saved_at: Utc::now(),
            activities: records.to_vec(),
        };
        let content = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, content).await?;
        Ok(())
    }
}

/// Built-in sample catalog, one Learning record and four Wellness records.
pub fn seed_records() -> Vec<ActivityRecord> {
    vec![
        ActivityRecord::new(
            "Take a 10-minute walk in nature",
            "Wellness",
            "nature, walking, outdoor, peaceful",
            "calm",
            10,
        ),
        ActivityRecord::new(
            "Practice deep breathing exercises",
            "Wellness",
            "relaxation, breathing, calm, mindfulness",
            "relaxed",
            15,
        ),
        ActivityRecord::new(
            "Listen to calming music",
            "Wellness",
            "music, relaxation, peaceful, audio",
            "peaceful",
            30,
        ),
        ActivityRecord::new(
            "Do light stretching",
            "Wellness",
            "flexibility, gentle, movement, body",
            "calm",
            20,
        ),
        ActivityRecord::new(
            "Read a book",
            "Learning",
            "reading, quiet, learning, literature",
            "curious",
            45,
        ),
    ]
}
