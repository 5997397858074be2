//! Recommendation engine facade
//!
//! Owns the catalog and the current feature index and exposes the external
//! interface: `rank`, `add_activity`, `list_activities`, `stats`. Ranking
//! never errors toward the caller; any internal pipeline failure is logged
//! and answered by the fallback ranker. Mutation is a critical section:
//! readers see either the pre-add state or the fully rebuilt one.

use crate::catalog::{CatalogError, CatalogStore};
use crate::fallback::rank_fallback;
use crate::index::FeatureIndex;
use crate::models::{ActivityRecord, IntentRecord, Recommendation, StatsSummary};
use crate::scorer;
use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Catalog records plus the index built from exactly those records.
/// Swapped as a unit so row counts never diverge.
struct EngineState {
    records: Vec<ActivityRecord>,
    index: Option<Arc<FeatureIndex>>,
}

/// The recommendation engine.
///
/// Thread-safe: concurrent `rank` calls share a read lock over the current
/// state, `add_activity` serializes behind the write lock.
pub struct Recommender {
    store: Box<dyn CatalogStore>,
    state: RwLock<EngineState>,

    /// Fixed tie-break seed for reproducible ordering; entropy-seeded when
    /// unset
    tie_break_seed: Option<u64>,
}

impl Recommender {
    /// Create an engine over the given store. Loads the catalog (the store
    /// seeds a sample set when nothing usable is persisted) and builds the
    /// initial feature index.
    pub async fn new(store: impl CatalogStore + 'static) -> crate::Result<Self> {
        let records = store.load().await.context("Failed to load catalog")?;

        let index = match FeatureIndex::build(&records) {
            Ok(index) => Some(Arc::new(index)),
            Err(e) => {
                tracing::warn!("Could not build feature index: {e}");
                None
            }
        };

        tracing::info!(
            "Recommender ready with {} activities, index {}",
            records.len(),
            if index.is_some() { "built" } else { "unavailable" }
        );

        Ok(Self {
            store: Box::new(store),
            state: RwLock::new(EngineState { records, index }),
            tie_break_seed: None,
        })
    }

    /// Fix the tie-break seed so repeated calls produce identical ordering.
    pub fn with_tie_break_seed(mut self, seed: u64) -> Self {
        self.tie_break_seed = Some(seed);
        self
    }

    fn tie_break_rng(&self) -> StdRng {
        match self.tie_break_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Rank the catalog for an intent. Never errors: any pipeline failure
    /// is logged and answered by the mood-containment fallback.
    pub async fn rank(&self, intent: &IntentRecord, top_k: usize) -> Vec<Recommendation> {
        let state = self.state.read().await;

        let index = match state.index.as_deref() {
            Some(index) => index,
            None => {
                tracing::warn!("No feature index available, using fallback ranking");
                return rank_fallback(intent, &state.records, top_k);
            }
        };

        let mut rng = self.tie_break_rng();
        match scorer::rank(intent, &state.records, index, top_k, &mut rng) {
            Ok(recommendations) => {
                tracing::info!("Generated {} recommendations", recommendations.len());
                recommendations
            }
            Err(e) => {
                tracing::warn!("Primary ranking failed: {e}, using fallback ranking");
                rank_fallback(intent, &state.records, top_k)
            }
        }
    }

    /// Add an activity to the catalog, persisting it and rebuilding the
    /// feature index before returning.
    ///
    /// Returns `false` on any failure, in which case both the catalog and
    /// the previous index are left untouched.
    pub async fn add_activity(&self, record: ActivityRecord) -> bool {
        if let Err(message) = record.validate() {
            let err = CatalogError::InvalidRecord { message };
            tracing::warn!("Rejected activity: {err}");
            return false;
        }

        let mut state = self.state.write().await;

        let mut updated = state.records.clone();
        updated.push(record.clone());

        // Build the new index first: a failed rebuild must not change
        // anything callers can observe.
        let index = match FeatureIndex::build(&updated) {
            Ok(index) => Arc::new(index),
            Err(e) => {
                tracing::warn!("Index rebuild failed, activity not added: {e}");
                return false;
            }
        };

        if let Err(e) = self.store.persist(&updated).await {
            tracing::warn!("Failed to persist catalog, activity not added: {e}");
            return false;
        }

        state.records = updated;
        state.index = Some(index);
        tracing::info!(
            "Added activity '{}', catalog now has {} records",
            record.activity,
            state.records.len()
        );
        true
    }

    /// All catalog records, verbatim.
    pub async fn list_activities(&self) -> Vec<ActivityRecord> {
        self.state.read().await.records.clone()
    }

    /// Aggregate catalog statistics, recomputed on demand.
    pub async fn stats(&self) -> StatsSummary {
        StatsSummary::from_records(&self.state.read().await.records)
    }
}
