//! TF-IDF feature index over catalog text
//!
//! Builds a term-weighted vector representation (unigrams + bigrams, stop
//! words removed) of every record's combined text. The index is immutable
//! once built; catalog changes rebuild it from scratch and swap the whole
//! value, so readers never observe a half-built vocabulary.

use crate::constants::MAX_VOCAB_TERMS;
use crate::models::ActivityRecord;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Index construction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("cannot build an index over an empty catalog")]
    EmptyCatalog,

    #[error("no indexable terms survive tokenization and stop-wording")]
    EmptyVocabulary,
}

/// English stop words excluded from the vocabulary.
///
/// A compact version of the usual list; matches what the catalog text
/// actually contains rather than the full 300-word set.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "all", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below",
    "between", "both", "but", "by", "can", "did", "do", "does", "doing",
    "down", "during", "each", "few", "for", "from", "further", "had", "has",
    "have", "having", "he", "her", "here", "hers", "him", "his", "how", "i",
    "if", "in", "into", "is", "it", "its", "just", "me", "more", "most", "my",
    "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or",
    "other", "our", "out", "over", "own", "same", "she", "so", "some", "such",
    "than", "that", "the", "their", "them", "then", "there", "these", "they",
    "this", "those", "through", "to", "too", "under", "until", "up", "very",
    "was", "we", "were", "what", "when", "where", "which", "while", "who",
    "whom", "why", "will", "with", "you", "your", "yours",
];

/// Term-weighted vector index over a fixed set of catalog records.
///
/// Rows align one-to-one with the record sequence the index was built from.
#[derive(Debug, Clone)]
pub struct FeatureIndex {
    /// term -> column index
    vocabulary: HashMap<String, usize>,

    /// Smoothed inverse document frequency per column
    idf: Vec<f64>,

    /// One L2-normalized weight vector per record
    rows: Vec<Vec<f64>>,
}

impl FeatureIndex {
    /// Build the index from the combined text of every record.
    ///
    /// The vocabulary is capped at [`MAX_VOCAB_TERMS`]: on overflow the
    /// highest-document-frequency terms are kept, ties broken by
    /// lexicographic term order, so rebuilds of the same input are stable.
    pub fn build(records: &[ActivityRecord]) -> Result<Self, IndexError> {
        if records.is_empty() {
            return Err(IndexError::EmptyCatalog);
        }

        let documents: Vec<Vec<String>> = records
            .iter()
            .map(|record| extract_terms(&record.combined_text()))
            .collect();

        // Document frequency over all candidate terms
        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        for terms in &documents {
            let unique: HashSet<&String> = terms.iter().collect();
            for term in unique {
                *document_frequency.entry(term.clone()).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(IndexError::EmptyVocabulary);
        }

        // Cap the vocabulary deterministically, then assign columns in
        // lexicographic order so rebuilds of identical input agree.
        let mut ranked: Vec<(String, usize)> = document_frequency.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(MAX_VOCAB_TERMS);
        ranked.sort_by(|a, b| a.0.cmp(&b.0));

        let total_docs = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(ranked.len());
        let mut idf = Vec::with_capacity(ranked.len());
        for (column, (term, df)) in ranked.into_iter().enumerate() {
            vocabulary.insert(term, column);
            idf.push(((1.0 + total_docs) / (1.0 + df as f64)).ln() + 1.0);
        }

        let rows = documents
            .iter()
            .map(|terms| weigh_terms(terms, &vocabulary, &idf))
            .collect();

        Ok(Self {
            vocabulary,
            idf,
            rows,
        })
    }

    /// Project arbitrary text into the existing vocabulary space.
    ///
    /// Terms absent from the vocabulary are dropped silently; text with no
    /// overlap projects to the zero vector.
    pub fn project(&self, text: &str) -> Vec<f64> {
        let terms = extract_terms(text);
        weigh_terms(&terms, &self.vocabulary, &self.idf)
    }

    /// Cosine similarity between a projected query vector and the given row.
    ///
    /// Always in [0, 1] for the non-negative weights used here; zero-norm
    /// vectors compare as 0 rather than dividing by zero.
    pub fn similarity(&self, query: &[f64], row: usize) -> f64 {
        cosine_similarity(query, &self.rows[row])
    }

    /// Number of indexed records (rows).
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of vocabulary terms (columns).
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Lowercased alphanumeric tokens of at least two characters, stop words
/// removed.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() >= 2)
        .filter(|token| !STOP_WORDS.contains(token))
        .map(str::to_string)
        .collect()
}

/// Unigram + bigram term set of the given text.
fn extract_terms(text: &str) -> Vec<String> {
    let tokens = tokenize(text);
    let mut terms = tokens.clone();
    for pair in tokens.windows(2) {
        terms.push(format!("{} {}", pair[0], pair[1]));
    }
    terms
}

/// TF x IDF weight vector over the vocabulary, L2-normalized.
fn weigh_terms(terms: &[String], vocabulary: &HashMap<String, usize>, idf: &[f64]) -> Vec<f64> {
    let mut weights = vec![0.0; vocabulary.len()];
    for term in terms {
        if let Some(&column) = vocabulary.get(term) {
            weights[column] += idf[column];
        }
    }

    let norm = weights.iter().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for weight in &mut weights {
            *weight /= norm;
        }
    }
    weights
}

/// Cosine similarity with an explicit zero-norm guard.
fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
    }
}
