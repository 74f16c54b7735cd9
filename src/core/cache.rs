//! Analysis cache keyed by a content fingerprint
//!
//! The fingerprint covers exactly what the analyzer reads (id, creation time,
//! tags, emotions), so edits to title or visibility do not invalidate it.

use std::collections::HashMap;

use sha2::{Digest, Sha256};

use crate::core::analyzer::DreamAnalyzer;
use crate::types::{DreamAnalysis, DreamEntry};
use crate::ANALYSIS_CACHE_CAPACITY;

/// SHA-256 over the analyzed fields of every entry, in list order.
/// Every value and list is length-prefixed, so no two inputs share an encoding.
pub fn fingerprint(entries: &[DreamEntry]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update((entries.len() as u64).to_le_bytes());
    for entry in entries {
        update_field(&mut hasher, &entry.id);
        update_field(&mut hasher, &entry.created_at.to_rfc3339());
        for list in [&entry.tags, &entry.emotions] {
            hasher.update((list.len() as u64).to_le_bytes());
            for value in list {
                update_field(&mut hasher, value);
            }
        }
    }
    hasher.finalize().into()
}

fn update_field(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

/// Memoizes analyses; flushed when full
#[derive(Debug)]
pub struct AnalysisCache {
    analyzer: DreamAnalyzer,
    capacity: usize,
    entries: HashMap<[u8; 32], DreamAnalysis>,
    hits: u64,
    misses: u64,
}

impl Default for AnalysisCache {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::with_capacity(ANALYSIS_CACHE_CAPACITY)
    }

    /// Capacity of at least one analysis
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            analyzer: DreamAnalyzer::new(),
            capacity: capacity.max(1),
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Cached analysis for an equal list, or a fresh one
    pub fn get_or_analyze(&mut self, entries: &[DreamEntry]) -> DreamAnalysis {
        let key = fingerprint(entries);

        if let Some(analysis) = self.entries.get(&key) {
            self.hits += 1;
            return analysis.clone();
        }

        self.misses += 1;
        let analysis = self.analyzer.analyze(entries);

        if self.entries.len() >= self.capacity {
            tracing::debug!(capacity = self.capacity, "analysis cache full, flushing");
            self.entries.clear();
        }
        self.entries.insert(key, analysis.clone());
        analysis
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

// =============================================================================
// TESTS
// =============================================================================
