// Sprig - a small content-addressed version control engine
// Copyright (C) 2025 Sprig Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.

//! Metrics tracking for object database operations

use serde::{Deserialize, Serialize};

/// Counters kept by the object database.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OdbMetrics {
    /// Reads answered from the cache
    pub cache_hits: u64,
    /// Reads that went to storage
    pub cache_misses: u64,
    /// Objects actually written to storage
    pub unique_objects: u64,
    /// Every `put`, including ones skipped because the object existed
    pub total_writes: u64,
    /// Bytes written to storage
    pub bytes_stored: u64,
    /// Bytes handed to `put`
    pub bytes_written: u64,
}

impl OdbMetrics {
    /// Fresh zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of reads served by the cache
    pub fn hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }

    /// Writes that found the object already stored
    pub fn deduplicated_writes(&self) -> u64 {
        self.total_writes.saturating_sub(self.unique_objects)
    }

    pub(crate) fn record_cache_hit(&mut self) {
        self.cache_hits += 1;
    }

    pub(crate) fn record_cache_miss(&mut self) {
        self.cache_misses += 1;
    }

    pub(crate) fn record_write(&mut self, size: u64, is_new: bool) {
        self.total_writes += 1;
        self.bytes_written += size;
        if is_new {
            self.unique_objects += 1;
            self.bytes_stored += size;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_metrics() {
        let metrics = OdbMetrics::new();
        assert_eq!(metrics.hit_rate(), 0.0);
        assert_eq!(metrics.deduplicated_writes(), 0);
    }

    #[test]
    fn test_hit_rate() {
        let mut metrics = OdbMetrics::new();
        for _ in 0..3 {
            metrics.record_cache_hit();
        }
        metrics.record_cache_miss();
        assert_eq!(metrics.hit_rate(), 0.75);
    }

    #[test]
    fn test_record_write_duplicate() {
        let mut metrics = OdbMetrics::new();
        metrics.record_write(1000, true);
        metrics.record_write(1000, false);
        assert_eq!(metrics.total_writes, 2);
        assert_eq!(metrics.unique_objects, 1);
        assert_eq!(metrics.bytes_written, 2000);
        assert_eq!(metrics.bytes_stored, 1000);
        assert_eq!(metrics.deduplicated_writes(), 1);
    }
}
