// src/pipeline/partition.rs

//! Contiguous sharding of the work list.
//!
//! Shard size is `ceil(len / divisor)` with the divisor fixed by
//! configuration, not derived from the worker count. Worker `i` owns
//! `[i * size, (i + 1) * size)` clamped to the list. When fewer workers than
//! shards are configured the tail of the list has no owner, which
//! `covers_all` reports.

use std::ops::Range;

/// Per-worker index ranges over a work list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardPlan {
    len: usize,
    shard_size: usize,
    ranges: Vec<Range<usize>>,
}

impl ShardPlan {
    /// Plan `workers` shards over `len` items.
    ///
    /// A zero `divisor` is treated as one.
    pub fn new(len: usize, divisor: usize, workers: usize) -> Self {
        let shard_size = len.div_ceil(divisor.max(1));
        let ranges = (0..workers)
            .map(|i| shard_range(i, shard_size, len))
            .collect();
        Self {
            len,
            shard_size,
            ranges,
        }
    }

    pub fn shard_size(&self) -> usize {
        self.shard_size
    }

    /// One range per worker; trailing workers may get empty ranges.
    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    /// Number of workers that have at least one item.
    pub fn busy_workers(&self) -> usize {
        self.ranges.iter().filter(|r| !r.is_empty()).count()
    }

    /// Whether every item index belongs to some worker.
    pub fn covers_all(&self) -> bool {
        self.ranges.last().map_or(self.len == 0, |r| r.end == self.len)
    }
}

/// Range of shard `index`, clamped to `len`.
pub fn shard_range(index: usize, shard_size: usize, len: usize) -> Range<usize> {
    let start = index.saturating_mul(shard_size).min(len);
    let end = index.saturating_add(1).saturating_mul(shard_size).min(len);
    start..end
}
