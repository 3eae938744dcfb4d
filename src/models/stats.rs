// src/models/stats.rs

//! Crawl run statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counters collected by one worker over its shard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerReport {
    pub items: usize,
    pub catalogs: usize,
    pub skipped: usize,
    pub sections: usize,
    pub records: usize,
    pub sink_failures: usize,
}

impl WorkerReport {
    /// Add another report's counters into this one.
    pub fn merge(&mut self, other: &WorkerReport) {
        self.items += other.items;
        self.catalogs += other.catalogs;
        self.skipped += other.skipped;
        self.sections += other.sections;
        self.records += other.records;
        self.sink_failures += other.sink_failures;
    }
}

/// Summary of a complete crawl run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlStats {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub workers: usize,
    pub totals: WorkerReport,
    pub manifest_entries: usize,
}

impl CrawlStats {
    /// Wall-clock duration of the run in seconds.
    pub fn elapsed_secs(&self) -> i64 {
        (self.end_time - self.start_time).num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge() {
        let mut total = WorkerReport::default();
        total.merge(&WorkerReport {
            items: 2,
            catalogs: 1,
            skipped: 1,
            sections: 4,
            records: 10,
            sink_failures: 0,
        });
        total.merge(&WorkerReport {
            items: 1,
            catalogs: 1,
            records: 3,
            ..WorkerReport::default()
        });
        assert_eq!(total.items, 3);
        assert_eq!(total.catalogs, 2);
        assert_eq!(total.skipped, 1);
        assert_eq!(total.records, 13);
    }
}
