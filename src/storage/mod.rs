//! Storage abstractions for record persistence.
//!
//! - `RecordSink`: bulk insertion of flat part records, one call per catalog
//! - `ImageManifest`: process-wide, append-only list of diagram images
//!
//! ## Directory Structure
//!
//! ```text
//! storage/
//! ├── config.toml           # Crawler configuration
//! ├── catalogs.json         # Work list
//! ├── records.jsonl         # One JSON record per line, appended per catalog
//! └── images.json           # Image manifest, written once per run
//! ```

pub mod local;
#[cfg(test)]
pub mod memory;

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ImageManifestEntry, OutputRecord};

// Re-export for convenience
pub use local::LocalStorage;
#[cfg(test)]
pub use memory::MemorySink;

/// Destination for flat output records.
///
/// Implementations must accept concurrent calls from several workers and own
/// their transaction and retry policy.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Insert one batch of records; returns the number stored.
    async fn insert_many(&self, records: &[OutputRecord]) -> Result<usize>;
}

/// Append-only image manifest shared by all workers.
#[derive(Debug, Default)]
pub struct ImageManifest {
    entries: Mutex<Vec<ImageManifestEntry>>,
}

impl ImageManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append entries as one block.
    pub fn extend(&self, entries: Vec<ImageManifestEntry>) {
        if entries.is_empty() {
            return;
        }
        let mut guard = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        guard.extend(entries);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|p| p.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of all entries collected so far.
    pub fn snapshot(&self) -> Vec<ImageManifestEntry> {
        self.entries.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }
}
