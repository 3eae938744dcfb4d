//! In-memory record sink used by the pipeline tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::OutputRecord;
use crate::storage::RecordSink;

/// Keeps every inserted batch in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    batches: Mutex<Vec<Vec<OutputRecord>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Batches in insertion order.
    pub fn batches(&self) -> Vec<Vec<OutputRecord>> {
        self.batches.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    /// All records, flattened.
    pub fn records(&self) -> Vec<OutputRecord> {
        self.batches().into_iter().flatten().collect()
    }
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn insert_many(&self, records: &[OutputRecord]) -> Result<usize> {
        self.batches
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(records.to_vec());
        Ok(records.len())
    }
}
