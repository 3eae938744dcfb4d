//! Local filesystem storage implementation.
//!
//! Records are appended as JSON lines; the image manifest is written
//! atomically once per run.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! ├── records.jsonl         # Appended per catalog batch
//! └── images.json           # Pretty-printed manifest
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::{AppError, Result};
use crate::models::{ImageManifestEntry, OutputRecord};
use crate::storage::RecordSink;

/// Local filesystem storage backend.
#[derive(Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    records_file: String,
    /// Serialises appends from concurrent workers.
    append_lock: Arc<Mutex<()>>,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>, records_file: impl Into<String>) -> Self {
        Self {
            root_dir: root_dir.into(),
            records_file: records_file.into(),
            append_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Write JSON data, pretty-printed.
    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Write the image manifest as a pretty-printed JSON array.
    pub async fn write_manifest(&self, key: &str, entries: &[ImageManifestEntry]) -> Result<PathBuf> {
        self.write_json(key, entries).await?;
        Ok(self.path(key))
    }

    /// Load every record appended so far.
    pub async fn load_records(&self) -> Result<Vec<OutputRecord>> {
        let Some(bytes) = self.read_bytes(&self.records_file).await? else {
            log::warn!("No {} found", self.records_file);
            return Ok(Vec::new());
        };
        let text = String::from_utf8_lossy(&bytes);
        text.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(AppError::from))
            .collect()
    }
}

#[async_trait]
impl RecordSink for LocalStorage {
    async fn insert_many(&self, records: &[OutputRecord]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let mut buf = Vec::new();
        for record in records {
            serde_json::to_writer(&mut buf, record)?;
            buf.push(b'\n');
        }

        let path = self.path(&self.records_file);
        let _guard = self.append_lock.lock().await;
        self.ensure_dir(&path).await?;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        file.write_all(&buf).await?;
        file.flush().await?;

        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(code: &str, part: &str) -> OutputRecord {
        OutputRecord {
            id: 0,
            catalog_code: code.to_string(),
            section: "Motor".to_string(),
            part_number: part.to_string(),
            description: "Screw".to_string(),
            item_number: format!("A-{part}"),
            section_diagram_filename: format!("{code}-Motor.jpg"),
            scraper_name: "Erssatzteile".to_string(),
        }
    }

    #[tokio::test]
    async fn test_write_and_read() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path(), "records.jsonl");

        storage.write_bytes("test.txt", b"hello").await.unwrap();
        let data = storage.read_bytes("test.txt").await.unwrap();
        assert_eq!(data, Some(b"hello".to_vec()));
    }

    #[tokio::test]
    async fn test_read_nonexistent() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path(), "records.jsonl");

        assert!(storage.read_bytes("nope.txt").await.unwrap().is_none());
        assert!(storage.load_records().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_many_appends_batches() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("out"), "records.jsonl");

        assert_eq!(storage.insert_many(&[record("C1", "1"), record("C1", "2")]).await.unwrap(), 2);
        assert_eq!(storage.insert_many(&[]).await.unwrap(), 0);
        assert_eq!(storage.insert_many(&[record("C2", "1")]).await.unwrap(), 1);

        let loaded = storage.load_records().await.unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[2].catalog_code, "C2");
    }

    #[tokio::test]
    async fn test_concurrent_inserts_keep_lines_intact() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path(), "records.jsonl");

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let storage = storage.clone();
                tokio::spawn(async move {
                    let batch: Vec<_> = (0..20)
                        .map(|p| record(&format!("C{i}"), &p.to_string()))
                        .collect();
                    storage.insert_many(&batch).await.unwrap()
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(storage.load_records().await.unwrap().len(), 160);
    }

    #[tokio::test]
    async fn test_manifest_is_pretty_json() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path(), "records.jsonl");
        let entries = vec![ImageManifestEntry {
            file_name: "C1-Motor.jpg".to_string(),
            image_url: "https://example.com/motor.jpg".to_string(),
        }];

        let path = storage.write_manifest("images.json", &entries).await.unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("\n  {"));
        let loaded: Vec<ImageManifestEntry> = serde_json::from_str(&text).unwrap();
        assert_eq!(loaded, entries);
    }
}
