// src/models/work_item.rs

//! Work list entries driving one catalog crawl each.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// One catalog to crawl.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkItem {
    /// Unique catalog (model) code
    #[serde(alias = "sgl_code")]
    pub catalog_code: String,

    /// URL of the catalog root page
    #[serde(alias = "catalog_link")]
    pub catalog_url: String,
}

impl WorkItem {
    /// Load the work list from a JSON array file.
    pub fn load_all(path: impl AsRef<Path>) -> Result<Vec<Self>> {
        let content = fs::read_to_string(path)?;
        Self::parse_all(&content)
    }

    /// Parse a JSON array of work items.
    ///
    /// Fails on the first malformed entry, naming its index.
    pub fn parse_all(content: &str) -> Result<Vec<Self>> {
        let raw: Vec<serde_json::Value> = serde_json::from_str(content)?;
        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(raw.len());

        for (index, value) in raw.into_iter().enumerate() {
            let item: WorkItem =
                serde_json::from_value(value).map_err(|e| AppError::work_item(index, e))?;
            item.validate(index)?;

            if !seen.insert(item.catalog_code.clone()) {
                return Err(AppError::work_item(
                    index,
                    format!("duplicate catalog code '{}'", item.catalog_code),
                ));
            }
            items.push(item);
        }

        Ok(items)
    }

    fn validate(&self, index: usize) -> Result<()> {
        if self.catalog_code.trim().is_empty() {
            return Err(AppError::work_item(index, "catalog code is empty"));
        }
        let url = Url::parse(&self.catalog_url).map_err(|e| {
            AppError::work_item(index, format!("catalog url '{}': {e}", self.catalog_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::work_item(
                index,
                format!("catalog url '{}' is not http(s)", self.catalog_url),
            ));
        }
        Ok(())
    }
}
