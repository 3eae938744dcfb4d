// src/models/record.rs

//! Flat output records and image manifest entries.

use serde::{Deserialize, Serialize};

/// One flattened part row, ready for bulk insertion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputRecord {
    /// Placeholder key; the store assigns the real one
    pub id: u64,

    pub catalog_code: String,

    /// Section name the part belongs to
    pub section: String,

    /// Position number on the diagram
    pub part_number: String,

    pub description: String,

    pub item_number: String,

    /// File name of the section diagram, shared by every part of the section
    pub section_diagram_filename: String,

    /// Tag identifying the scraper that produced the record
    pub scraper_name: String,
}

/// A diagram image to download separately.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageManifestEntry {
    pub file_name: String,
    pub image_url: String,
}
