// src/models/catalog.rs

//! Catalog, Section, and Part data structures.

use serde::{Deserialize, Serialize};

/// One row of a section's parts table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Part {
    /// Position number on the section diagram
    pub position_number: String,

    /// Vendor item number
    pub item_number: String,

    /// Free-text description
    pub description: String,
}

impl Part {
    /// Return the same part with a replaced description.
    pub fn with_description(self, description: String) -> Self {
        Self {
            description,
            ..self
        }
    }
}

/// A named group of parts with an optional diagram image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Section {
    /// Section display name
    pub name: String,

    /// Absolute URL of the diagram image (empty string if the page has none)
    pub image_url: String,

    /// Parts in page row order (may be empty)
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Section {
    /// Return the same section with a replaced name.
    pub fn with_name(self, name: String) -> Self {
        Self { name, ..self }
    }

    /// Whether the section carries a diagram image.
    pub fn has_image(&self) -> bool {
        !self.image_url.is_empty()
    }
}

/// All sections crawled for one work item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Catalog {
    /// Catalog code taken from the work item
    pub code: String,

    /// Sections in link discovery order
    pub sections: Vec<Section>,
}

impl Catalog {
    /// Count parts across all sections.
    pub fn part_count(&self) -> usize {
        self.sections.iter().map(|s| s.parts.len()).sum()
    }
}
