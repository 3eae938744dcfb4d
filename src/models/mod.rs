// src/models/mod.rs

//! Domain models for the catalog crawler.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod catalog;
mod config;
mod record;
mod selectors;
mod stats;
mod work_item;

// Re-export all public types
pub use catalog::{Catalog, Part, Section};
pub use config::{Config, CrawlerConfig, OutputConfig, TranslationConfig};
pub use record::{ImageManifestEntry, OutputRecord};
pub use selectors::CatalogSelectors;
pub use stats::{CrawlStats, WorkerReport};
pub use work_item::WorkItem;
