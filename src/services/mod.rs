//! Service layer for the catalog crawler.
//!
//! This module contains the business logic for:
//! - Page fetching (`PageFetcher`, `HttpFetcher`)
//! - Catalog and section extraction (`PageExtractor`)
//! - Batch translation (`Translate`, `HttpTranslator`)
//! - Per-catalog crawling (`CatalogBuilder`)

mod catalog_builder;
mod extractor;
mod fetcher;
mod translator;

#[cfg(test)]
pub(crate) mod fakes;

pub use catalog_builder::CatalogBuilder;
pub use extractor::{PageExtractor, SectionPage};
pub use fetcher::{HttpFetcher, Page, PageFetcher};
pub use translator::{HttpTranslator, PassthroughTranslator, Translate};
