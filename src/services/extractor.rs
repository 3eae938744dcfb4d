// src/services/extractor.rs

//! Catalog and section page extraction.
//!
//! Extracts section links from a catalog root page, and the section name,
//! diagram image, and part rows from a section page.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{CatalogSelectors, Part, Section};
use crate::services::Page;
use crate::utils::{normalize_whitespace, resolve_url};

/// Everything extracted from one section page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionPage {
    pub name: String,
    /// Absolute image URL, or empty if the page shows no diagram
    pub image_url: String,
    pub parts: Vec<Part>,
    /// Rows dropped because a required cell was missing
    pub skipped_rows: usize,
}

impl SectionPage {
    pub fn into_section(self) -> Section {
        Section {
            name: self.name,
            image_url: self.image_url,
            parts: self.parts,
        }
    }
}

/// Extractor with pre-compiled selectors.
#[derive(Debug, Clone)]
pub struct PageExtractor {
    section_link: Selector,
    section_name: Selector,
    section_image: Selector,
    part_row: Selector,
    position_number: Selector,
    item_number: Selector,
    description: Selector,
    link_attr: String,
    image_attr: String,
}

impl PageExtractor {
    /// Compile the configured selectors.
    pub fn new(selectors: &CatalogSelectors) -> Result<Self> {
        Ok(Self {
            section_link: Self::parse_selector(&selectors.section_link)?,
            section_name: Self::parse_selector(&selectors.section_name)?,
            section_image: Self::parse_selector(&selectors.section_image)?,
            part_row: Self::parse_selector(&selectors.part_row)?,
            position_number: Self::parse_selector(&selectors.position_number)?,
            item_number: Self::parse_selector(&selectors.item_number)?,
            description: Self::parse_selector(&selectors.description)?,
            link_attr: selectors.link_attr.clone(),
            image_attr: selectors.image_attr.clone(),
        })
    }

    /// Absolute URLs of all section links on a catalog root page, in page order.
    pub fn section_links(&self, page: &Page) -> Vec<String> {
        let document = Html::parse_document(&page.body);
        document
            .select(&self.section_link)
            .filter_map(|a| a.value().attr(&self.link_attr))
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .map(|href| resolve_url(&page.url, href))
            .collect()
    }

    /// Extract name, image, and parts from a section page.
    ///
    /// A missing name is an error; a missing image yields an empty string and
    /// rows lacking a required cell are skipped and counted.
    pub fn section(&self, page: &Page) -> Result<SectionPage> {
        let document = Html::parse_document(&page.body);

        let name = document
            .select(&self.section_name)
            .next()
            .map(|el| text_of(&el))
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                AppError::extraction(page.url.as_str(), "section name element missing or empty")
            })?;

        let image_url = document
            .select(&self.section_image)
            .next()
            .and_then(|img| img.value().attr(&self.image_attr))
            .map(str::trim)
            .filter(|src| !src.is_empty())
            .map(|src| resolve_url(&page.url, src))
            .unwrap_or_default();

        let mut parts = Vec::new();
        let mut skipped_rows = 0;
        for (index, row) in document.select(&self.part_row).enumerate() {
            match self.parse_part_row(&row) {
                Some(part) => parts.push(part),
                None => {
                    skipped_rows += 1;
                    log::warn!(
                        "Skipping part row {} on {}: required cell missing",
                        index,
                        page.url
                    );
                }
            }
        }

        Ok(SectionPage {
            name,
            image_url,
            parts,
            skipped_rows,
        })
    }

    fn parse_part_row(&self, row: &ElementRef) -> Option<Part> {
        let cell = |sel: &Selector| row.select(sel).next().map(|el| text_of(&el));

        Some(Part {
            position_number: cell(&self.position_number)?,
            item_number: cell(&self.item_number)?,
            description: cell(&self.description)?,
        })
    }

    fn parse_selector(s: &str) -> Result<Selector> {
        Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
    }
}

fn text_of(el: &ElementRef) -> String {
    normalize_whitespace(&el.text().collect::<String>())
}
