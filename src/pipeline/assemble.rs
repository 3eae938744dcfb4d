// src/pipeline/assemble.rs

//! Flattening a catalog into output records and manifest entries.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Catalog, ImageManifestEntry, OutputRecord};

/// Longest file name, in characters, produced by sanitization.
pub const MAX_FILENAME_CHARS: usize = 255;

static RESERVED_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[<>:"/\\|?*']"#).expect("reserved character pattern is valid")
});

/// Records and images derived from one catalog.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Assembled {
    pub records: Vec<OutputRecord>,
    pub images: Vec<ImageManifestEntry>,
}

/// Replace reserved characters with `_`, trim, and cap the length.
///
/// Idempotent: sanitizing an already sanitized name returns it unchanged.
pub fn sanitize_filename(name: &str) -> String {
    sanitize_with_limit(name, MAX_FILENAME_CHARS)
}

/// Sanitize `stem` and append `extension`, keeping the whole name within
/// [`MAX_FILENAME_CHARS`].
pub fn sanitize_with_extension(stem: &str, extension: &str) -> String {
    let budget = MAX_FILENAME_CHARS.saturating_sub(extension.chars().count());
    format!("{}{}", sanitize_with_limit(stem, budget), extension)
}

/// Diagram file name for a section, shared by all its parts.
pub fn diagram_filename(catalog_code: &str, section_name: &str, extension: &str) -> String {
    sanitize_with_extension(&format!("{catalog_code}-{section_name}"), extension)
}

fn sanitize_with_limit(name: &str, max_chars: usize) -> String {
    let replaced = RESERVED_CHARS.replace_all(name, "_");
    let capped: String = replaced.trim().chars().take(max_chars).collect();
    // Capping can expose trailing whitespace.
    capped.trim_end().to_string()
}

/// Flatten one catalog.
///
/// Emits one record per part and one manifest entry per section that has a
/// diagram image.
pub fn assemble(catalog: &Catalog, scraper_name: &str, extension: &str) -> Assembled {
    let mut assembled = Assembled::default();

    for section in &catalog.sections {
        let file_name = diagram_filename(&catalog.code, &section.name, extension);

        if section.has_image() {
            assembled.images.push(ImageManifestEntry {
                file_name: file_name.clone(),
                image_url: section.image_url.clone(),
            });
        }

        assembled
            .records
            .extend(section.parts.iter().map(|part| OutputRecord {
                id: 0,
                catalog_code: catalog.code.clone(),
                section: section.name.clone(),
                part_number: part.position_number.clone(),
                description: part.description.clone(),
                item_number: part.item_number.clone(),
                section_diagram_filename: file_name.clone(),
                scraper_name: scraper_name.to_string(),
            }));
    }

    assembled
}
