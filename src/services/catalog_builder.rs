// src/services/catalog_builder.rs

//! Catalog builder service.
//!
//! Walks one work item: root page, section links, each section page, then
//! translates part descriptions per section and section names per catalog.

use std::sync::Arc;

use crate::models::{Catalog, Part, Section, WorkItem};
use crate::services::{PageExtractor, PageFetcher, Translate};

/// Builds one `Catalog` per work item.
pub struct CatalogBuilder {
    fetcher: Arc<dyn PageFetcher>,
    translator: Arc<dyn Translate>,
    extractor: PageExtractor,
}

impl CatalogBuilder {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        translator: Arc<dyn Translate>,
        extractor: PageExtractor,
    ) -> Self {
        Self {
            fetcher,
            translator,
            extractor,
        }
    }

    /// Crawl one catalog.
    ///
    /// Returns `None` when the root page cannot be fetched. Sections whose page
    /// fails to load or lacks a name are skipped.
    pub async fn build(&self, item: &WorkItem) -> Option<Catalog> {
        let Some(root) = self.fetcher.fetch(&item.catalog_url).await else {
            log::warn!(
                "Error at base url: {} ({}), skipping catalog",
                item.catalog_url,
                item.catalog_code
            );
            return None;
        };

        let links = self.extractor.section_links(&root);
        log::debug!("{}: found {} section links", item.catalog_code, links.len());

        let mut sections = Vec::with_capacity(links.len());
        for link in &links {
            if let Some(section) = self.build_section(link).await {
                sections.push(section);
            }
        }

        let sections = self.translate_section_names(sections).await;
        log::debug!("{}: got {} sections", item.catalog_code, sections.len());

        Some(Catalog {
            code: item.catalog_code.clone(),
            sections,
        })
    }

    async fn build_section(&self, url: &str) -> Option<Section> {
        let page = self.fetcher.fetch(url).await?;

        let extracted = match self.extractor.section(&page) {
            Ok(extracted) => extracted,
            Err(e) => {
                log::warn!("Skipping section: {}", e);
                return None;
            }
        };
        if extracted.skipped_rows > 0 {
            log::warn!(
                "{}: {} malformed part rows skipped",
                url,
                extracted.skipped_rows
            );
        }

        let mut section = extracted.into_section();
        if !section.parts.is_empty() {
            section.parts = self.translate_parts(section.parts).await;
        }
        Some(section)
    }

    async fn translate_parts(&self, parts: Vec<Part>) -> Vec<Part> {
        let descriptions: Vec<String> = parts.iter().map(|p| p.description.clone()).collect();
        let translated = self.translator.translate(&descriptions).await;
        apply_positional(parts, translated, Part::with_description)
    }

    async fn translate_section_names(&self, sections: Vec<Section>) -> Vec<Section> {
        if sections.is_empty() {
            return sections;
        }
        let names: Vec<String> = sections.iter().map(|s| s.name.clone()).collect();
        let translated = self.translator.translate(&names).await;
        apply_positional(sections, translated, Section::with_name)
    }
}

/// Pair each item with the value at the same position.
///
/// Keeps `items` untouched if the lengths disagree.
fn apply_positional<T>(items: Vec<T>, values: Vec<String>, apply: impl Fn(T, String) -> T) -> Vec<T> {
    if items.len() != values.len() {
        log::warn!(
            "Translation returned {} values for {} inputs, keeping originals",
            values.len(),
            items.len()
        );
        return items;
    }
    items
        .into_iter()
        .zip(values)
        .map(|(item, value)| apply(item, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CatalogSelectors;
    use crate::services::fakes::{FakeFetcher, UppercaseTranslator};

    const ROOT: &str = "https://shop.example.com/katalog/c1/";

    fn root_html(links: &[&str]) -> String {
        let anchors: String = links
            .iter()
            .map(|l| format!(r#"<a href="{l}">x</a>"#))
            .collect();
        format!(r#"<div class="widget-content">{anchors}</div>"#)
    }

    fn section_html(name: &str, image: Option<&str>, rows: &[(&str, &str, &str)]) -> String {
        let img = image
            .map(|src| format!(r#"<img class="thumbnail" src="{src}">"#))
            .unwrap_or_default();
        let rows: String = rows
            .iter()
            .map(|(pos, item, desc)| {
                format!(
                    r#"<tr class="Artikelvorschau"><td data-label="Pos.">{pos}</td><td data-label="Artikelnummer">{item}</td><td data-label="Bezeichnung">{desc}</td></tr>"#
                )
            })
            .collect();
        format!(r#"<ul><li class="active">{name}</li></ul>{img}<table>{rows}</table>"#)
    }

    fn item() -> WorkItem {
        WorkItem {
            catalog_code: "C1".to_string(),
            catalog_url: ROOT.to_string(),
        }
    }

    fn builder(fetcher: Arc<FakeFetcher>, translator: Arc<UppercaseTranslator>) -> CatalogBuilder {
        let extractor = PageExtractor::new(&CatalogSelectors::default()).unwrap();
        CatalogBuilder::new(fetcher, translator, extractor)
    }

    #[tokio::test]
    async fn test_root_not_found_returns_none() {
        let fetcher = Arc::new(FakeFetcher::new());
        let translator = Arc::new(UppercaseTranslator::default());
        let catalog = builder(fetcher.clone(), translator.clone()).build(&item()).await;
        assert!(catalog.is_none());
        assert_eq!(fetcher.requests(), vec![ROOT.to_string()]);
        assert_eq!(translator.calls(), 0);
    }

    #[tokio::test]
    async fn test_no_section_links_gives_empty_catalog() {
        let fetcher = Arc::new(FakeFetcher::new().with_page(ROOT, &root_html(&[])));
        let translator = Arc::new(UppercaseTranslator::default());
        let catalog = builder(fetcher, translator.clone())
            .build(&item())
            .await
            .unwrap();
        assert_eq!(catalog.code, "C1");
        assert!(catalog.sections.is_empty());
        assert_eq!(translator.calls(), 0);
    }

    #[tokio::test]
    async fn test_sections_translated_in_order() {
        let fetcher = Arc::new(
            FakeFetcher::new()
                .with_page(ROOT, &root_html(&["motor.html", "/katalog/bremse.html"]))
                .with_page(
                    "https://shop.example.com/katalog/c1/motor.html",
                    &section_html(
                        "Motor",
                        Some("/img/motor.jpg"),
                        &[("1", "A-1", "Schraube"), ("2", "A-2", "Mutter"), ("3", "A-3", "Dichtung")],
                    ),
                )
                .with_page(
                    "https://shop.example.com/katalog/bremse.html",
                    &section_html("Bremse", None, &[("1", "B-1", "Belag")]),
                ),
        );
        let translator = Arc::new(UppercaseTranslator::default());
        let catalog = builder(fetcher, translator.clone())
            .build(&item())
            .await
            .unwrap();

        assert_eq!(catalog.sections.len(), 2);
        let motor = &catalog.sections[0];
        assert_eq!(motor.name, "MOTOR");
        assert_eq!(motor.image_url, "https://shop.example.com/img/motor.jpg");
        let descriptions: Vec<_> = motor.parts.iter().map(|p| p.description.as_str()).collect();
        assert_eq!(descriptions, vec!["SCHRAUBE", "MUTTER", "DICHTUNG"]);
        assert_eq!(motor.parts[2].item_number, "A-3");

        let bremse = &catalog.sections[1];
        assert_eq!(bremse.name, "BREMSE");
        assert_eq!(bremse.image_url, "");

        // One batch per section with parts, one batch for all names.
        assert_eq!(translator.calls(), 3);
        assert_eq!(
            translator.batches()[2],
            vec!["Motor".to_string(), "Bremse".to_string()]
        );
    }

    #[tokio::test]
    async fn test_failed_and_nameless_sections_are_skipped() {
        let fetcher = Arc::new(
            FakeFetcher::new()
                .with_page(ROOT, &root_html(&["missing.html", "noname.html", "ok.html"]))
                .with_page(
                    "https://shop.example.com/katalog/c1/noname.html",
                    "<table></table>",
                )
                .with_page(
                    "https://shop.example.com/katalog/c1/ok.html",
                    &section_html("Rahmen", None, &[]),
                ),
        );
        let translator = Arc::new(UppercaseTranslator::default());
        let catalog = builder(fetcher, translator.clone())
            .build(&item())
            .await
            .unwrap();

        assert_eq!(catalog.sections.len(), 1);
        assert_eq!(catalog.sections[0].name, "RAHMEN");
        assert!(catalog.sections[0].parts.is_empty());
        // No parts, so only the section-name batch.
        assert_eq!(translator.calls(), 1);
    }

    #[test]
    fn test_apply_positional_length_mismatch_keeps_items() {
        let names = vec!["a".to_string(), "b".to_string()];
        let out = apply_positional(names.clone(), vec!["x".to_string()], |_, v| v);
        assert_eq!(out, names);
    }
}
