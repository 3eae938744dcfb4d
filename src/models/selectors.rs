// src/models/selectors.rs

//! CSS selectors for scraping catalog and section pages.

use serde::{Deserialize, Serialize};

/// CSS selectors for scraping catalog and section pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSelectors {
    /// Links to section pages on the catalog root page
    #[serde(default = "defaults::section_link")]
    pub section_link: String,

    /// The active breadcrumb holding the section name
    #[serde(default = "defaults::section_name")]
    pub section_name: String,

    /// Section diagram image (optional on the page)
    #[serde(default = "defaults::section_image")]
    pub section_image: String,

    /// Each row of the parts table
    #[serde(default = "defaults::part_row")]
    pub part_row: String,

    /// Position number cell within a row
    #[serde(default = "defaults::position_number")]
    pub position_number: String,

    /// Item number cell within a row
    #[serde(default = "defaults::item_number")]
    pub item_number: String,

    /// Description cell within a row
    #[serde(default = "defaults::description")]
    pub description: String,

    /// HTML attribute holding section links (usually "href")
    #[serde(default = "defaults::link_attr")]
    pub link_attr: String,

    /// HTML attribute holding the image location (usually "src")
    #[serde(default = "defaults::image_attr")]
    pub image_attr: String,
}

impl Default for CatalogSelectors {
    fn default() -> Self {
        Self {
            section_link: defaults::section_link(),
            section_name: defaults::section_name(),
            section_image: defaults::section_image(),
            part_row: defaults::part_row(),
            position_number: defaults::position_number(),
            item_number: defaults::item_number(),
            description: defaults::description(),
            link_attr: defaults::link_attr(),
            image_attr: defaults::image_attr(),
        }
    }
}

impl CatalogSelectors {
    /// All selector strings paired with their config key, for validation.
    pub fn named(&self) -> [(&'static str, &str); 7] {
        [
            ("section_link", &self.section_link),
            ("section_name", &self.section_name),
            ("section_image", &self.section_image),
            ("part_row", &self.part_row),
            ("position_number", &self.position_number),
            ("item_number", &self.item_number),
            ("description", &self.description),
        ]
    }
}

mod defaults {
    pub fn section_link() -> String {
        "div.widget-content a".into()
    }
    pub fn section_name() -> String {
        "li.active".into()
    }
    pub fn section_image() -> String {
        "img.thumbnail".into()
    }
    pub fn part_row() -> String {
        "tr.Artikelvorschau".into()
    }
    pub fn position_number() -> String {
        r#"td[data-label="Pos."]"#.into()
    }
    pub fn item_number() -> String {
        "td[data-label=Artikelnummer]".into()
    }
    pub fn description() -> String {
        "td[data-label=Bezeichnung]".into()
    }
    pub fn link_attr() -> String {
        "href".into()
    }
    pub fn image_attr() -> String {
        "src".into()
    }
}
