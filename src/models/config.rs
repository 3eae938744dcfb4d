//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::CatalogSelectors;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and worker pool settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Translation service settings
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Page selectors
    #[serde(default)]
    pub selectors: CatalogSelectors,

    /// Output naming
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.workers == 0 {
            return Err(AppError::validation("crawler.workers must be > 0"));
        }
        if self.crawler.partition_divisor == 0 {
            return Err(AppError::validation(
                "crawler.partition_divisor must be > 0",
            ));
        }
        if self.translation.enabled && self.translation.endpoint.trim().is_empty() {
            return Err(AppError::validation(
                "translation.endpoint is empty while translation is enabled",
            ));
        }
        if self.output.scraper_name.trim().is_empty() {
            return Err(AppError::validation("output.scraper_name is empty"));
        }
        for (key, selector) in self.selectors.named() {
            scraper::Selector::parse(selector).map_err(|e| {
                AppError::selector(selector, format!("selectors.{key}: {e:?}"))
            })?;
        }
        Ok(())
    }
}

/// HTTP client and worker pool settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Number of parallel workers
    #[serde(default = "defaults::workers")]
    pub workers: usize,

    /// Shard size is `ceil(items / partition_divisor)`, independent of `workers`
    #[serde(default = "defaults::partition_divisor")]
    pub partition_divisor: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            workers: defaults::workers(),
            partition_divisor: defaults::partition_divisor(),
        }
    }
}

/// Translation service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Translate section names and part descriptions
    #[serde(default = "defaults::enabled")]
    pub enabled: bool,

    /// Batch translation endpoint
    #[serde(default = "defaults::endpoint")]
    pub endpoint: String,

    /// Language of the crawled site
    #[serde(default = "defaults::source_lang")]
    pub source_lang: String,

    /// Language of the stored records
    #[serde(default = "defaults::target_lang")]
    pub target_lang: String,

    /// Service identifier sent with every request
    #[serde(default = "defaults::client")]
    pub client: String,

    /// API key header value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Referer header value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::enabled(),
            endpoint: defaults::endpoint(),
            source_lang: defaults::source_lang(),
            target_lang: defaults::target_lang(),
            client: defaults::client(),
            api_key: None,
            referer: None,
        }
    }
}

/// Output naming settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Tag stored on every record
    #[serde(default = "defaults::scraper_name")]
    pub scraper_name: String,

    /// Extension appended to diagram file names
    #[serde(default = "defaults::image_extension")]
    pub image_extension: String,

    /// Image manifest file name, relative to the storage directory
    #[serde(default = "defaults::manifest_file")]
    pub manifest_file: String,

    /// Record batch file name, relative to the storage directory
    #[serde(default = "defaults::records_file")]
    pub records_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            scraper_name: defaults::scraper_name(),
            image_extension: defaults::image_extension(),
            manifest_file: defaults::manifest_file(),
            records_file: defaults::records_file(),
        }
    }
}

mod defaults {
    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; parts-crawler/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn workers() -> usize {
        10
    }
    pub fn partition_divisor() -> usize {
        10
    }

    // Translation defaults
    pub fn enabled() -> bool {
        true
    }
    pub fn endpoint() -> String {
        "https://translate-pa.googleapis.com/v1/translateHtml".into()
    }
    pub fn source_lang() -> String {
        "de".into()
    }
    pub fn target_lang() -> String {
        "en".into()
    }
    pub fn client() -> String {
        "te_lib".into()
    }

    // Output defaults
    pub fn scraper_name() -> String {
        "Erssatzteile".into()
    }
    pub fn image_extension() -> String {
        ".jpg".into()
    }
    pub fn manifest_file() -> String {
        "images.json".into()
    }
    pub fn records_file() -> String {
        "records.jsonl".into()
    }
}
