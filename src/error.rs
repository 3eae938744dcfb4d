// src/error.rs

//! Unified error handling for the catalog crawler.

use std::fmt;

use thiserror::Error;

/// Result type alias for crawler operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A work list entry could not be loaded
    #[error("Invalid work item #{index}: {message}")]
    InvalidWorkItem { index: usize, message: String },

    /// A mandatory element was missing from a fetched page
    #[error("Extraction error for {url}: {message}")]
    Extraction { url: String, message: String },

    /// A pool worker failed or panicked
    #[error("Worker {index} failed: {message}")]
    Worker { index: usize, message: String },

    /// The translation endpoint answered with something unusable
    #[error("Translation error: {0}")]
    Translation(String),

    /// The record sink rejected a batch
    #[error("Sink error: {0}")]
    Sink(String),
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a work item error for the entry at `index`.
    pub fn work_item(index: usize, message: impl fmt::Display) -> Self {
        Self::InvalidWorkItem {
            index,
            message: message.to_string(),
        }
    }

    /// Create an extraction error for a page.
    pub fn extraction(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Extraction {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create a worker failure.
    pub fn worker(index: usize, message: impl fmt::Display) -> Self {
        Self::Worker {
            index,
            message: message.to_string(),
        }
    }

    /// Create a translation error.
    pub fn translation(message: impl Into<String>) -> Self {
        Self::Translation(message.into())
    }

    /// Create a sink error.
    pub fn sink(message: impl Into<String>) -> Self {
        Self::Sink(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_item_message_carries_index() {
        let err = AppError::work_item(3, "missing field `catalog_url`");
        assert_eq!(
            err.to_string(),
            "Invalid work item #3: missing field `catalog_url`"
        );
    }

    #[test]
    fn test_translation_message() {
        let err = AppError::translation("expected 2 translations, got 1");
        assert_eq!(
            err.to_string(),
            "Translation error: expected 2 translations, got 1"
        );
    }

    #[test]
    fn test_extraction_message_carries_url() {
        let err = AppError::extraction("https://example.com/s/1", "no section name");
        assert!(err.to_string().contains("https://example.com/s/1"));
    }
}
