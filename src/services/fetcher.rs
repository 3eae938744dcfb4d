// src/services/fetcher.rs

//! Page fetching.
//!
//! A failed fetch is never an error for the caller: transport failures and
//! non-2xx statuses are logged here and surface as `None`, so the caller only
//! decides which unit of work to skip.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// A fetched HTML page together with the URL it was served from.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: Url,
    pub body: String,
}

impl Page {
    pub fn new(url: Url, body: impl Into<String>) -> Self {
        Self {
            url,
            body: body.into(),
        }
    }
}

/// Source of HTML pages.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET a page; `None` if it could not be fetched with a 2xx status.
    async fn fetch(&self, url: &str) -> Option<Page>;
}

/// Fetches pages over HTTP with a shared client.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Option<Page> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Error at link: {}, request failed: {}", url, e);
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            log::warn!("Error at link: {}, Status Code: {}", url, status.as_u16());
            return None;
        }

        // Relative links resolve against the final URL after redirects.
        let final_url = response.url().clone();
        match response.text().await {
            Ok(body) => Some(Page::new(final_url, body)),
            Err(e) => {
                log::warn!("Error reading body of {}: {}", url, e);
                None
            }
        }
    }
}
