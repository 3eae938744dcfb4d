// src/services/translator.rs

//! Batch text translation.
//!
//! Translation is best effort. Any failure (transport, status, body shape)
//! is logged and the input comes back unchanged, so callers always get a list
//! of the same length and order as they sent.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE, REFERER};
use serde_json::{Value, json};

use crate::error::{AppError, Result};
use crate::models::TranslationConfig;

/// Translates an ordered batch of strings.
#[async_trait]
pub trait Translate: Send + Sync {
    /// Return translations positionally matching `texts`, or `texts` itself.
    async fn translate(&self, texts: &[String]) -> Vec<String>;
}

/// Returns every batch untranslated.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTranslator;

#[async_trait]
impl Translate for PassthroughTranslator {
    async fn translate(&self, texts: &[String]) -> Vec<String> {
        texts.to_vec()
    }
}

/// Translator backed by the HTTP batch translation endpoint.
///
/// Sends exactly one request per call; splitting work into batches is up to
/// the caller.
pub struct HttpTranslator {
    client: Client,
    config: TranslationConfig,
}

impl HttpTranslator {
    pub fn new(client: Client, config: TranslationConfig) -> Self {
        Self { client, config }
    }

    async fn request(&self, texts: &[String]) -> Result<Vec<String>> {
        let body = serde_json::to_vec(&request_body(texts, &self.config))?;

        let mut request = self
            .client
            .post(&self.config.endpoint)
            .header(ACCEPT, "*/*")
            .header(CONTENT_TYPE, "application/json+protobuf")
            .body(body);
        if let Some(key) = &self.config.api_key {
            request = request.header("x-goog-api-key", key);
        }
        if let Some(referer) = &self.config.referer {
            request = request.header(REFERER, referer);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::translation(format!(
                "Status code: {}",
                status.as_u16()
            )));
        }

        let text = response.text().await?;
        parse_response(&text, texts.len())
    }
}

#[async_trait]
impl Translate for HttpTranslator {
    async fn translate(&self, texts: &[String]) -> Vec<String> {
        match self.request(texts).await {
            Ok(translated) => translated,
            Err(e) => {
                log::warn!(
                    "Error at translation of {} strings, keeping originals: {}",
                    texts.len(),
                    e
                );
                texts.to_vec()
            }
        }
    }
}

/// Payload: `[[texts, source, target], client]`.
fn request_body(texts: &[String], config: &TranslationConfig) -> Value {
    json!([[texts, config.source_lang, config.target_lang], config.client])
}

/// Response: `[[t1, t2, ...], ...]`; the first element must match `expected` in length.
fn parse_response(body: &str, expected: usize) -> Result<Vec<String>> {
    let value: Value = serde_json::from_str(body)?;

    let list = value.get(0).and_then(Value::as_array).ok_or_else(|| {
        AppError::translation(format!("unexpected response shape: {}", truncate(body, 200)))
    })?;

    let translated = list
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| AppError::translation("non-string entry in response"))?;

    if translated.len() != expected {
        return Err(AppError::translation(format!(
            "expected {} translations, got {}",
            expected,
            translated.len()
        )));
    }
    Ok(translated)
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
