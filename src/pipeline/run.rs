// src/pipeline/run.rs

//! Full run: HTTP collaborators, crawl, manifest.

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::Result;
use crate::models::{Config, CrawlStats, WorkItem};
use crate::pipeline::run_crawler;
use crate::services::{HttpFetcher, HttpTranslator, PassthroughTranslator, Translate};
use crate::storage::LocalStorage;
use crate::utils::{http, log as banner};

/// Where a run left its output.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub stats: CrawlStats,
    pub manifest_path: PathBuf,
}

/// Crawl `items` over HTTP, append records to `storage`, and write the
/// image manifest once every worker has finished.
pub async fn run_pipeline(
    config: &Config,
    storage: &LocalStorage,
    items: &[WorkItem],
) -> Result<RunSummary> {
    banner::header("Catalog crawler starting");

    let client = http::create_async_client(&config.crawler)?;
    let fetcher = Arc::new(HttpFetcher::new(client.clone()));
    let translator: Arc<dyn Translate> = if config.translation.enabled {
        Arc::new(HttpTranslator::new(client, config.translation.clone()))
    } else {
        log::info!("Translation disabled, keeping source texts");
        Arc::new(PassthroughTranslator)
    };

    banner::step(1, 2, "Crawl - Fetching catalogs");
    let outcome = run_crawler(
        config,
        items,
        fetcher,
        translator,
        Arc::new(storage.clone()),
    )
    .await?;

    banner::step(2, 2, "Manifest - Saving images");
    let manifest_path = storage
        .write_manifest(&config.output.manifest_file, &outcome.manifest)
        .await?;

    let totals = &outcome.stats.totals;
    banner::summary(
        "Crawl complete",
        &[
            ("Catalogs processed", totals.items.to_string()),
            ("Catalogs built", totals.catalogs.to_string()),
            ("Catalogs skipped", totals.skipped.to_string()),
            ("Sections", totals.sections.to_string()),
            ("Records stored", totals.records.to_string()),
            ("Sink failures", totals.sink_failures.to_string()),
            ("Manifest entries", outcome.stats.manifest_entries.to_string()),
            ("Manifest", manifest_path.display().to_string()),
            ("Elapsed (s)", outcome.stats.elapsed_secs().to_string()),
        ],
    );

    Ok(RunSummary {
        stats: outcome.stats,
        manifest_path,
    })
}
