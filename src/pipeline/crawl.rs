// src/pipeline/crawl.rs

//! Catalog crawling pipeline.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;

use crate::error::{AppError, Result};
use crate::models::{Config, CrawlStats, ImageManifestEntry, WorkItem, WorkerReport};
use crate::pipeline::{ShardPlan, assemble, run_workers};
use crate::services::{CatalogBuilder, PageExtractor, PageFetcher, Translate};
use crate::storage::{ImageManifest, RecordSink};

/// Result of a completed crawl.
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub stats: CrawlStats,
    /// Manifest entries from every worker, in append order
    pub manifest: Vec<ImageManifestEntry>,
}

/// State shared by all workers of one run.
struct CrawlContext {
    builder: CatalogBuilder,
    sink: Arc<dyn RecordSink>,
    manifest: ImageManifest,
    processed: AtomicUsize,
    total: usize,
    scraper_name: String,
    image_extension: String,
}

/// Crawl every work item with the configured worker pool.
///
/// Fails before launching any worker if the shard plan would leave items
/// without a worker.
pub async fn run_crawler(
    config: &Config,
    items: &[WorkItem],
    fetcher: Arc<dyn PageFetcher>,
    translator: Arc<dyn Translate>,
    sink: Arc<dyn RecordSink>,
) -> Result<CrawlOutcome> {
    let start_time = Utc::now();

    let plan = ShardPlan::new(
        items.len(),
        config.crawler.partition_divisor,
        config.crawler.workers,
    );
    if !plan.covers_all() {
        return Err(AppError::config(format!(
            "{} workers with shard size {} (partition_divisor {}) cannot cover {} items",
            config.crawler.workers,
            plan.shard_size(),
            config.crawler.partition_divisor,
            items.len()
        )));
    }
    log::info!(
        "Crawling {} catalogs with {} workers (shard size {}, {} busy)",
        items.len(),
        config.crawler.workers,
        plan.shard_size(),
        plan.busy_workers()
    );

    let extractor = PageExtractor::new(&config.selectors)?;
    let ctx = Arc::new(CrawlContext {
        builder: CatalogBuilder::new(fetcher, translator, extractor),
        sink,
        manifest: ImageManifest::new(),
        processed: AtomicUsize::new(0),
        total: items.len(),
        scraper_name: config.output.scraper_name.clone(),
        image_extension: config.output.image_extension.clone(),
    });

    let worker_ctx = Arc::clone(&ctx);
    let reports = run_workers(items, &plan, move |index, shard| {
        process_shard(Arc::clone(&worker_ctx), index, shard)
    })
    .await?;

    let mut totals = WorkerReport::default();
    for report in &reports {
        totals.merge(report);
    }

    let manifest = ctx.manifest.snapshot();
    let stats = CrawlStats {
        start_time,
        end_time: Utc::now(),
        workers: config.crawler.workers,
        totals,
        manifest_entries: manifest.len(),
    };

    Ok(CrawlOutcome { stats, manifest })
}

/// Process one shard sequentially.
async fn process_shard(
    ctx: Arc<CrawlContext>,
    index: usize,
    shard: Vec<WorkItem>,
) -> Result<WorkerReport> {
    let mut report = WorkerReport::default();
    let shard_len = shard.len();

    for (position, item) in shard.iter().enumerate() {
        let done = ctx.processed.fetch_add(1, Ordering::SeqCst) + 1;
        log::info!(
            "Worker-{}: {} of {} ({}), overall {}/{}",
            index + 1,
            position + 1,
            shard_len,
            item.catalog_code,
            done,
            ctx.total
        );
        report.items += 1;

        let Some(catalog) = ctx.builder.build(item).await else {
            report.skipped += 1;
            continue;
        };
        report.catalogs += 1;
        report.sections += catalog.sections.len();

        let assembled = assemble(&catalog, &ctx.scraper_name, &ctx.image_extension);
        ctx.manifest.extend(assembled.images);

        if assembled.records.is_empty() {
            log::info!("{}: no records to send", catalog.code);
            continue;
        }

        log::info!(
            "Sending records to sink: {} ({})",
            assembled.records.len(),
            catalog.code
        );
        match ctx.sink.insert_many(&assembled.records).await {
            Ok(stored) => report.records += stored,
            Err(e) => {
                report.sink_failures += 1;
                log::error!(
                    "Sink rejected {} records for {}: {}",
                    assembled.records.len(),
                    catalog.code,
                    e
                );
            }
        }
    }

    Ok(report)
}
