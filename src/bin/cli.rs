//! Parts Crawler CLI
//!
//! Local execution entry point.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use parts_crawler::{
    error::{AppError, Result},
    models::{Config, WorkItem},
    pipeline::{self, ShardPlan},
    storage::LocalStorage,
    utils::log as banner,
};

/// Spare-part catalog crawler
#[derive(Parser, Debug)]
#[command(
    name = "parts-crawler",
    version,
    about = "Crawls spare-part catalogs into flat, translated records"
)]
struct Cli {
    /// Path to storage directory containing config and work list
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl every catalog in the work list
    Crawl {
        /// Path to work list (default: {storage_dir}/catalogs.json)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Keep section names and descriptions untranslated
        #[arg(long)]
        no_translate: bool,
    },

    /// Validate configuration and work list
    Validate {
        /// Path to work list (default: {storage_dir}/catalogs.json)
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Load and validate the work list, logging the failing entry.
fn load_items(path: &Path) -> Result<Vec<WorkItem>> {
    if !path.exists() {
        log::error!("Work list not found at {}", path.display());
        return Err(AppError::config("Work list not found"));
    }
    let items = WorkItem::load_all(path)?;
    log::info!("Loaded {} catalogs from {}", items.len(), path.display());
    Ok(items)
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("Parts crawler starting...");

    let config_path = cli.storage_dir.join("config.toml");
    let mut config = Config::load_or_default(&config_path);
    let default_input = cli.storage_dir.join("catalogs.json");

    match cli.command {
        Command::Crawl {
            input,
            no_translate,
        } => {
            if no_translate {
                config.translation.enabled = false;
            }
            config.validate()?;

            let items = load_items(&input.unwrap_or(default_input))?;
            let storage = LocalStorage::new(&cli.storage_dir, &config.output.records_file);
            let summary = pipeline::run_pipeline(&config, &storage, &items).await?;

            log::info!(
                "Crawl complete! {} records, manifest at {}",
                summary.stats.totals.records,
                summary.manifest_path.display()
            );
        }

        Command::Validate { input } => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");

            let items = load_items(&input.unwrap_or(default_input))?;
            log::info!("✓ Work list OK ({} catalogs)", items.len());

            let plan = ShardPlan::new(
                items.len(),
                config.crawler.partition_divisor,
                config.crawler.workers,
            );
            for (index, range) in plan.ranges().iter().enumerate() {
                banner::sub_item(&format!("Worker-{}: items {:?}", index + 1, range));
            }
            if !plan.covers_all() {
                return Err(AppError::validation(format!(
                    "{} workers with shard size {} leave items unassigned; raise crawler.workers or lower crawler.partition_divisor",
                    config.crawler.workers,
                    plan.shard_size()
                )));
            }

            log::info!("All validations passed!");
        }
    }

    log::info!("Done!");

    Ok(())
}
