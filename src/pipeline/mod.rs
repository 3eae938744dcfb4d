//! Pipeline entry points for crawler operations.
//!
//! - `ShardPlan`: split the work list into contiguous per-worker shards
//! - `run_workers`: run one task per shard and join them all
//! - `run_crawler`: crawl, assemble, and sink every catalog
//! - `run_pipeline`: full run over HTTP with local storage

pub mod assemble;
pub mod crawl;
pub mod partition;
pub mod pool;
pub mod run;

pub use assemble::{Assembled, assemble, diagram_filename, sanitize_filename, sanitize_with_extension};
pub use crawl::{CrawlOutcome, run_crawler};
pub use partition::ShardPlan;
pub use pool::run_workers;
pub use run::{RunSummary, run_pipeline};
