// src/pipeline/pool.rs

//! Fixed-size worker pool over a shard plan.
//!
//! One tokio task per shard. Every task runs to completion; failures are
//! reported only after the whole pool has joined.

use std::future::Future;

use futures::future;

use crate::error::{AppError, Result};
use crate::pipeline::ShardPlan;

/// Run `worker(index, shard)` for every shard in `plan` concurrently.
///
/// Returns the per-worker results in worker order, or the first failure
/// (error or panic, lowest worker index first) once all workers finished.
pub async fn run_workers<T, R, F, Fut>(items: &[T], plan: &ShardPlan, worker: F) -> Result<Vec<R>>
where
    T: Clone + Send + 'static,
    R: Send + 'static,
    F: Fn(usize, Vec<T>) -> Fut,
    Fut: Future<Output = Result<R>> + Send + 'static,
{
    let handles: Vec<_> = plan
        .ranges()
        .iter()
        .enumerate()
        .map(|(index, range)| tokio::spawn(worker(index, items[range.clone()].to_vec())))
        .collect();

    let joined = future::join_all(handles).await;

    let mut results = Vec::with_capacity(joined.len());
    let mut first_error = None;
    for (index, outcome) in joined.into_iter().enumerate() {
        match outcome {
            Ok(Ok(result)) => results.push(result),
            Ok(Err(e)) => {
                log::error!("Worker {} failed: {}", index, e);
                first_error.get_or_insert(AppError::worker(index, e));
            }
            Err(join_error) => {
                log::error!("Worker {} aborted: {}", index, join_error);
                first_error.get_or_insert(AppError::worker(index, join_error));
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(results),
    }
}
