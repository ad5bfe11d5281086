//! Background fetch worker: generation-tagged requests in, tagged
//! results out over bounded channels, so the render thread never
//! blocks on the network and can discard stale completions.

use std::thread;

use anyhow::{Context, Result};
use crossbeam_channel::{bounded, Receiver, Sender};
use tracing::{debug, warn};

use neo_core::RawRecord;

use crate::{build_client, fetch_records, DateRange, FeedConfig, FeedError};

/// One fetch to run. The generation comes from the caller's
/// `ViewSynchronizer::begin_pass` and travels with the result.
#[derive(Clone, Debug)]
pub struct FetchRequest {
    pub generation: u64,
    pub range: DateRange,
}

#[derive(Debug)]
pub struct FetchResult {
    pub generation: u64,
    pub range: DateRange,
    pub outcome: Result<Vec<RawRecord>, FeedError>,
}

/// Channel endpoints for the worker thread. Dropping the handle closes
/// the request channel and lets the thread exit.
pub struct FeedWorker {
    pub requests: Sender<FetchRequest>,
    pub results: Receiver<FetchResult>,
}

/// Spawn the fetch thread. Queues are intentionally small: a user
/// hammering the load button only keeps a handful of passes in
/// flight, and the generation guard downstream drops the losers.
pub fn spawn_feed_worker(config: FeedConfig) -> Result<FeedWorker> {
    let (request_tx, request_rx) = bounded::<FetchRequest>(4);
    let (result_tx, result_rx) = bounded::<FetchResult>(4);

    thread::Builder::new()
        .name("neo-feed-worker".into())
        .spawn(move || run_fetch_loop(config, request_rx, result_tx))
        .context("failed to spawn feed worker thread")?;

    Ok(FeedWorker {
        requests: request_tx,
        results: result_rx,
    })
}

fn run_fetch_loop(
    config: FeedConfig,
    requests: Receiver<FetchRequest>,
    results: Sender<FetchResult>,
) {
    let client = match build_client(&config) {
        Ok(client) => client,
        Err(err) => {
            warn!("failed to build feed HTTP client: {err}");
            return;
        }
    };

    while let Ok(request) = requests.recv() {
        debug!(
            generation = request.generation,
            start = %request.range.start,
            end = %request.range.end,
            "fetching asteroid feed"
        );
        let outcome = fetch_records(&client, &config, &request.range);
        if let Err(ref err) = outcome {
            warn!(generation = request.generation, "feed fetch failed: {err}");
        }
        let result = FetchResult {
            generation: request.generation,
            range: request.range,
            outcome,
        };
        if results.send(result).is_err() {
            return;
        }
    }
}
