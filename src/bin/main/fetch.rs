use arena_core::{
    app::{ArenaViewer, FetchOutcome, FetchRequest},
    batch::{Batch, BatchId},
    input::InputProvider,
    source::{BatchSource, FetchError, fixture::FixtureBatchSource},
};
use embassy_executor::Spawner;
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};
use embassy_time::Timer;
use log::{debug, trace};

use super::{FETCH_LATENCY_MAX_MS, FETCH_LATENCY_MIN_MS};

pub(super) const FETCH_WORKERS: usize = 4;

pub(super) type CompletionChannel =
    Channel<CriticalSectionRawMutex, FetchCompletion, FETCH_WORKERS>;

pub(super) struct FetchCompletion {
    pub(super) request: FetchRequest,
    pub(super) result: Result<Batch, FetchError>,
}

/// Stand-in for the network round trip: each batch id gets its own fixed
/// latency, so back-to-back requests can complete out of order.
fn simulated_latency_ms(batch_id: BatchId) -> u64 {
    let spread = FETCH_LATENCY_MAX_MS.saturating_sub(FETCH_LATENCY_MIN_MS).max(1);
    let scrambled = (batch_id.get() as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15) >> 32;
    FETCH_LATENCY_MIN_MS + scrambled % spread
}

#[embassy_executor::task(pool_size = 4)]
async fn fetch_task(
    request: FetchRequest,
    source: &'static FixtureBatchSource,
    completions: &'static CompletionChannel,
) {
    let latency_ms = simulated_latency_ms(request.batch_id);
    debug!(
        "fetch: start batch={} ticket={:?} latency_ms={}",
        request.batch_id, request.ticket, latency_ms
    );
    Timer::after_millis(latency_ms).await;

    let result = source.fetch_batch(request.batch_id);
    completions.send(FetchCompletion { request, result }).await;
}

/// Hands requests to fetch workers. While every worker is still busy with an
/// older request, the newest request waits here for the next free slot.
pub(super) struct FetchDispatcher {
    deferred: Option<FetchRequest>,
}

impl FetchDispatcher {
    pub(super) const fn new() -> Self {
        Self { deferred: None }
    }

    pub(super) fn dispatch<IN>(
        &mut self,
        viewer: &mut ArenaViewer<IN>,
        spawner: Spawner,
        source: &'static FixtureBatchSource,
        completions: &'static CompletionChannel,
    ) where
        IN: InputProvider,
    {
        if let Some(request) = viewer.take_fetch_request()
            && let Some(superseded) = self.deferred.replace(request)
        {
            debug!(
                "fetch: batch={} superseded while waiting for a worker",
                superseded.batch_id
            );
        }

        let Some(request) = self.deferred.take() else {
            return;
        };
        if !viewer.is_current_fetch(request) {
            debug!("fetch: batch={} no longer wanted", request.batch_id);
            return;
        }

        if let Err(err) = spawner.spawn(fetch_task(request, source, completions)) {
            trace!(
                "fetch: workers busy; batch={} waits ({:?})",
                request.batch_id, err
            );
            self.deferred = Some(request);
        }
    }
}

pub(super) fn apply_completion<IN>(
    viewer: &mut ArenaViewer<IN>,
    completion: FetchCompletion,
    now_ms: u64,
) where
    IN: InputProvider,
{
    let batch_id = completion.request.batch_id;
    match viewer.complete_fetch(completion.request, completion.result, now_ms) {
        FetchOutcome::Applied => debug!("fetch: batch={} shown", batch_id),
        FetchOutcome::Failed => debug!("fetch: batch={} failed; keeping current view", batch_id),
        FetchOutcome::Stale => debug!("fetch: batch={} superseded", batch_id),
    }
}

pub(super) fn drain_completions<IN>(
    viewer: &mut ArenaViewer<IN>,
    completions: &'static CompletionChannel,
    now_ms: u64,
) where
    IN: InputProvider,
{
    while let Ok(completion) = completions.try_receive() {
        apply_completion(viewer, completion, now_ms);
    }
}
