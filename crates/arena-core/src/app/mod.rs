//! Batch playback and selection controller.

use log::{debug, info, warn};

use crate::{
    batch::{Batch, BatchId},
    batch_input::BatchIdInput,
    input::{InputEvent, InputProvider},
    navigation::{self, NavigationIntent},
    playback::{PlaybackState, PlaybackTimer},
    render::{ArenaView, Notice},
    selection::SelectionState,
    source::FetchError,
};

pub const DEFAULT_AUTO_CHANGE_MS: u64 = 4_000;
pub const DEFAULT_INPUT_DEBOUNCE_MS: u64 = 600;
const COUNTDOWN_REDRAW_MS: u64 = 1_000;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ViewerConfig {
    /// Livestream interval between batches.
    pub auto_change_ms: u64,
    /// Quiet period before typed batch numbers are acted on.
    pub input_debounce_ms: u64,
    pub first_batch: BatchId,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            auto_change_ms: DEFAULT_AUTO_CHANGE_MS,
            input_debounce_ms: DEFAULT_INPUT_DEBOUNCE_MS,
            first_batch: BatchId::FIRST,
        }
    }
}

/// Identifies one issued fetch. Only the latest ticket is ever applied.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FetchTicket(u32);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub batch_id: BatchId,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FetchOutcome {
    Applied,
    Failed,
    /// Superseded by a newer navigation; dropped.
    Stale,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum BatchChangeOrigin {
    User,
    Livestream,
}

pub struct ArenaViewer<IN>
where
    IN: InputProvider,
{
    input: IN,
    config: ViewerConfig,
    batch_id: BatchId,
    batch: Option<Batch>,
    selection: SelectionState,
    playback: PlaybackTimer,
    batch_input: BatchIdInput,
    /// Newest request not yet taken by the runtime. A newer one replaces it.
    undispatched: Option<FetchRequest>,
    next_ticket: u32,
    in_flight: Option<FetchRequest>,
    notice: Option<Notice>,
    pending_redraw: bool,
    last_countdown_slot: Option<u64>,
}

include!("view.rs");
include!("input.rs");
include!("controls.rs");
include!("runtime.rs");

#[cfg(test)]
mod tests;
