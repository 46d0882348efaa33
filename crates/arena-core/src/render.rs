//! Read-only view models handed to the rendering layer.

use crate::{
    batch::{Batch, BatchId, Solution, Transfer},
    source::FetchError,
};

/// Non-fatal condition the renderer should surface.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Notice {
    FetchFailed { batch_id: BatchId, error: FetchError },
}

/// Transfer annotated with the solution it belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TransferEdge<'a> {
    pub agent: &'a str,
    pub transfer: &'a Transfer,
}

#[derive(Clone, Copy, Debug)]
pub struct ArenaView<'a> {
    /// Sanitized content of the batch field.
    pub draft: &'a str,
    /// Batch the viewer has committed to; may still be loading.
    pub committed_batch: BatchId,
    pub batch: Option<&'a Batch>,
    pub selected_solution: Option<&'a str>,
    pub livestreaming: bool,
    /// The countdown fired but the advance it triggered did not land.
    pub livestream_stalled: bool,
    pub playback_remaining_ms: Option<u64>,
    pub can_previous: bool,
    pub can_next: bool,
    pub loading: bool,
    pub notice: Option<Notice>,
}

impl<'a> ArenaView<'a> {
    /// Solutions for the graph: all of them, or only the selected one.
    pub fn visible_solutions(&self) -> impl Iterator<Item = &'a Solution> + 'a {
        let selected = self.selected_solution;
        self.batch
            .into_iter()
            .flat_map(|batch| batch.solutions().iter())
            .filter(move |solution| selected.is_none_or(|name| solution.agent_name() == name))
    }

    pub fn transfer_edges(&self) -> impl Iterator<Item = TransferEdge<'a>> + 'a {
        self.visible_solutions().flat_map(|solution| {
            solution.transfers.iter().map(move |transfer| TransferEdge {
                agent: solution.agent_name(),
                transfer,
            })
        })
    }

    pub fn is_selected(&self, agent_name: &str) -> bool {
        self.selected_solution == Some(agent_name)
    }
}
