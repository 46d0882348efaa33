//! Selected solution, by agent name.

use crate::batch::{Batch, Name};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SelectionState {
    selected: Option<Name>,
}

impl SelectionState {
    pub const fn new() -> Self {
        Self { selected: None }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_ref().map(|name| name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }

    /// Select a solution of `batch`. Unknown agents leave the selection as is.
    pub fn select(&mut self, batch: &Batch, agent_name: &str) -> bool {
        let Some(solution) = batch.solution(agent_name) else {
            return false;
        };
        self.selected = Some(solution.agent.name.clone());
        true
    }

    /// Returns whether anything was selected.
    pub fn clear(&mut self) -> bool {
        self.selected.take().is_some()
    }
}
