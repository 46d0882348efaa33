use heapless::Deque;

use super::{InputEvent, InputProvider};

pub const MOCK_QUEUE_DEPTH: usize = 8;

/// Input source fed by hand: queued events come back one per poll, oldest
/// first. An empty queue reports no input.
#[derive(Default, Debug, Clone)]
pub struct MockInput {
    pending: Deque<InputEvent, MOCK_QUEUE_DEPTH>,
}

impl MockInput {
    pub const fn new() -> Self {
        Self {
            pending: Deque::new(),
        }
    }

    /// Hands the event back when the queue is full.
    pub fn queue(&mut self, event: InputEvent) -> Result<(), InputEvent> {
        self.pending.push_back(event)
    }

    pub fn is_drained(&self) -> bool {
        self.pending.is_empty()
    }
}

impl InputProvider for MockInput {
    type Error = core::convert::Infallible;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        Ok(self.pending.pop_front())
    }
}
