//! Batch navigation targets.

use crate::batch::BatchId;

/// What the user asked for, before it is resolved against the current batch.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NavigationIntent {
    Previous,
    Next,
    JumpTo(BatchId),
}

/// Resolve an intent to the batch that should become current, or `None` when
/// it would not move (previous at batch 1, next at the id ceiling).
pub fn resolve(current: BatchId, intent: NavigationIntent) -> Option<BatchId> {
    match intent {
        NavigationIntent::Previous => current.checked_prev(),
        NavigationIntent::Next => current.checked_next(),
        NavigationIntent::JumpTo(target) => Some(target),
    }
}

pub fn can_previous(current: BatchId) -> bool {
    resolve(current, NavigationIntent::Previous).is_some()
}

pub fn can_next(current: BatchId) -> bool {
    resolve(current, NavigationIntent::Next).is_some()
}
