//! Input abstraction layer.

pub mod mock;

use heapless::String;

use crate::batch::Name;

pub const RAW_TEXT_BYTES: usize = 32;

/// Unsanitized text from the batch field.
pub type RawText = String<RAW_TEXT_BYTES>;

/// User intents consumed by the arena viewer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InputEvent {
    Previous,
    Next,
    BatchIdText(RawText),
    SelectSolution(Name),
    ClearSelection,
    ToggleLivestream,
    ResetTimer,
}

/// Polled input provider.
pub trait InputProvider {
    type Error;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error>;
}
