//! Free-text batch number entry.

use core::fmt::Write;

use heapless::String;

use crate::{batch::BatchId, debounce::Debouncer};

/// Room for any `u32` plus a few stray digits so overflow stays detectable.
pub const BATCH_DRAFT_BYTES: usize = 16;

pub type BatchDraft = String<BATCH_DRAFT_BYTES>;

/// Keep only ASCII decimal digits. Leading zeros collapse into the first
/// significant digit, so only numbers too large for any batch id get cut off.
pub fn sanitize_batch_id(raw: &str) -> BatchDraft {
    let mut sanitized = BatchDraft::new();
    for ch in raw.chars().filter(char::is_ascii_digit) {
        if sanitized == "0" {
            sanitized.clear();
        }
        if sanitized.push(ch).is_err() {
            break;
        }
    }
    sanitized
}

/// Draft text of the batch field plus the debounced jump it feeds.
#[derive(Clone, Debug)]
pub struct BatchIdInput {
    draft: BatchDraft,
    jump: Debouncer<BatchDraft>,
}

impl BatchIdInput {
    pub const fn new(debounce_ms: u64) -> Self {
        Self {
            draft: String::new(),
            jump: Debouncer::new(debounce_ms),
        }
    }

    pub fn draft(&self) -> &str {
        self.draft.as_str()
    }

    /// Store the sanitized text and schedule a jump when anything is left.
    pub fn edit(&mut self, raw: &str, now_ms: u64) {
        self.draft = sanitize_batch_id(raw);
        if !self.draft.is_empty() {
            self.jump.call(self.draft.clone(), now_ms);
        }
    }

    /// Debounced jump text whose quiet period has elapsed.
    pub fn poll_jump(&mut self, now_ms: u64) -> Option<BatchDraft> {
        self.jump.poll(now_ms)
    }

    /// Show the given batch in the field.
    pub fn sync_to(&mut self, batch_id: BatchId) {
        self.draft.clear();
        let _ = write!(self.draft, "{}", batch_id);
    }

    pub fn jump_pending(&self) -> bool {
        self.jump.is_pending()
    }

    pub fn cancel(&mut self) {
        let _ = self.jump.cancel();
    }
}
