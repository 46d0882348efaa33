//! Quiet-period coalescing for rapid repeated calls.

/// Holds at most one pending value and releases it once no newer value has
/// arrived for `delay_ms`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Debouncer<T> {
    delay_ms: u64,
    pending: Option<(T, u64)>,
}

impl<T> Debouncer<T> {
    pub const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub const fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Replace any pending value and restart the quiet period.
    pub fn call(&mut self, value: T, now_ms: u64) {
        self.pending = Some((value, now_ms.saturating_add(self.delay_ms)));
    }

    /// Release the pending value if its quiet period has elapsed.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        let (_, due_ms) = self.pending.as_ref()?;
        if now_ms < *due_ms {
            return None;
        }
        self.pending.take().map(|(value, _)| value)
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn due_ms(&self) -> Option<u64> {
        self.pending.as_ref().map(|(_, due_ms)| *due_ms)
    }
}
