//! Livestream countdown that advances to the next batch.
//!
//! The timer is a single state value, so every transition replaces whatever
//! countdown was pending before it; there is never more than one deadline.

use log::debug;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlaybackState {
    /// No batch loaded yet.
    Idle,
    /// Counting down `budget_ms` from `started_ms`. `armed` drops to `false`
    /// after the countdown expired and stays there until the next batch change.
    Running {
        started_ms: u64,
        budget_ms: u64,
        armed: bool,
    },
    Paused {
        remaining_ms: u64,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PlaybackTimer {
    interval_ms: u64,
    state: PlaybackState,
}

impl PlaybackTimer {
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: if interval_ms == 0 { 1 } else { interval_ms },
            state: PlaybackState::Idle,
        }
    }

    pub const fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub const fn state(&self) -> PlaybackState {
        self.state
    }

    pub const fn is_running(&self) -> bool {
        matches!(self.state, PlaybackState::Running { .. })
    }

    pub const fn is_paused(&self) -> bool {
        matches!(self.state, PlaybackState::Paused { .. })
    }

    /// Running, but the countdown already fired and nothing restarted it yet.
    pub const fn is_expired(&self) -> bool {
        matches!(self.state, PlaybackState::Running { armed: false, .. })
    }

    /// A new batch is current: start (from `Idle`) or restart with a full
    /// interval. A paused timer stays paused with a full interval banked.
    pub fn on_batch_changed(&mut self, now_ms: u64) {
        self.state = match self.state {
            PlaybackState::Idle | PlaybackState::Running { .. } => self.full_countdown(now_ms),
            PlaybackState::Paused { .. } => PlaybackState::Paused {
                remaining_ms: self.interval_ms,
            },
        };
    }

    /// Freeze the countdown. Returns `false` unless it was running.
    pub fn pause(&mut self, now_ms: u64) -> bool {
        if !self.is_running() {
            return false;
        }
        let remaining_ms = self.remaining_ms(now_ms).unwrap_or(0);
        debug!("playback: paused remaining_ms={}", remaining_ms);
        self.state = PlaybackState::Paused { remaining_ms };
        true
    }

    /// Continue from the banked remaining time. Returns `false` unless paused.
    pub fn resume(&mut self, now_ms: u64) -> bool {
        let PlaybackState::Paused { remaining_ms } = self.state else {
            return false;
        };
        debug!("playback: resumed remaining_ms={}", remaining_ms);
        self.state = PlaybackState::Running {
            started_ms: now_ms,
            budget_ms: remaining_ms,
            armed: true,
        };
        true
    }

    /// Bank a full interval again without changing running/paused.
    pub fn reset(&mut self, now_ms: u64) {
        self.state = match self.state {
            PlaybackState::Idle => PlaybackState::Idle,
            PlaybackState::Running { .. } => self.full_countdown(now_ms),
            PlaybackState::Paused { .. } => PlaybackState::Paused {
                remaining_ms: self.interval_ms,
            },
        };
    }

    /// Report expiry exactly once per armed countdown.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let PlaybackState::Running {
            started_ms,
            budget_ms,
            armed: true,
        } = self.state
        else {
            return false;
        };

        if now_ms.saturating_sub(started_ms) < budget_ms {
            return false;
        }

        self.state = PlaybackState::Running {
            started_ms,
            budget_ms,
            armed: false,
        };
        true
    }

    /// Time left before the next expiry; `None` while idle.
    pub fn remaining_ms(&self, now_ms: u64) -> Option<u64> {
        match self.state {
            PlaybackState::Idle => None,
            PlaybackState::Running {
                started_ms,
                budget_ms,
                ..
            } => Some(budget_ms.saturating_sub(now_ms.saturating_sub(started_ms))),
            PlaybackState::Paused { remaining_ms } => Some(remaining_ms),
        }
    }

    pub fn shutdown(&mut self) {
        self.state = PlaybackState::Idle;
    }

    const fn full_countdown(&self, now_ms: u64) -> PlaybackState {
        PlaybackState::Running {
            started_ms: now_ms,
            budget_ms: self.interval_ms,
            armed: true,
        }
    }
}
