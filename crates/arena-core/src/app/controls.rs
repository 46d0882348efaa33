impl<IN> ArenaViewer<IN>
where
    IN: InputProvider,
{
    /// Step back one batch. No-op at batch 1.
    pub fn previous(&mut self, now_ms: u64) -> bool {
        self.navigate(NavigationIntent::Previous, now_ms)
    }

    pub fn next(&mut self, now_ms: u64) -> bool {
        self.navigate(NavigationIntent::Next, now_ms)
    }

    pub fn jump_to(&mut self, target: BatchId, now_ms: u64) -> bool {
        self.navigate(NavigationIntent::JumpTo(target), now_ms)
    }

    /// Text typed into the batch field. The sanitized draft is visible right
    /// away; the jump itself waits for the debounce window.
    pub fn edit_batch_id(&mut self, raw: &str, now_ms: u64) {
        self.batch_input.edit(raw, now_ms);
        self.pending_redraw = true;
    }

    /// Isolate one solution of the current batch and pause the livestream.
    pub fn select_solution(&mut self, agent_name: &str, now_ms: u64) -> bool {
        let Some(batch) = self.batch.as_ref() else {
            debug!("selection: ignored agent={} reason=no_batch", agent_name);
            return false;
        };
        if !self.selection.select(batch, agent_name) {
            debug!(
                "selection: ignored agent={} reason=unknown_agent batch={}",
                agent_name,
                batch.batch_id()
            );
            return false;
        }

        if self.playback.pause(now_ms) {
            info!("livestream: paused by selection agent={}", agent_name);
        }
        self.pending_redraw = true;
        true
    }

    /// Back to all solutions. Does not resume the livestream.
    pub fn clear_selection(&mut self) -> bool {
        let cleared = self.selection.clear();
        if cleared {
            self.pending_redraw = true;
        }
        cleared
    }

    /// Pause a running livestream or resume a paused one. Resuming drops the
    /// current selection. Returns whether the livestream is running afterwards.
    pub fn toggle_livestream(&mut self, now_ms: u64) -> bool {
        match self.playback.state() {
            PlaybackState::Idle => {
                debug!("livestream: toggle ignored before first batch");
            }
            PlaybackState::Running { .. } => {
                self.playback.pause(now_ms);
                info!("livestream: paused batch={}", self.batch_id);
            }
            PlaybackState::Paused { .. } => {
                self.selection.clear();
                self.playback.resume(now_ms);
                info!(
                    "livestream: resumed batch={} remaining_ms={:?}",
                    self.batch_id,
                    self.playback.remaining_ms(now_ms)
                );
            }
        }
        self.last_countdown_slot = None;
        self.pending_redraw = true;
        self.playback.is_running()
    }

    pub fn reset_timer(&mut self, now_ms: u64) {
        self.playback.reset(now_ms);
        self.last_countdown_slot = None;
        self.pending_redraw = true;
    }

    /// Cancel the countdown, the pending typed jump, and every queued or
    /// in-flight fetch. Late completions are treated as stale afterwards.
    pub fn shutdown(&mut self) {
        self.batch_input.cancel();
        self.playback.shutdown();
        self.undispatched = None;
        self.in_flight = None;
        info!("viewer: shut down batch={}", self.batch_id);
    }

    fn navigate(&mut self, intent: NavigationIntent, now_ms: u64) -> bool {
        let Some(target) = navigation::resolve(self.batch_id, intent) else {
            debug!(
                "nav: ignored intent={:?} batch={} reason=out_of_range",
                intent, self.batch_id
            );
            return false;
        };

        self.change_batch(target, BatchChangeOrigin::User, now_ms)
    }

    /// Single funnel for every batch change: clear the selection, commit the
    /// id, queue one fetch.
    fn change_batch(&mut self, target: BatchId, origin: BatchChangeOrigin, now_ms: u64) -> bool {
        if self.selection.clear() {
            self.pending_redraw = true;
        }

        let displayed = self.batch.as_ref().map(Batch::batch_id);
        let in_flight = self.in_flight.map(|request| request.batch_id);
        let already_current = match in_flight {
            Some(loading) => loading == target,
            None => displayed == Some(target),
        };
        if already_current {
            debug!("nav: batch={} already current", target);
            return false;
        }

        debug!(
            "nav: change batch {} -> {} origin={:?}",
            self.batch_id, target, origin
        );
        self.batch_id = target;
        if origin == BatchChangeOrigin::User {
            self.playback.reset(now_ms);
            self.last_countdown_slot = None;
        }
        self.issue_fetch(target);
        self.pending_redraw = true;
        true
    }
}
