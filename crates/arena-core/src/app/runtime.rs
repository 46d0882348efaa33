impl<IN> ArenaViewer<IN>
where
    IN: InputProvider,
{
    /// Fetch the runtime should perform. Requests superseded before they were
    /// taken are never handed out.
    pub fn take_fetch_request(&mut self) -> Option<FetchRequest> {
        self.undispatched.take()
    }

    pub fn has_pending_fetch(&self) -> bool {
        self.undispatched.is_some()
    }

    /// Whether `request` is still the one the viewer is waiting for.
    pub fn is_current_fetch(&self, request: FetchRequest) -> bool {
        self.in_flight == Some(request)
    }

    /// Report the result of a fetch obtained from [`Self::take_fetch_request`].
    pub fn complete_fetch(
        &mut self,
        request: FetchRequest,
        result: Result<Batch, FetchError>,
        now_ms: u64,
    ) -> FetchOutcome {
        if !self.is_current_fetch(request) {
            debug!(
                "fetch: dropping stale completion batch={} ticket={:?}",
                request.batch_id, request.ticket
            );
            return FetchOutcome::Stale;
        }
        self.in_flight = None;

        let result = result.and_then(|batch| {
            if batch.batch_id() == request.batch_id {
                Ok(batch)
            } else {
                Err(FetchError::Mismatch)
            }
        });

        match result {
            Ok(batch) => {
                self.apply_batch(batch, now_ms);
                FetchOutcome::Applied
            }
            Err(error) => {
                self.reject_fetch(request.batch_id, error);
                FetchOutcome::Failed
            }
        }
    }

    fn issue_fetch(&mut self, batch_id: BatchId) {
        let request = FetchRequest {
            ticket: FetchTicket(self.next_ticket),
            batch_id,
        };
        self.next_ticket = self.next_ticket.wrapping_add(1);

        if let Some(dropped) = self.undispatched.replace(request) {
            debug!(
                "fetch: batch={} superseded before dispatch",
                dropped.batch_id
            );
        }
        self.in_flight = Some(request);
    }

    fn apply_batch(&mut self, batch: Batch, now_ms: u64) {
        let batch_id = batch.batch_id();
        info!(
            "fetch: applied batch={} orders={} solutions={}",
            batch_id,
            batch.orders().len(),
            batch.solutions().len()
        );

        self.selection.clear();
        self.batch = Some(batch);
        self.batch_id = batch_id;
        self.notice = None;
        if !self.batch_input.jump_pending() {
            self.batch_input.sync_to(batch_id);
        }
        self.playback.on_batch_changed(now_ms);
        self.last_countdown_slot = None;
        self.pending_redraw = true;
    }

    fn reject_fetch(&mut self, batch_id: BatchId, error: FetchError) {
        warn!("fetch: batch={} failed: {}", batch_id, error);
        self.notice = Some(Notice::FetchFailed { batch_id, error });

        // Navigation continues from what is on screen.
        if let Some(displayed) = self.batch.as_ref().map(Batch::batch_id) {
            self.batch_id = displayed;
        }
        if !self.batch_input.jump_pending() {
            self.batch_input.sync_to(self.batch_id);
        }
        self.pending_redraw = true;
    }

    fn tick_batch_input(&mut self, now_ms: u64) {
        let Some(text) = self.batch_input.poll_jump(now_ms) else {
            return;
        };

        match BatchId::parse(text.as_str()) {
            Some(target) => {
                let _ = self.jump_to(target, now_ms);
            }
            None => debug!("nav: ignored typed batch {:?}", text.as_str()),
        }
    }

    fn tick_playback(&mut self, now_ms: u64) {
        if self.playback.poll(now_ms) {
            match navigation::resolve(self.batch_id, NavigationIntent::Next) {
                Some(target) => {
                    debug!("livestream: countdown expired; advancing to batch={}", target);
                    let _ = self.change_batch(target, BatchChangeOrigin::Livestream, now_ms);
                }
                None => debug!("livestream: countdown expired at last representable batch"),
            }
            return;
        }

        if !self.playback.is_running() {
            return;
        }
        let slot = self
            .playback
            .remaining_ms(now_ms)
            .unwrap_or(0)
            .div_ceil(COUNTDOWN_REDRAW_MS);
        if self.last_countdown_slot != Some(slot) {
            self.last_countdown_slot = Some(slot);
            self.pending_redraw = true;
        }
    }
}
