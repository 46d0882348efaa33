impl<IN> ArenaViewer<IN>
where
    IN: InputProvider,
{
    /// Build the viewer and queue the fetch for `config.first_batch`.
    pub fn new(input: IN, mut config: ViewerConfig) -> Self {
        config.auto_change_ms = config.auto_change_ms.max(1);

        let mut batch_input = BatchIdInput::new(config.input_debounce_ms);
        batch_input.sync_to(config.first_batch);

        let mut viewer = Self {
            input,
            config,
            batch_id: config.first_batch,
            batch: None,
            selection: SelectionState::new(),
            playback: PlaybackTimer::new(config.auto_change_ms),
            batch_input,
            undispatched: None,
            next_ticket: 0,
            in_flight: None,
            notice: None,
            pending_redraw: true,
            last_countdown_slot: None,
        };
        viewer.issue_fetch(config.first_batch);
        viewer
    }

    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        self.process_inputs(now_ms);
        self.tick_batch_input(now_ms);
        self.tick_playback(now_ms);

        if self.pending_redraw {
            self.pending_redraw = false;
            TickResult::RenderRequested
        } else {
            TickResult::NoRender
        }
    }

    pub fn with_view<F>(&self, now_ms: u64, f: F)
    where
        F: FnOnce(ArenaView<'_>),
    {
        f(ArenaView {
            draft: self.batch_input.draft(),
            committed_batch: self.batch_id,
            batch: self.batch.as_ref(),
            selected_solution: self.selection.selected(),
            livestreaming: self.playback.is_running(),
            livestream_stalled: self.playback.is_expired() && self.in_flight.is_none(),
            playback_remaining_ms: self.playback.remaining_ms(now_ms),
            can_previous: navigation::can_previous(self.batch_id),
            can_next: navigation::can_next(self.batch_id),
            loading: self.in_flight.is_some(),
            notice: self.notice,
        });
    }

    pub const fn config(&self) -> ViewerConfig {
        self.config
    }

    /// Committed batch id; the batch itself may still be loading.
    pub const fn batch_id(&self) -> BatchId {
        self.batch_id
    }

    pub fn batch(&self) -> Option<&Batch> {
        self.batch.as_ref()
    }

    pub fn selected_solution(&self) -> Option<&str> {
        self.selection.selected()
    }

    pub const fn playback_state(&self) -> PlaybackState {
        self.playback.state()
    }

    pub const fn is_livestreaming(&self) -> bool {
        self.playback.is_running()
    }

    pub const fn notice(&self) -> Option<Notice> {
        self.notice
    }

    pub fn draft(&self) -> &str {
        self.batch_input.draft()
    }

    pub fn input_mut(&mut self) -> &mut IN {
        &mut self.input
    }
}
