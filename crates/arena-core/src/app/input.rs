impl<IN> ArenaViewer<IN>
where
    IN: InputProvider,
{
    fn process_inputs(&mut self, now_ms: u64) {
        loop {
            match self.input.poll_event() {
                Ok(Some(event)) => self.apply_input_event(event, now_ms),
                Ok(None) => break,
                Err(_) => {
                    warn!("input: provider error; skipping remaining events this tick");
                    break;
                }
            }
        }
    }

    fn apply_input_event(&mut self, event: InputEvent, now_ms: u64) {
        match event {
            InputEvent::Previous => {
                let _ = self.previous(now_ms);
            }
            InputEvent::Next => {
                let _ = self.next(now_ms);
            }
            InputEvent::BatchIdText(text) => self.edit_batch_id(text.as_str(), now_ms),
            InputEvent::SelectSolution(name) => {
                let _ = self.select_solution(name.as_str(), now_ms);
            }
            InputEvent::ClearSelection => {
                let _ = self.clear_selection();
            }
            InputEvent::ToggleLivestream => {
                let _ = self.toggle_livestream(now_ms);
            }
            InputEvent::ResetTimer => self.reset_timer(now_ms),
        }
    }
}
