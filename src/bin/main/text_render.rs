use std::io::{self, Write};

use arena_core::render::{ArenaView, Notice};

/// Prints each requested frame of the viewer to stdout.
pub(super) struct TextRenderer {
    frames: u64,
}

impl TextRenderer {
    pub(super) const fn new() -> Self {
        Self { frames: 0 }
    }

    pub(super) fn render(&mut self, view: ArenaView<'_>) {
        self.frames = self.frames.wrapping_add(1);
        let mut out = io::stdout().lock();
        // A closed stdout only loses the frame.
        let _ = self.write_frame(&mut out, &view);
        let _ = out.flush();
    }

    fn write_frame(&self, out: &mut impl Write, view: &ArenaView<'_>) -> io::Result<()> {
        let playback = match (view.livestreaming, view.playback_remaining_ms) {
            (true, _) if view.livestream_stalled => "LIVE stalled".to_string(),
            (true, Some(remaining)) => format!("LIVE next in {}s", remaining.div_ceil(1_000)),
            (false, Some(_)) => "PAUSED".to_string(),
            (_, None) => "IDLE".to_string(),
        };
        writeln!(
            out,
            "--- frame {} | batch #{} [{}] {}{} | {}{}",
            self.frames,
            view.committed_batch,
            view.draft,
            if view.can_previous { "<" } else { "-" },
            if view.can_next { ">" } else { "-" },
            playback,
            if view.loading { " | loading" } else { "" }
        )?;

        if let Some(Notice::FetchFailed { batch_id, error }) = view.notice {
            writeln!(out, "  ! batch {} unavailable: {}", batch_id, error)?;
        }

        let Some(batch) = view.batch else {
            return writeln!(out, "  (no batch yet)");
        };

        writeln!(out, "  batch #{} orders:", batch.batch_id())?;
        for order in batch.orders() {
            writeln!(
                out,
                "    {:>6} {} sells {} {} for {} {}",
                order.id,
                order.owner,
                order.sell_amount,
                order.sell_token,
                order.buy_amount,
                order.buy_token
            )?;
        }

        writeln!(out, "  solutions:")?;
        for solution in batch.solutions() {
            let marker = if view.is_selected(solution.agent_name()) {
                '*'
            } else {
                ' '
            };
            writeln!(
                out,
                "   {} {} ({} transfers)",
                marker,
                solution.agent_name(),
                solution.transfers.len()
            )?;
        }

        writeln!(out, "  graph:")?;
        for edge in view.transfer_edges() {
            writeln!(
                out,
                "    [{}] {} -> {} {} {}",
                edge.agent,
                edge.transfer.from,
                edge.transfer.to,
                edge.transfer.amount,
                edge.transfer.token
            )?;
        }
        Ok(())
    }
}
