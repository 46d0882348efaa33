use std::{
    io::{self, BufRead},
    sync::atomic::{AtomicBool, Ordering},
    thread,
};

use arena_core::input::{InputEvent, InputProvider};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};
use heapless::String;
use log::{info, warn};

const INPUT_QUEUE_DEPTH: usize = 16;

pub(super) type InputChannel = Channel<CriticalSectionRawMutex, InputEvent, INPUT_QUEUE_DEPTH>;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) enum ConsoleCommand {
    Input(InputEvent),
    Help,
    Quit,
}

/// Keeps as many whole characters as fit.
fn truncated<const N: usize>(text: &str) -> String<N> {
    let mut out = String::new();
    for ch in text.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

pub(super) fn parse_command(line: &str) -> Option<ConsoleCommand> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let event = match word {
        "p" | "prev" => InputEvent::Previous,
        "n" | "next" => InputEvent::Next,
        "b" | "batch" => InputEvent::BatchIdText(truncated(rest)),
        "s" | "select" if !rest.is_empty() => InputEvent::SelectSolution(truncated(rest)),
        "a" | "all" => InputEvent::ClearSelection,
        "l" | "live" => InputEvent::ToggleLivestream,
        "r" | "reset" => InputEvent::ResetTimer,
        "h" | "help" | "?" => return Some(ConsoleCommand::Help),
        "q" | "quit" => return Some(ConsoleCommand::Quit),
        _ => return None,
    };
    Some(ConsoleCommand::Input(event))
}

pub(super) fn print_help() {
    println!("commands:");
    println!("  p | prev            previous batch");
    println!("  n | next            next batch");
    println!("  b <id>              type into the batch field");
    println!("  s <agent>           show only that agent's solution");
    println!("  a | all             show every solution");
    println!("  l | live            pause or resume the livestream");
    println!("  r | reset           restart the countdown");
    println!("  q | quit");
}

/// Reads commands from stdin on a plain thread and forwards them to the
/// executor through `events`. EOF stops reading but leaves the viewer running.
pub(super) fn spawn_console_reader(
    events: &'static InputChannel,
    quit: &'static AtomicBool,
) -> io::Result<()> {
    thread::Builder::new()
        .name("console".into())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                match parse_command(&line) {
                    Some(ConsoleCommand::Input(event)) => {
                        if events.try_send(event).is_err() {
                            warn!("console: input queue full; dropping command");
                        }
                    }
                    Some(ConsoleCommand::Help) => print_help(),
                    Some(ConsoleCommand::Quit) => {
                        quit.store(true, Ordering::Release);
                        break;
                    }
                    None if line.trim().is_empty() => {}
                    None => info!("console: unknown command {:?}", line.trim()),
                }
            }
        })?;
    Ok(())
}

/// Input provider draining the console channel.
pub(super) struct ConsoleInput {
    events: &'static InputChannel,
}

impl ConsoleInput {
    pub(super) const fn new(events: &'static InputChannel) -> Self {
        Self { events }
    }
}

impl InputProvider for ConsoleInput {
    type Error = core::convert::Infallible;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        Ok(self.events.try_receive().ok())
    }
}
