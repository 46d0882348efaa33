use std::sync::atomic::{AtomicBool, Ordering};

use arena_core::{
    app::{ArenaViewer, DEFAULT_INPUT_DEBOUNCE_MS, TickResult, ViewerConfig},
    batch::BatchId,
    source::fixture::FixtureBatchSource,
};
use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Instant, Timer};
use log::{info, warn};
use static_cell::StaticCell;

use console::{ConsoleInput, InputChannel};
use fetch::{CompletionChannel, FetchDispatcher};
use text_render::TextRenderer;

#[path = "main/console.rs"]
mod console;
#[path = "main/fetch.rs"]
mod fetch;
#[path = "main/text_render.rs"]
mod text_render;

const UI_POLL_INTERVAL_MS: u64 = 1;
const FETCH_LATENCY_MIN_MS: u64 = 80;
const FETCH_LATENCY_MAX_MS: u64 = 400;
const STATS_REPORT_SECS: u64 = 30;

const AUTO_CHANGE_MS: u64 = env_u64(option_env!("ARENA_AUTO_CHANGE_MS"), 4_000);
const FIXTURE_BATCHES: u32 = env_u32(option_env!("ARENA_FIXTURE_BATCHES"), 25);

static INPUT_EVENTS: InputChannel = Channel::new();
static FETCH_COMPLETIONS: CompletionChannel = Channel::new();
static QUIT: AtomicBool = AtomicBool::new(false);
static SOURCE: StaticCell<FixtureBatchSource> = StaticCell::new();

/// Build-time knob; anything that is not a plain decimal falls back.
const fn env_u64(raw: Option<&str>, fallback: u64) -> u64 {
    let Some(raw) = raw else {
        return fallback;
    };
    let bytes = raw.as_bytes();
    if bytes.is_empty() {
        return fallback;
    }

    let mut value = 0u64;
    let mut index = 0;
    while index < bytes.len() {
        let byte = bytes[index];
        if !byte.is_ascii_digit() {
            return fallback;
        }
        value = match value.checked_mul(10) {
            Some(shifted) => match shifted.checked_add((byte - b'0') as u64) {
                Some(next) => next,
                None => return fallback,
            },
            None => return fallback,
        };
        index += 1;
    }
    value
}

const fn env_u32(raw: Option<&str>, fallback: u32) -> u32 {
    let value = env_u64(raw, fallback as u64);
    if value > u32::MAX as u64 {
        fallback
    } else {
        value as u32
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    println!("boot: arena viewer starting");

    let source: &'static FixtureBatchSource = SOURCE.init(FixtureBatchSource::new(FIXTURE_BATCHES));
    let config = ViewerConfig {
        auto_change_ms: AUTO_CHANGE_MS,
        input_debounce_ms: DEFAULT_INPUT_DEBOUNCE_MS,
        first_batch: BatchId::FIRST,
    };

    if let Err(err) = console::spawn_console_reader(&INPUT_EVENTS, &QUIT) {
        warn!("console: stdin reader unavailable: {}", err);
    }
    console::print_help();

    let mut viewer = ArenaViewer::new(ConsoleInput::new(&INPUT_EVENTS), config);
    let mut renderer = TextRenderer::new();
    let mut dispatcher = FetchDispatcher::new();

    info!(
        "Arena started: auto_change_ms={} debounce_ms={} fixture_batches={} fetch_workers={}",
        config.auto_change_ms,
        config.input_debounce_ms,
        source.last_batch(),
        fetch::FETCH_WORKERS
    );

    let loop_start = Instant::now();
    let mut report_start = Instant::now();
    let mut report_renders = 0u32;

    loop {
        let now_ms = loop_start.elapsed().as_millis();
        fetch::drain_completions(&mut viewer, &FETCH_COMPLETIONS, now_ms);

        if viewer.tick(now_ms) == TickResult::RenderRequested {
            viewer.with_view(now_ms, |view| renderer.render(view));
            report_renders = report_renders.saturating_add(1);
        }

        dispatcher.dispatch(&mut viewer, spawner, source, &FETCH_COMPLETIONS);

        if QUIT.load(Ordering::Acquire) {
            viewer.shutdown();
            info!("Arena stopped at batch={}", viewer.batch_id());
            std::process::exit(0);
        }

        let elapsed = report_start.elapsed();
        if elapsed >= Duration::from_secs(STATS_REPORT_SECS) {
            info!(
                "stats: batch={} renders={} elapsed_ms={} livestreaming={}",
                viewer.batch_id(),
                report_renders,
                elapsed.as_millis(),
                viewer.is_livestreaming()
            );
            report_renders = 0;
            report_start = Instant::now();
        }

        match select(
            FETCH_COMPLETIONS.receive(),
            Timer::after_millis(UI_POLL_INTERVAL_MS),
        )
        .await
        {
            Either::First(completion) => {
                let now_ms = loop_start.elapsed().as_millis();
                fetch::apply_completion(&mut viewer, completion, now_ms);
            }
            Either::Second(()) => {}
        }
    }
}
