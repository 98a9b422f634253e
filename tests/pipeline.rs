/*
 *  tests/pipeline.rs
 *
 *  Integration tests for the rendering pipeline: mailboxes, render state
 *  machine, and front-end driven end to end against a recording backend.
 *
 *  phatline - now playing, six characters at a time
 *  (c) 2025
 */

use std::sync::{Arc, Mutex};
use std::time::Duration;

use phatline::display::{BackendError, BackendGeometry, DisplayBackend};
use phatline::frontend::MetadataDisplay;
use phatline::meta::{MetadataSnapshot, PlayerState};
use phatline::render::RenderOptions;

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Clear,
    Fill,
    Static(String),
    Frame { text: String, offset: u32 },
}

/// Records every paint call; geometry mimics the six-cell character
/// backend so scroll step counts are easy to reason about. Static paints
/// fail while `fail_statics` is nonzero, decrementing once per call.
struct MockBackend {
    log: Arc<Mutex<Vec<Op>>>,
    fail_statics: Arc<Mutex<u32>>,
}

impl MockBackend {
    fn new() -> (Self, Arc<Mutex<Vec<Op>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let backend = MockBackend {
            log: log.clone(),
            fail_statics: Arc::new(Mutex::new(0)),
        };
        (backend, log)
    }

    fn record(&self, op: Op) {
        self.log.lock().unwrap().push(op);
    }
}

impl DisplayBackend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn hardware_present(&mut self) -> bool {
        true
    }

    fn geometry(&self) -> BackendGeometry {
        BackendGeometry {
            window_width: 6,
            units_per_glyph: 1,
            frame_interval: Duration::from_millis(200),
            first_frame_dwell: 4,
            trailing_margin: 0,
            settle_dwell: Duration::from_millis(1800),
        }
    }

    fn clear(&mut self) -> Result<(), BackendError> {
        self.record(Op::Clear);
        Ok(())
    }

    fn fill(&mut self, _brightness: u8) -> Result<(), BackendError> {
        self.record(Op::Fill);
        Ok(())
    }

    fn render_static(&mut self, text: &str, _brightness: u8) -> Result<(), BackendError> {
        let mut failures = self.fail_statics.lock().unwrap();
        if *failures > 0 {
            *failures -= 1;
            return Err(BackendError::Bus("write failed".to_string()));
        }
        drop(failures);
        self.record(Op::Static(text.to_string()));
        Ok(())
    }

    fn render_scroll_frame(
        &mut self,
        text: &str,
        offset: u32,
        _brightness: u8,
    ) -> Result<(), BackendError> {
        self.record(Op::Frame {
            text: text.to_string(),
            offset,
        });
        Ok(())
    }
}

fn ops(log: &Arc<Mutex<Vec<Op>>>) -> Vec<Op> {
    log.lock().unwrap().clone()
}

fn snapshot(state: PlayerState) -> MetadataSnapshot {
    MetadataSnapshot {
        player_name: Some("squeezelite".to_string()),
        artist: Some("ABC".to_string()),
        title: Some("DE".to_string()),
        player_state: state,
    }
}

#[tokio::test(start_paused = true)]
async fn volume_renders_before_playback_text() {
    let (backend, log) = MockBackend::new();
    let mut display = MetadataDisplay::new(Box::new(backend), RenderOptions::default());
    // Both pending before the worker gets a chance to run.
    display.notify(snapshot(PlayerState::Playing));
    display.update_volume(55);
    tokio::time::sleep(Duration::from_secs(30)).await;

    let ops = ops(&log);
    let volume = ops
        .iter()
        .position(|op| matches!(op, Op::Static(t) if t == "VOL 55"))
        .expect("volume frame was never painted");
    let player = ops
        .iter()
        .position(|op| matches!(op, Op::Static(t) if t == "SQUEEZELITE"))
        .expect("player frame was never painted");
    assert!(volume < player, "volume frame must render first: {ops:?}");
    display.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn bursts_coalesce_to_the_latest_volume() {
    let (backend, log) = MockBackend::new();
    let mut display = MetadataDisplay::new(Box::new(backend), RenderOptions::default());
    display.update_volume(1);
    display.update_volume(2);
    display.update_volume(3);
    tokio::time::sleep(Duration::from_secs(5)).await;

    let ops = ops(&log);
    assert!(ops.contains(&Op::Static("VOL  3".to_string())), "{ops:?}");
    assert!(!ops.contains(&Op::Static("VOL  1".to_string())));
    assert!(!ops.contains(&Op::Static("VOL  2".to_string())));
    display.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn render_cycle_is_static_then_two_scroll_passes() {
    let (backend, log) = MockBackend::new();
    let mut display = MetadataDisplay::new(Box::new(backend), RenderOptions::default());
    display.notify(snapshot(PlayerState::Playing));
    tokio::time::sleep(Duration::from_secs(25)).await;

    let ops = ops(&log);
    let player = ops
        .iter()
        .position(|op| matches!(op, Op::Static(t) if t == "SQUEEZELITE"))
        .expect("player frame was never painted");
    let first_frame = ops
        .iter()
        .position(|op| matches!(op, Op::Frame { .. }))
        .expect("no scroll frames painted");
    assert!(player < first_frame);

    // "ABC - DE" is 8 characters in a 6-cell window: offsets 0..=2,
    // scrolled twice per cycle.
    let offsets: Vec<u32> = ops
        .iter()
        .filter_map(|op| match op {
            Op::Frame { text, offset } if text == "ABC - DE" => Some(*offset),
            _ => None,
        })
        .collect();
    assert!(
        offsets.starts_with(&[0, 1, 2, 0, 1, 2]),
        "unexpected scroll sequence: {offsets:?}"
    );
    display.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn stopped_player_clears_and_stays_idle() {
    let (backend, log) = MockBackend::new();
    let mut display = MetadataDisplay::new(Box::new(backend), RenderOptions::default());
    display.notify(snapshot(PlayerState::Stopped));
    tokio::time::sleep(Duration::from_secs(5)).await;

    let idle_ops = ops(&log);
    assert!(idle_ops.contains(&Op::Clear));
    assert!(
        idle_ops
            .iter()
            .all(|op| !matches!(op, Op::Static(_) | Op::Frame { .. })),
        "no text while stopped: {idle_ops:?}"
    );

    display.notify(snapshot(PlayerState::Playing));
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(
        ops(&log)
            .iter()
            .any(|op| matches!(op, Op::Static(t) if t == "SQUEEZELITE"))
    );
    display.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn fresh_data_preempts_a_long_static_dwell() {
    let (backend, log) = MockBackend::new();
    let mut display = MetadataDisplay::new(Box::new(backend), RenderOptions::default());
    display.notify(snapshot(PlayerState::Playing));
    // Let the worker settle into the 10 second player-name dwell.
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(
        ops(&log)
            .iter()
            .any(|op| matches!(op, Op::Static(t) if t == "SQUEEZELITE"))
    );

    let before = ops(&log).len();
    display.update_volume(42);
    // One quantum plus slack, nowhere near the remaining 8 seconds.
    tokio::time::sleep(Duration::from_millis(300)).await;
    let after = ops(&log);
    assert!(
        after[before..].contains(&Op::Static("VOL 42".to_string())),
        "dwell was not preempted: {after:?}"
    );
    display.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn boot_flashes_the_panel_before_the_greeting() {
    let (backend, log) = MockBackend::new();
    let mut display = MetadataDisplay::new(Box::new(backend), RenderOptions::default());
    tokio::time::sleep(Duration::from_secs(10)).await;

    let ops = ops(&log);
    assert_eq!(ops.first(), Some(&Op::Fill), "{ops:?}");
    assert_eq!(ops.get(1), Some(&Op::Clear));
    // 14 characters in a 6-cell window: the greeting scrolls 0..=8.
    let greeting = |offset| Op::Frame {
        text: "READY TO PLAY!".to_string(),
        offset,
    };
    assert!(ops.contains(&greeting(0)), "{ops:?}");
    assert!(ops.contains(&greeting(8)), "{ops:?}");
    display.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn failed_paint_is_contained_and_the_worker_recovers() {
    let (backend, log) = MockBackend::new();
    *backend.fail_statics.lock().unwrap() = 1;
    let mut display = MetadataDisplay::new(Box::new(backend), RenderOptions::default());
    display.notify(snapshot(PlayerState::Playing));
    tokio::time::sleep(Duration::from_secs(20)).await;

    // The first player-line paint fails; the cycle after it succeeds and
    // the scroll phase still runs.
    let seen = ops(&log);
    assert!(
        seen.iter()
            .any(|op| matches!(op, Op::Static(t) if t == "SQUEEZELITE")),
        "worker never recovered: {seen:?}"
    );
    assert!(
        seen.iter()
            .any(|op| matches!(op, Op::Frame { text, .. } if text == "ABC - DE")),
        "scroll phase never ran: {seen:?}"
    );

    display.shutdown().await;
    assert_eq!(ops(&log).last(), Some(&Op::Clear));
}

#[tokio::test(start_paused = true)]
async fn shutdown_clears_and_tolerates_repeats() {
    let (backend, log) = MockBackend::new();
    let mut display = MetadataDisplay::new(Box::new(backend), RenderOptions::default());
    display.notify(snapshot(PlayerState::Playing));
    tokio::time::sleep(Duration::from_secs(1)).await;

    display.shutdown().await;
    let ops_at_exit = ops(&log);
    assert_eq!(ops_at_exit.last(), Some(&Op::Clear));

    // Repeat calls after the worker is gone are no-ops.
    display.shutdown().await;
    display.update_volume(10);
    display.shutdown().await;
    assert_eq!(ops(&log).len(), ops_at_exit.len());
}
