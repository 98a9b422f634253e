/*
 *  render.rs
 *
 *  phatline - now playing, six characters at a time
 *  (c) 2025
 *
 *  The cooperative render state machine. One worker per display session
 *  drains the update mailboxes, derives display text, and alternates
 *  static and scrolling phases; every wait is preemptible so fresher data
 *  cuts a phase short within one quantum.
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::time::Duration;

use log::{debug, error, info, warn};
use tokio::time::sleep;

use crate::display::{BackendError, BoxedBackend};
use crate::mailbox::{Mailbox, UpdateMessage};
use crate::meta::{LineOptions, MetadataSnapshot, RenderFrame};
use crate::scroll::ScrollPlan;

/// Granularity of preemptible waits. Bounds the staleness of displayed
/// information regardless of how long a phase's nominal dwell is.
const WAIT_QUANTUM: Duration = Duration::from_millis(100);

/// Dwell for the static player-name frame.
const PLAYER_DWELL: Duration = Duration::from_secs(10);

/// Dwell for the transient volume frame.
const VOLUME_DWELL: Duration = Duration::from_secs(3);

/// Pause between idle-loop iterations while nothing is playing.
const IDLE_WAIT: Duration = Duration::from_secs(1);

const GREETING: &str = "READY TO PLAY!";

/// How long the full-panel power-on flash stays lit.
const BOOT_FLASH: Duration = Duration::from_millis(500);

fn volume_text(level: i32) -> String {
    format!("VOL{level:>3}")
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub brightness: u8,
    pub lines: LineOptions,
    /// Scroll passes per render cycle before mailboxes are re-checked.
    pub scroll_passes: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            brightness: 128,
            lines: LineOptions::default(),
            scroll_passes: 2,
        }
    }
}

/// The render worker. Owns the backend handle exclusively; producers only
/// ever touch the mailboxes, so no lock guards any paint operation.
pub struct RenderWorker {
    backend: BoxedBackend,
    metadata_rx: Mailbox<UpdateMessage>,
    volume_rx: Mailbox<UpdateMessage>,
    opts: RenderOptions,
    last_rendered: Option<MetadataSnapshot>,
    frame: RenderFrame,
    active: bool,
}

impl RenderWorker {
    pub fn new(
        backend: BoxedBackend,
        metadata_rx: Mailbox<UpdateMessage>,
        volume_rx: Mailbox<UpdateMessage>,
        opts: RenderOptions,
    ) -> Self {
        RenderWorker {
            backend,
            metadata_rx,
            volume_rx,
            opts,
            last_rendered: None,
            frame: RenderFrame::default(),
            active: true,
        }
    }

    /// Runs until a `Shutdown` sentinel is drained from either mailbox.
    pub async fn run(mut self) {
        info!("{} render worker started", self.backend.name());
        if let Err(e) = self.boot_greeting().await {
            warn!("{} greeting failed: {e}", self.backend.name());
        }
        while self.active {
            // Failure containment boundary: a failed paint is logged and
            // the loop moves on; only an explicit shutdown ends the worker.
            if let Err(e) = self.cycle().await {
                error!("{} render cycle error: {e}", self.backend.name());
            }
        }
        if let Err(e) = self.backend.clear() {
            warn!("{} clear on shutdown failed: {e}", self.backend.name());
        }
        info!("{} render worker finished", self.backend.name());
    }

    /// Full-panel flash, then the greeting scroll. The flash makes it
    /// obvious the panel has power even when nothing is playing yet.
    async fn boot_greeting(&mut self) -> Result<(), BackendError> {
        self.backend.fill(self.opts.brightness)?;
        self.aware_sleep(BOOT_FLASH).await;
        self.backend.clear()?;
        self.scroll_once(GREETING).await
    }

    async fn cycle(&mut self) -> Result<(), BackendError> {
        // Volume feedback always outranks playback text: render it and
        // restart the iteration without touching the metadata phase.
        match self.volume_rx.drain_latest() {
            Some(UpdateMessage::Shutdown) => {
                self.active = false;
                return Ok(());
            }
            Some(UpdateMessage::Volume(level)) => return self.show_volume(level).await,
            Some(other) => warn!("volume mailbox carried {other:?}, ignoring"),
            None => {}
        }

        match self.metadata_rx.drain_latest() {
            Some(UpdateMessage::Shutdown) => {
                self.active = false;
                return Ok(());
            }
            Some(UpdateMessage::Metadata(snapshot)) => self.absorb(snapshot),
            Some(other) => warn!("metadata mailbox carried {other:?}, ignoring"),
            None => {}
        }

        // Empty display when not playing.
        if !self.last_rendered.as_ref().is_some_and(|s| s.is_playing()) {
            self.backend.clear()?;
            self.aware_sleep(IDLE_WAIT).await;
            return Ok(());
        }

        let player_line = self.frame.player_line.clone();
        if !player_line.is_empty() {
            self.backend.render_static(&player_line, self.opts.brightness)?;
            self.aware_sleep(PLAYER_DWELL).await;
        }

        let scroll_line = self.frame.scroll_line.clone();
        for _ in 0..self.opts.scroll_passes {
            if self.update_pending() {
                break;
            }
            self.scroll_once(&scroll_line).await?;
        }
        Ok(())
    }

    /// Takes a freshly drained snapshot, discarding it when it matches the
    /// last-rendered one field for field.
    fn absorb(&mut self, snapshot: MetadataSnapshot) {
        if self.last_rendered.as_ref() == Some(&snapshot) {
            debug!("unchanged snapshot drained, keeping current frame");
            return;
        }
        self.frame = RenderFrame::from_snapshot(&snapshot, &self.opts.lines);
        debug!(
            "new frame: player_line={:?} scroll_line={:?}",
            self.frame.player_line, self.frame.scroll_line
        );
        self.last_rendered = Some(snapshot);
    }

    async fn show_volume(&mut self, level: i32) -> Result<(), BackendError> {
        self.backend
            .render_static(&volume_text(level), self.opts.brightness)?;
        self.aware_sleep(VOLUME_DWELL).await;
        Ok(())
    }

    /// One scroll pass: frames at every offset of the plan, the settle
    /// dwell, then a clear. Aborts between frames when fresher data lands.
    async fn scroll_once(&mut self, line: &str) -> Result<(), BackendError> {
        if line.is_empty() {
            return Ok(());
        }
        let plan = ScrollPlan::for_text(line, &self.backend.geometry());
        for offset in plan.offsets() {
            if self.update_pending() {
                self.backend.clear()?;
                return Ok(());
            }
            self.backend
                .render_scroll_frame(line, offset, self.opts.brightness)?;
            self.aware_sleep(plan.dwell(offset)).await;
        }
        self.aware_sleep(plan.settle_dwell).await;
        self.backend.clear()?;
        Ok(())
    }

    fn update_pending(&self) -> bool {
        self.metadata_rx.is_pending() || self.volume_rx.is_pending()
    }

    /// Sleep decomposed into quanta, returning early the instant either
    /// mailbox has new data.
    async fn aware_sleep(&self, duration: Duration) -> bool {
        let quanta = (duration.as_millis() / WAIT_QUANTUM.as_millis()).max(1);
        for _ in 0..quanta {
            if self.update_pending() {
                return true;
            }
            sleep(WAIT_QUANTUM).await;
        }
        false
    }
}
