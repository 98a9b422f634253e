/*
 *  frontend.rs
 *
 *  phatline - now playing, six characters at a time
 *  (c) 2025
 *
 *  Public-facing entry points for the player integration layer: notify,
 *  update_volume, shutdown. Owns the mailboxes and the worker handle;
 *  never touches the backend directly.
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

use log::{debug, info, warn};
use tokio::task::JoinHandle;

use crate::display::BoxedBackend;
use crate::mailbox::{Mailbox, UpdateMessage};
use crate::meta::MetadataSnapshot;
use crate::render::{RenderOptions, RenderWorker};

/// One display session. Construction probes the hardware; when the probe
/// fails the session is permanently disabled and every entry point becomes
/// a no-op, so orchestration code upstream needs no special casing.
///
/// Must be constructed inside a tokio runtime: the render worker is
/// spawned here.
pub struct MetadataDisplay {
    enabled: bool,
    metadata_tx: Mailbox<UpdateMessage>,
    volume_tx: Mailbox<UpdateMessage>,
    last_notified: Option<MetadataSnapshot>,
    worker: Option<JoinHandle<()>>,
}

impl MetadataDisplay {
    pub fn new(mut backend: BoxedBackend, opts: RenderOptions) -> Self {
        if !backend.hardware_present() {
            warn!("{} not detected, display disabled", backend.name());
            return Self::disabled();
        }
        info!("{} detected, enabling display output", backend.name());
        let metadata_tx = Mailbox::new();
        let volume_tx = Mailbox::new();
        let worker = RenderWorker::new(backend, metadata_tx.clone(), volume_tx.clone(), opts);
        MetadataDisplay {
            enabled: true,
            metadata_tx,
            volume_tx,
            last_notified: None,
            worker: Some(tokio::spawn(worker.run())),
        }
    }

    /// A session with no hardware behind it. Used when the probe fails and
    /// when the bus device cannot even be opened.
    pub fn disabled() -> Self {
        MetadataDisplay {
            enabled: false,
            metadata_tx: Mailbox::new(),
            volume_tx: Mailbox::new(),
            last_notified: None,
            worker: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enqueues a now-playing snapshot. Snapshots structurally identical
    /// to the previous one are suppressed here, before they ever reach the
    /// mailbox.
    pub fn notify(&mut self, snapshot: MetadataSnapshot) {
        if !self.enabled {
            return;
        }
        if self.last_notified.as_ref() == Some(&snapshot) {
            debug!("unchanged snapshot suppressed: {snapshot:?}");
            return;
        }
        self.metadata_tx.send(UpdateMessage::Metadata(snapshot.clone()));
        self.last_notified = Some(snapshot);
    }

    /// Enqueues a transient volume level.
    pub fn update_volume(&mut self, level: i32) {
        if !self.enabled {
            return;
        }
        self.volume_tx.send(UpdateMessage::Volume(level));
    }

    /// Stops the render worker and waits for it to exit. Idempotent: safe
    /// to call repeatedly and after the worker has already finished.
    pub async fn shutdown(&mut self) {
        if !self.enabled {
            return;
        }
        self.metadata_tx.send(UpdateMessage::Shutdown);
        self.volume_tx.send(UpdateMessage::Shutdown);
        if let Some(handle) = self.worker.take() {
            if let Err(e) = handle.await {
                warn!("render worker ended abnormally: {e}");
            }
        }
    }
}

impl Drop for MetadataDisplay {
    fn drop(&mut self) {
        // shutdown() is the graceful path; a still-running worker here
        // means the owner never called it, so abort rather than leak.
        if let Some(handle) = self.worker.take() {
            handle.abort();
            debug!("render worker aborted on drop");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{BackendError, BackendGeometry, DisplayBackend};
    use crate::meta::PlayerState;
    use std::time::Duration;

    struct NullBackend {
        present: bool,
    }

    impl DisplayBackend for NullBackend {
        fn name(&self) -> &'static str {
            "null"
        }
        fn hardware_present(&mut self) -> bool {
            self.present
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
            Ok(())
        }
        fn fill(&mut self, _brightness: u8) -> Result<(), BackendError> {
            Ok(())
        }
        fn render_static(&mut self, _text: &str, _brightness: u8) -> Result<(), BackendError> {
            Ok(())
        }
        fn render_scroll_frame(
            &mut self,
            _text: &str,
            _offset: u32,
            _brightness: u8,
        ) -> Result<(), BackendError> {
            Ok(())
        }
    }

    fn snapshot() -> MetadataSnapshot {
        MetadataSnapshot {
            player_name: Some("mpd".to_string()),
            artist: Some("Orbital".to_string()),
            title: Some("Halcyon".to_string()),
            player_state: PlayerState::Playing,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn identical_snapshot_never_reaches_the_mailbox() {
        let mut display =
            MetadataDisplay::new(Box::new(NullBackend { present: true }), RenderOptions::default());
        // No awaits before the asserts, so the worker has not run yet and
        // we can play consumer against the shared slot directly.
        display.notify(snapshot());
        assert!(display.metadata_tx.is_pending());
        display.metadata_tx.drain_latest();
        display.notify(snapshot());
        assert!(!display.metadata_tx.is_pending());
        display.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn absent_hardware_disables_all_entry_points() {
        let mut display = MetadataDisplay::new(
            Box::new(NullBackend { present: false }),
            RenderOptions::default(),
        );
        assert!(!display.is_enabled());
        display.notify(snapshot());
        display.update_volume(40);
        assert!(!display.metadata_tx.is_pending());
        assert!(!display.volume_tx.is_pending());
        display.shutdown().await;
        display.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_is_idempotent() {
        let mut display =
            MetadataDisplay::new(Box::new(NullBackend { present: true }), RenderOptions::default());
        display.shutdown().await;
        assert!(display.worker.is_none());
        display.shutdown().await;
        display.update_volume(10);
    }
}
