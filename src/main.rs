/*
 *  main.rs
 *
 *  phatline - now playing, six characters at a time
 *  (c) 2025
 *
 *  Binary entry point: wires the configured pHAT backend to a
 *  line-delimited JSON event feed on stdin. The feed is the player
 *  integration boundary; whatever produces metadata and volume events
 *  (audiocontrol, an MPD bridge, a test script) writes one JSON object
 *  per line.
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

use anyhow::Result;
use env_logger::Env;
use log::{info, warn};
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal::unix::{signal, SignalKind};

use phatline::config;
use phatline::display::create_backend;
use phatline::frontend::MetadataDisplay;
use phatline::meta::MetadataSnapshot;
use phatline::rotary::RotaryVolume;

/// One line of the stdin event feed.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum FeedEvent {
    Metadata(MetadataSnapshot),
    Volume { level: i32 },
    Encoder { count: i32 },
    Shutdown,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = config::load()?;
    let level = cfg.log_level.clone().unwrap_or_else(|| "info".to_string());
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();
    info!("phatline {}", env!("CARGO_PKG_VERSION"));

    let display_cfg = cfg.display.clone().unwrap_or_default();
    let opts = display_cfg.render_options();
    let mut display = match create_backend(&display_cfg) {
        Ok(backend) => MetadataDisplay::new(backend, opts),
        Err(e) => {
            // Same degraded mode as a failed probe: keep consuming events.
            warn!("display backend unavailable ({e}), running disabled");
            MetadataDisplay::disabled()
        }
    };

    run_feed(&mut display).await?;
    display.shutdown().await;
    info!("phatline stopped");
    Ok(())
}

/// Multiplexes the stdin feed with Unix termination signals until either
/// asks us to stop.
async fn run_feed(display: &mut MetadataDisplay) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;
    let mut encoder = RotaryVolume::new(50);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        match serde_json::from_str::<FeedEvent>(&line) {
                            Ok(FeedEvent::Metadata(snapshot)) => display.notify(snapshot),
                            Ok(FeedEvent::Volume { level }) => display.update_volume(level),
                            Ok(FeedEvent::Encoder { count }) => {
                                if let Some(level) = encoder.update(count) {
                                    display.update_volume(level);
                                }
                            }
                            Ok(FeedEvent::Shutdown) => {
                                info!("shutdown event received");
                                break;
                            }
                            Err(e) => warn!("ignoring malformed feed event: {e}"),
                        }
                    }
                    None => {
                        info!("event feed closed");
                        break;
                    }
                }
            }
            _ = sigint.recv() => { info!("SIGINT received, shutting down"); break; }
            _ = sigterm.recv() => { info!("SIGTERM received, shutting down"); break; }
            _ = sighup.recv() => { info!("SIGHUP received, shutting down"); break; }
        }
    }
    Ok(())
}
