/*
 *  meta.rs
 *
 *  phatline - now playing, six characters at a time
 *  (c) 2025
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

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    Playing,
    Paused,
    Stopped,
    #[serde(other)]
    Unknown,
}

/// One complete now-playing report from the player integration layer.
/// Produced whole, never partially mutated; structural equality across all
/// four fields is what drives de-duplication.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataSnapshot {
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    pub player_state: PlayerState,
}

impl MetadataSnapshot {
    pub fn is_playing(&self) -> bool {
        self.player_state == PlayerState::Playing
    }
}

/// Which parts of a snapshot make it onto the display. Carried over from
/// the plugin configuration; all on by default.
#[derive(Debug, Clone, Copy)]
pub struct LineOptions {
    pub show_player: bool,
    pub show_artist: bool,
    pub show_title: bool,
}

impl Default for LineOptions {
    fn default() -> Self {
        LineOptions {
            show_player: true,
            show_artist: true,
            show_title: true,
        }
    }
}

/// Friendlier label for line-input players.
fn player_alias(name: &str) -> &str {
    match name {
        "alsaloop" => "aux",
        _ => name,
    }
}

/// Display text derived from one `MetadataSnapshot`. Transient: recomputed
/// on every fresh drain, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderFrame {
    pub player_line: String,
    pub scroll_line: String,
}

impl RenderFrame {
    /// Builds the static player line and the scrolling "ARTIST - TITLE"
    /// line. Empty components are omitted along with the separator.
    pub fn from_snapshot(snapshot: &MetadataSnapshot, opts: &LineOptions) -> Self {
        let mut player_line = String::new();
        let mut scroll_line = String::new();

        if opts.show_player {
            if let Some(name) = snapshot.player_name.as_deref() {
                player_line.push_str(player_alias(name));
            }
        }

        let artist = snapshot.artist.as_deref().filter(|a| !a.is_empty());
        let title = snapshot.title.as_deref().filter(|t| !t.is_empty());

        if opts.show_artist {
            if let Some(artist) = artist {
                scroll_line.push_str(artist);
            }
        }
        if opts.show_artist && artist.is_some() && opts.show_title && title.is_some() {
            scroll_line.push_str(" - ");
        }
        if opts.show_title {
            if let Some(title) = title {
                scroll_line.push_str(title);
            }
        }

        RenderFrame {
            player_line: player_line.to_uppercase(),
            scroll_line: scroll_line.to_uppercase(),
        }
    }
}
