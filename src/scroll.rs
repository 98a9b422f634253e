/*
 *  scroll.rs
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

use std::ops::RangeInclusive;
use std::time::Duration;

use crate::display::BackendGeometry;

/// Per-cycle scroll schedule for one line of text on one backend.
///
/// The text occupies `chars * units_per_glyph` native units; the first
/// `window_width` units fit without scrolling, and pixel backends keep a
/// trailing margin so the final spacing column never scrolls into view.
/// Frame `i` renders the content shifted left by `i` native units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollPlan {
    pub steps: u32,
    frame_interval: Duration,
    first_dwell: Duration,
    pub settle_dwell: Duration,
}

impl ScrollPlan {
    pub fn for_text(text: &str, geometry: &BackendGeometry) -> Self {
        let content = text.chars().count() as i64 * geometry.units_per_glyph as i64;
        let steps = content - geometry.window_width as i64 - geometry.trailing_margin as i64;
        ScrollPlan {
            steps: steps.max(0) as u32,
            frame_interval: geometry.frame_interval,
            first_dwell: geometry.frame_interval * geometry.first_frame_dwell,
            settle_dwell: geometry.settle_dwell,
        }
    }

    /// Frame offsets for one pass, in native units. Always yields at least
    /// offset 0: text that fits the window produces a single static frame.
    pub fn offsets(&self) -> RangeInclusive<u32> {
        0..=self.steps
    }

    /// How long frame `offset` stays up. Frame 0 dwells longer so the line
    /// is readable before motion begins.
    pub fn dwell(&self, offset: u32) -> Duration {
        if offset == 0 {
            self.first_dwell
        } else {
            self.frame_interval
        }
    }
}
