/*
 *  display/traits.rs
 *
 *  phatline - now playing, six characters at a time
 *  (c) 2025
 *
 *  Core trait definitions for display backend abstraction
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

use crate::display::error::BackendError;

/// Scroll-relevant constants of one physical display.
///
/// All widths and offsets are in native units: whole character cells for
/// the cell-matrix backend, pixel columns for the pixel-grid backend.
#[derive(Debug, Clone, Copy)]
pub struct BackendGeometry {
    /// Visible window width in native units.
    pub window_width: u32,

    /// Native units one glyph occupies (glyph width plus inter-glyph
    /// spacing for pixel backends, 1 for character backends).
    pub units_per_glyph: u32,

    /// Dwell between scroll frames.
    pub frame_interval: Duration,

    /// Multiplier applied to `frame_interval` for frame 0, a readability
    /// pause before motion begins.
    pub first_frame_dwell: u32,

    /// Units the scroll must stop short of, so a trailing spacing column
    /// never scrolls into view. 0 for character backends.
    pub trailing_margin: u32,

    /// Pause after the last frame of a pass.
    pub settle_dwell: Duration,
}

/// Capability surface implemented by each concrete display variant.
///
/// The render state machine and the scroll geometry engine consume only
/// this trait plus `geometry()`; nothing above this layer knows about I2C
/// addresses, fonts, or pixel mapping.
pub trait DisplayBackend: Send + Sync {
    /// Human-readable backend name for log lines.
    fn name(&self) -> &'static str;

    /// Non-destructive probe for the hardware. Must never panic; a probe
    /// failure degrades the display session to "disabled", silently.
    fn hardware_present(&mut self) -> bool;

    fn geometry(&self) -> BackendGeometry;

    /// Blank the display and flush.
    fn clear(&mut self) -> Result<(), BackendError>;

    /// Light every element, the power-on flash.
    fn fill(&mut self, brightness: u8) -> Result<(), BackendError>;

    /// Paint a fixed frame with no animation.
    fn render_static(&mut self, text: &str, brightness: u8) -> Result<(), BackendError>;

    /// Paint exactly one animation frame: the text shifted left by
    /// `offset` native units.
    fn render_scroll_frame(
        &mut self,
        text: &str,
        offset: u32,
        brightness: u8,
    ) -> Result<(), BackendError>;
}
