/*
 *  rotary.rs
 *
 *  phatline - now playing, six characters at a time
 *  (c) 2025
 *
 *  Rotary encoder to volume level conversion. Encoders report an absolute
 *  counter; what the display pipeline wants is the resulting level.
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

/// Per-reading change cap. Guards against volume jumps when the encoder
/// skips counts between reads.
const MAX_STEP: i32 = 3;

/// Tracks a 0..=100 volume level from absolute encoder counter readings.
pub struct RotaryVolume {
    last_count: Option<i32>,
    level: i32,
}

impl RotaryVolume {
    pub fn new(initial_level: i32) -> Self {
        RotaryVolume {
            last_count: None,
            level: initial_level.clamp(0, 100),
        }
    }

    /// Seeds the reference counter without producing a change, for the
    /// first reading after startup.
    pub fn sync(&mut self, count: i32) {
        self.last_count = Some(count);
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    /// Feeds an absolute counter reading. An unseeded tracker treats the
    /// first reading as the reference point, not a turn; counters start
    /// wherever the encoder hardware left them. Returns the new level when
    /// it moved, `None` when the reading changed nothing.
    pub fn update(&mut self, count: i32) -> Option<i32> {
        let Some(prev) = self.last_count.replace(count) else {
            return None;
        };
        let change = (count - prev).clamp(-MAX_STEP, MAX_STEP);
        if change == 0 {
            return None;
        }
        let level = (self.level + change).clamp(0, 100);
        if level == self.level {
            return None;
        }
        self.level = level;
        Some(level)
    }
}
