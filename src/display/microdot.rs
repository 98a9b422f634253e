/*
 *  display/microdot.rs
 *
 *  phatline - now playing, six characters at a time
 *  (c) 2025
 *
 *  Pimoroni Micro Dot pHAT backend: six 5x7 character cells driven by
 *  three IS31FL3730 matrix controllers on the I2C bus.
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

use embedded_hal::i2c::I2c;
use linux_embedded_hal::I2cdev;
use log::debug;

use crate::display::error::BackendError;
use crate::display::traits::{BackendGeometry, DisplayBackend};
use crate::font::glyph_5x7;

/// Character cells across the board.
pub const CELLS: usize = 6;

// Left-to-right cell pairs live on these controller addresses.
const CHIP_ADDRS: [u8; 3] = [0x63, 0x62, 0x61];

// IS31FL3730 register map
const REG_MODE: u8 = 0x00;
const REG_MATRIX_1: u8 = 0x01;
const REG_UPDATE: u8 = 0x0c;
const REG_OPTS: u8 = 0x0d;
const REG_MATRIX_2: u8 = 0x0e;
const REG_BRIGHTNESS: u8 = 0x19;

const MODE_DUAL_MATRIX: u8 = 0b0001_1000;
const OPTS_34MA: u8 = 0b0000_1110;
const BRIGHTNESS_MAX: u8 = 127;

/// Maps `text` starting at character `offset` onto the six cells, padding
/// with blanks past the end of the string.
fn rasterize_cells(text: &str, offset: usize) -> [[u8; 5]; CELLS] {
    let mut cells = [[0u8; 5]; CELLS];
    for (cell, c) in text.chars().skip(offset).take(CELLS).enumerate() {
        cells[cell] = glyph_5x7(c);
    }
    cells
}

/// The two matrices on each controller are wired differently: matrix 1
/// takes column bytes, matrix 2 takes row bytes. Transpose a 5-column
/// glyph into its 7 row bytes.
fn rows_from_columns(columns: &[u8; 5]) -> [u8; 7] {
    let mut rows = [0u8; 7];
    for (x, col) in columns.iter().enumerate() {
        for (y, row) in rows.iter_mut().enumerate() {
            if col >> y & 1 == 1 {
                *row |= 1 << x;
            }
        }
    }
    rows
}

pub struct MicroDotPhat {
    bus: I2cdev,
}

impl MicroDotPhat {
    pub fn new(bus_path: &str) -> Result<Self, BackendError> {
        let bus = I2cdev::new(bus_path).map_err(|e| BackendError::Bus(e.to_string()))?;
        debug!("Micro Dot pHAT backend on {bus_path}");
        Ok(MicroDotPhat { bus })
    }

    fn push_cells(&mut self, cells: &[[u8; 5]; CELLS], brightness: u8) -> Result<(), BackendError> {
        // IS31FL3730 current control is 7-bit.
        let level = (brightness >> 1).min(BRIGHTNESS_MAX);
        for (chip, addr) in CHIP_ADDRS.iter().enumerate() {
            let right = &cells[chip * 2 + 1];
            let left = &cells[chip * 2];

            let mut matrix1 = [0u8; 9];
            matrix1[0] = REG_MATRIX_1;
            matrix1[1..6].copy_from_slice(right);

            let mut matrix2 = [0u8; 9];
            matrix2[0] = REG_MATRIX_2;
            matrix2[1..8].copy_from_slice(&rows_from_columns(left));

            self.bus.write(*addr, &[REG_MODE, MODE_DUAL_MATRIX])?;
            self.bus.write(*addr, &[REG_OPTS, OPTS_34MA])?;
            self.bus.write(*addr, &[REG_BRIGHTNESS, level])?;
            self.bus.write(*addr, &matrix1)?;
            self.bus.write(*addr, &matrix2)?;
            self.bus.write(*addr, &[REG_UPDATE, 0x01])?;
        }
        Ok(())
    }
}

impl DisplayBackend for MicroDotPhat {
    fn name(&self) -> &'static str {
        "Micro Dot pHAT"
    }

    fn hardware_present(&mut self) -> bool {
        CHIP_ADDRS
            .iter()
            .all(|addr| self.bus.write(*addr, &[REG_MODE, MODE_DUAL_MATRIX]).is_ok())
    }

    fn geometry(&self) -> BackendGeometry {
        BackendGeometry {
            window_width: CELLS as u32,
            units_per_glyph: 1,
            frame_interval: Duration::from_millis(200),
            first_frame_dwell: 4,
            trailing_margin: 0,
            settle_dwell: Duration::from_millis(1800),
        }
    }

    fn clear(&mut self) -> Result<(), BackendError> {
        self.push_cells(&[[0u8; 5]; CELLS], 0)
    }

    fn fill(&mut self, brightness: u8) -> Result<(), BackendError> {
        self.push_cells(&[[0x7f; 5]; CELLS], brightness)
    }

    fn render_static(&mut self, text: &str, brightness: u8) -> Result<(), BackendError> {
        self.push_cells(&rasterize_cells(text, 0), brightness)
    }

    fn render_scroll_frame(
        &mut self,
        text: &str,
        offset: u32,
        brightness: u8,
    ) -> Result<(), BackendError> {
        self.push_cells(&rasterize_cells(text, offset as usize), brightness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rasterize_pads_past_end_of_text() {
        let cells = rasterize_cells("AB", 0);
        assert_eq!(cells[0], glyph_5x7('A'));
        assert_eq!(cells[1], glyph_5x7('B'));
        assert_eq!(cells[2], [0u8; 5]);
        assert_eq!(cells[5], [0u8; 5]);
    }

    #[test]
    fn rasterize_offset_is_a_character_substring() {
        let cells = rasterize_cells("ABCDEFGH", 2);
        assert_eq!(cells[0], glyph_5x7('C'));
        assert_eq!(cells[5], glyph_5x7('H'));
    }

    #[test]
    fn transpose_round_trips_pixels() {
        let columns = glyph_5x7('T');
        let rows = rows_from_columns(&columns);
        for x in 0..5 {
            for y in 0..7 {
                assert_eq!(columns[x] >> y & 1, rows[y] >> x & 1);
            }
        }
    }
}
