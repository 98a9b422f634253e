/*
 *  display/scrollphat.rs
 *
 *  phatline - now playing, six characters at a time
 *  (c) 2025
 *
 *  Pimoroni Scroll pHAT HD backend: a 17x7 pixel grid on an IS31FL3731
 *  PWM matrix controller. Text is rasterized once per string into a
 *  column strip; a scroll frame paints a 17-column window of that strip.
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
use crate::font::glyph_3x5;

pub const WIDTH: usize = 17;
pub const HEIGHT: usize = 7;

/// 3 glyph columns plus one spacing column.
pub const UNITS_PER_GLYPH: usize = 4;

const I2C_ADDR: u8 = 0x74;

// IS31FL3731 register map
const REG_BANK: u8 = 0xfd;
const CONFIG_BANK: u8 = 0x0b;
const REG_MODE: u8 = 0x00;
const REG_FRAME: u8 = 0x01;
const REG_SHUTDOWN: u8 = 0x0a;
const PICTURE_MODE: u8 = 0x00;
const REG_ENABLE: u8 = 0x00;
const REG_PWM: u8 = 0x24;
const LED_COUNT: usize = 144;
const ENABLE_BYTES: usize = 18;

// The 5-row font sits one row down in the 7-row window.
const TEXT_ROW: usize = 1;

/// LED register offset for pixel (x, y). The panel is wired as two halves
/// with mirrored column order; this is the controller's documented layout.
fn pixel_addr(x: usize, y: usize) -> usize {
    let (x, y) = if x > 8 {
        ((x - 8) as i32, -2 - y as i32)
    } else {
        ((8 - x) as i32, y as i32)
    };
    (x * 16 + y) as usize
}

/// Rasterizes `text` into a strip of 5-bit columns, one spacing column per
/// glyph, positioned for the 7-row window.
fn rasterize_columns(text: &str) -> Vec<u8> {
    let mut columns = Vec::with_capacity(text.chars().count() * UNITS_PER_GLYPH);
    for c in text.chars() {
        for col in glyph_3x5(c) {
            columns.push(col << TEXT_ROW);
        }
        columns.push(0);
    }
    columns
}

pub struct ScrollPhatHd {
    bus: I2cdev,
    initialized: bool,
    text: String,
    columns: Vec<u8>,
}

impl ScrollPhatHd {
    pub fn new(bus_path: &str) -> Result<Self, BackendError> {
        let bus = I2cdev::new(bus_path).map_err(|e| BackendError::Bus(e.to_string()))?;
        debug!("Scroll pHAT HD backend on {bus_path}");
        Ok(ScrollPhatHd {
            bus,
            initialized: false,
            text: String::new(),
            columns: Vec::new(),
        })
    }

    fn select_bank(&mut self, bank: u8) -> Result<(), BackendError> {
        self.bus.write(I2C_ADDR, &[REG_BANK, bank])?;
        Ok(())
    }

    fn ensure_init(&mut self) -> Result<(), BackendError> {
        if self.initialized {
            return Ok(());
        }
        self.select_bank(CONFIG_BANK)?;
        self.bus.write(I2C_ADDR, &[REG_SHUTDOWN, 0x01])?;
        self.bus.write(I2C_ADDR, &[REG_MODE, PICTURE_MODE])?;
        self.bus.write(I2C_ADDR, &[REG_FRAME, 0x00])?;
        self.select_bank(0)?;
        let mut enable = [0xffu8; ENABLE_BYTES + 1];
        enable[0] = REG_ENABLE;
        self.bus.write(I2C_ADDR, &enable)?;
        self.initialized = true;
        Ok(())
    }

    /// Paints the window of `self.columns` starting at column `offset`.
    fn paint(&mut self, offset: usize, brightness: u8) -> Result<(), BackendError> {
        self.ensure_init()?;
        let mut frame = [0u8; LED_COUNT + 1];
        frame[0] = REG_PWM;
        for x in 0..WIDTH {
            let Some(col) = self.columns.get(offset + x) else {
                continue;
            };
            for y in 0..HEIGHT {
                if col >> y & 1 == 1 {
                    frame[1 + pixel_addr(x, y)] = brightness;
                }
            }
        }
        self.bus.write(I2C_ADDR, &frame)?;
        Ok(())
    }

    fn set_text(&mut self, text: &str) {
        if self.text != text {
            self.text = text.to_string();
            self.columns = rasterize_columns(text);
        }
    }
}

impl DisplayBackend for ScrollPhatHd {
    fn name(&self) -> &'static str {
        "Scroll pHAT HD"
    }

    fn hardware_present(&mut self) -> bool {
        self.select_bank(CONFIG_BANK).is_ok()
    }

    fn geometry(&self) -> BackendGeometry {
        BackendGeometry {
            window_width: WIDTH as u32,
            units_per_glyph: UNITS_PER_GLYPH as u32,
            frame_interval: Duration::from_millis(100),
            first_frame_dwell: 4,
            trailing_margin: 1,
            settle_dwell: Duration::from_millis(2000),
        }
    }

    fn clear(&mut self) -> Result<(), BackendError> {
        self.ensure_init()?;
        let mut frame = [0u8; LED_COUNT + 1];
        frame[0] = REG_PWM;
        self.bus.write(I2C_ADDR, &frame)?;
        Ok(())
    }

    fn fill(&mut self, brightness: u8) -> Result<(), BackendError> {
        self.ensure_init()?;
        let mut frame = [brightness; LED_COUNT + 1];
        frame[0] = REG_PWM;
        self.bus.write(I2C_ADDR, &frame)?;
        Ok(())
    }

    fn render_static(&mut self, text: &str, brightness: u8) -> Result<(), BackendError> {
        self.set_text(text);
        self.paint(0, brightness)
    }

    fn render_scroll_frame(
        &mut self,
        text: &str,
        offset: u32,
        brightness: u8,
    ) -> Result<(), BackendError> {
        self.set_text(text);
        self.paint(offset as usize, brightness)
    }
}
