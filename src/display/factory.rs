/*
 *  display/factory.rs
 *
 *  phatline - now playing, six characters at a time
 *  (c) 2025
 *
 *  Backend selection from configuration
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

use log::info;

use crate::config::{DisplayConfig, DisplayKind};
use crate::display::error::BackendError;
use crate::display::microdot::MicroDotPhat;
use crate::display::scrollphat::ScrollPhatHd;
use crate::display::traits::DisplayBackend;

/// Type alias for boxed display backend trait objects
pub type BoxedBackend = Box<dyn DisplayBackend>;

pub const DEFAULT_I2C_BUS: &str = "/dev/i2c-1";

/// Creates the configured backend on its I2C bus. Backends are variants
/// selected here, at construction time; an error only means the bus device
/// could not be opened, which callers treat the same as absent hardware.
pub fn create_backend(config: &DisplayConfig) -> Result<BoxedBackend, BackendError> {
    let bus = config.bus.as_deref().unwrap_or(DEFAULT_I2C_BUS);
    if bus.is_empty() {
        return Err(BackendError::InvalidConfiguration(
            "I2C bus path is empty".into(),
        ));
    }
    let kind = config.kind.unwrap_or(DisplayKind::Microdot);
    info!("creating {kind:?} backend on {bus}");
    match kind {
        DisplayKind::Microdot => Ok(Box::new(MicroDotPhat::new(bus)?)),
        DisplayKind::Scrollphathd => Ok(Box::new(ScrollPhatHd::new(bus)?)),
    }
}
