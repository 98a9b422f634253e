/*
 *  display/error.rs
 *
 *  phatline - now playing, six characters at a time
 *  (c) 2025
 *
 *  Unified error types for the display subsystem
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

use thiserror::Error;

/// Unified error type for all display backend operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// I2C communication error
    #[error("I2C communication error: {0}")]
    Bus(String),

    /// Invalid configuration
    #[error("invalid display configuration: {0}")]
    InvalidConfiguration(String),
}

// linux-embedded-hal's I2C error carries no Display impl of its own, so
// capture the debug rendering.
impl From<linux_embedded_hal::I2CError> for BackendError {
    fn from(err: linux_embedded_hal::I2CError) -> Self {
        BackendError::Bus(format!("{err:?}"))
    }
}
