/*
 *  display/mod.rs
 *
 *  phatline - now playing, six characters at a time
 *  (c) 2025
 *
 *  Display subsystem - backend capability surface and the concrete
 *  Pimoroni pHAT implementations
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

// Core trait definitions
pub mod error;
pub mod factory;
pub mod traits;

// Concrete backends
pub mod microdot;
pub mod scrollphat;

// Re-exports for convenience
pub use error::BackendError;
pub use factory::{BoxedBackend, create_backend};
pub use microdot::MicroDotPhat;
pub use scrollphat::ScrollPhatHd;
pub use traits::{BackendGeometry, DisplayBackend};
