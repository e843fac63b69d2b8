// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The built-in detectors.
//!
//! - [`TapGesture`]: one hand touches and lifts. Never live.
//! - [`PanGesture`]: one hand drags in an allowed direction.
//! - [`ZoomGesture`]: two hands move closer together or apart.

mod pan;
mod tap;
mod zoom;

pub use pan::{PanConfig, PanDirection, PanDirections, PanGesture};
pub use tap::TapGesture;
pub use zoom::{ZoomConfig, ZoomDirection, ZoomGesture};
