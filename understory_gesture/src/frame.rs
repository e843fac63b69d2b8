// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input boundary from the sensor side.

use crate::arbiter::GestureArbiter;
use crate::types::HandSample;

/// Something that consumes one frame of tracked hands at a time.
///
/// The sensor collaborator calls [`on_frame`](Self::on_frame) once per frame, and
/// each call runs to completion before the next one starts.
pub trait HandFrameSink {
    /// Deliver the hands seen in one frame.
    fn on_frame(&mut self, hands: &[HandSample]);
}

impl HandFrameSink for GestureArbiter {
    fn on_frame(&mut self, hands: &[HandSample]) {
        Self::on_frame(self, hands);
    }
}
