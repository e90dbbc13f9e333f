//! Tap Detector
//!
//! Decides, at the moment the deferred work runs, whether an accumulated
//! sample still counts as a wake tap. Screen and call state were already
//! checked when the raw event was accepted; what is left is the last-moment
//! external gating, e.g. a proximity sensor reporting the device is in a
//! pocket.

use crate::system::accumulator::Sample;

/// Last-moment veto on a wake
pub trait WakeGate {
    /// Returns true if a wake must not happen right now
    fn blocks_wake(&self) -> bool;
}

/// Gate for devices without a proximity sensor
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGate;

impl WakeGate for NoGate {
    fn blocks_wake(&self) -> bool {
        false
    }
}

impl<G: WakeGate> WakeGate for &G {
    fn blocks_wake(&self) -> bool {
        (**self).blocks_wake()
    }
}

/// Single-tap policy
pub struct TapDetector<G: WakeGate> {
    gate: G,
}

impl<G: WakeGate> TapDetector<G> {
    pub const fn new(gate: G) -> Self {
        Self { gate }
    }

    /// Returns true if the sample should wake the device
    ///
    /// Any coordinate update qualifies. Precision is traded for tolerance of
    /// panels with broken lift reporting; spurious wakes are kept out by the
    /// screen state gating upstream and by the gate here.
    pub fn is_tap(&self, sample: &Sample) -> bool {
        if self.gate.blocks_wake() {
            debug!("Tap at ({}, {}) gated", sample.x, sample.y);
            return false;
        }
        debug!("Tap at ({}, {})", sample.x, sample.y);
        true
    }
}
