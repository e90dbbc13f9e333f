//! Pocket detection
//!
//! Tracks a digital proximity sensor so taps are not acted on while the
//! device is covered.
//!
//! # Sensor Operation
//! - The sensor outputs low (0) when something is close
//! - But we have inverted the sensor output in hardware, so high is covered
//! - Edges are debounced to filter noise

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_rp::gpio::{Input, Pull};
use embassy_time::{Duration, Timer};
use tap_wake::system::tap::WakeGate;

use crate::task::resources::PocketSensorResources;

/// Debounce delay to filter out noise
const DEBOUNCE_DELAY: Duration = Duration::from_millis(100);

/// Latest settled sensor reading
static POCKETED: AtomicBool = AtomicBool::new(false);

/// Wake gate backed by the proximity sensor
pub struct PocketGate;

impl WakeGate for PocketGate {
    fn blocks_wake(&self) -> bool {
        POCKETED.load(Ordering::Relaxed)
    }
}

/// Pocket detection task
#[embassy_executor::task]
pub async fn pocket_sense(r: PocketSensorResources) {
    let mut sensor = Input::new(r.sensor_pin, Pull::Down);

    Timer::after(DEBOUNCE_DELAY).await;
    POCKETED.store(sensor.is_high(), Ordering::Relaxed);

    loop {
        sensor.wait_for_any_edge().await;
        Timer::after(DEBOUNCE_DELAY).await;
        POCKETED.store(sensor.is_high(), Ordering::Relaxed);
    }
}
