//! Display sense
//!
//! Follows the host's panel power line and turns its edges into display
//! on/off notifications.
//!
//! # Operation
//! - High (1) while the display is powered
//! - Low (0) once it is off
//! - Edges are debounced; only settled changes are reported

use defmt::info;
use embassy_rp::gpio::{Input, Pull};
use embassy_time::{Duration, Timer};
use tap_wake::system::state::{ScreenEvent, TouchState};

use crate::task::resources::DisplaySenseResources;

/// Debounce delay to let the panel supply settle
const DEBOUNCE_DELAY: Duration = Duration::from_millis(50);

/// Display sense task
#[embassy_executor::task]
pub async fn display_sense(r: DisplaySenseResources, state: &'static TouchState) {
    let mut sense = Input::new(r.sense_pin, Pull::Down);

    // perform initial measure to ensure initial state is caught
    Timer::after(DEBOUNCE_DELAY).await;
    let mut display_on = sense.is_high();
    state.apply_screen_event(screen_event(display_on));
    info!("Display sense started, display on: {}", display_on);

    loop {
        sense.wait_for_any_edge().await;
        Timer::after(DEBOUNCE_DELAY).await;

        let now_on = sense.is_high();
        if now_on != display_on {
            state.apply_screen_event(screen_event(now_on));
            display_on = now_on;
        }
    }
}

fn screen_event(display_on: bool) -> ScreenEvent {
    if display_on {
        ScreenEvent::OnComplete
    } else {
        ScreenEvent::OffComplete
    }
}
