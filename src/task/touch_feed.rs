//! Touch feed
//!
//! Drives the FT6x06 panel through the `ft6x06-rs` async driver and feeds
//! the resulting multi-touch events to the input handler.
//!
//! # Operation
//! - The panel is switched to trigger mode so every report pulses the
//!   interrupt line, lifts included
//! - One driver read per falling edge
//! - Read failures drop that report; the next interrupt tries again

use defmt::{error, info, warn};
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{Config, I2c};
use ft6x06_rs::{FT6x06Async, InterruptMode};
use tap_wake::system::device::TouchInputHandler;
use tap_wake::system::dispatch::WakeDispatcher;
use tap_wake::system::state::TouchState;
use tap_wake::system::touch_report::ReportTranslator;

use crate::task::resources::{Irqs, TouchPanelResources};

/// Name the panel is attached under
const TOUCH_DEVICE_NAME: &str = "ft6x06-touch";

/// Touch feed task
#[embassy_executor::task]
pub async fn touch_feed(
    r: TouchPanelResources,
    state: &'static TouchState,
    dispatcher: &'static WakeDispatcher,
) {
    // 400kHz fast mode, the controller supports it
    let mut config = Config::default();
    config.frequency = 400_000;
    let i2c = I2c::new_async(r.i2c, r.scl, r.sda, Irqs, config);
    let mut irq = Input::new(r.irq, Pull::Up);

    let mut panel = FT6x06Async::new(i2c);
    if let Err(e) = panel.set_interrupt_mode(InterruptMode::Trigger).await {
        // Poll mode still reports touch down, lifts then arrive with the next touch
        warn!("Touch panel kept its interrupt mode: {}", e);
    }

    let mut handler = TouchInputHandler::new(state, dispatcher);
    let handle = match handler.connect(TOUCH_DEVICE_NAME) {
        Ok(handle) => handle,
        Err(e) => {
            error!("Touch panel not attached: {}", e);
            return;
        }
    };
    info!("Touch feed started");

    let mut translator = ReportTranslator::new();

    loop {
        let report = match panel.wait_for_touch(&mut irq).await {
            Ok(report) => report,
            Err(e) => {
                warn!("Touch report read failed: {}", e);
                continue;
            }
        };

        match translator.translate(report) {
            Ok(batch) => {
                for event in batch.iter() {
                    handler.event(handle, event);
                }
            }
            Err(e) => error!("Touch report dropped: {}", e),
        }
    }
}
