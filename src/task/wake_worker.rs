//! Wake worker
//!
//! Runs the wake dispatcher and presses the host's power button through an
//! optocoupler when a tap qualifies.

use defmt::info;
use embassy_rp::gpio::{Level, Output};
use tap_wake::system::dispatch::WakeDispatcher;
use tap_wake::system::error::InjectError;
use tap_wake::system::event::{EventType, InputEvent};
use tap_wake::system::power_key::{KeySink, PowerKeyInjector};
use tap_wake::system::tap::TapDetector;

use crate::task::pocket_sense::PocketGate;
use crate::task::resources::PowerSwitchResources;

/// Power button line driven by synthetic key events
///
/// High closes the host's power button contact. Sync markers need no
/// action, the line level is the whole state.
pub struct PowerSwitch {
    line: Output<'static>,
}

impl KeySink for PowerSwitch {
    fn emit(&mut self, event: InputEvent) -> Result<(), InjectError> {
        if event.kind == EventType::Key {
            if event.value != 0 {
                self.line.set_high();
            } else {
                self.line.set_low();
            }
        }
        Ok(())
    }
}

/// Wake worker task
#[embassy_executor::task]
pub async fn wake_worker(r: PowerSwitchResources, dispatcher: &'static WakeDispatcher) {
    let injector = PowerKeyInjector::new(PowerSwitch {
        line: Output::new(r.switch_pin, Level::Low),
    });
    let identity = injector.identity();
    info!("Power key device {} at {}", identity.name, identity.phys);

    let detector = TapDetector::new(PocketGate);
    dispatcher.run(&detector, &injector).await
}
