//! Hardware Resource Management
//!
//! Assigns the board's pins and peripherals to the tasks that own them.
//!
//! # Resource Groups
//! - Touch panel: FT6x06 on I2C0 plus its interrupt line
//! - Display sense: host panel power line, high while the display is on
//! - Pocket sensor: digital proximity sensor, high while covered
//! - Power switch: output wired across the host's power button

use assign_resources::assign_resources;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::InterruptHandler as I2cInterruptHandler;
use embassy_rp::peripherals::{self, I2C0};
use embassy_rp::Peri;

assign_resources! {
    /// FT6x06 touch controller
    touch_panel: TouchPanelResources {
        i2c: I2C0,
        scl: PIN_13,
        sda: PIN_12,
        irq: PIN_8,
    },
    /// Host display power sense line
    display_sense: DisplaySenseResources {
        sense_pin: PIN_26,
    },
    /// Proximity (pocket) sensor, inverted in hardware
    pocket_sensor: PocketSensorResources {
        sensor_pin: PIN_27,
    },
    /// Optocoupler across the host power button
    power_switch: PowerSwitchResources {
        switch_pin: PIN_22,
    },
}

bind_interrupts!(pub struct Irqs {
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});
