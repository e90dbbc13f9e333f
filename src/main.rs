//! Tap-to-wake firmware entry point
//!
//! Initializes the board, applies the start-up parameter and spawns the
//! touch, sensing and wake tasks.

#![no_std]
#![no_main]

use crate::task::{
    display_sense::display_sense, pocket_sense::pocket_sense, touch_feed::touch_feed,
    wake_worker::wake_worker,
};
use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::config::Config;
use tap_wake::system::config::{parse_boot_param, VERSION};
use tap_wake::system::dispatch::WakeDispatcher;
use tap_wake::system::state::{TouchState, DEFAULT_ENABLED};
use task::resources::{
    AssignedResources, DisplaySenseResources, PocketSensorResources, PowerSwitchResources,
    TouchPanelResources,
};
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// Task implementations
mod task;

/// Gating state shared by the feed, the sensing tasks and the worker
static TOUCH_STATE: TouchState = TouchState::new(DEFAULT_ENABLED);

/// Hand-off from the touch feed to the wake worker
static DISPATCHER: WakeDispatcher = WakeDispatcher::new();

/// Firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());
    info!("tap-wake {} starting", VERSION);

    // Start-up parameter, baked in at build time: OT2W=0 or OT2W=1
    let enabled = parse_boot_param(option_env!("OT2W").unwrap_or(""), DEFAULT_ENABLED);
    TOUCH_STATE.set_enabled(enabled);

    let r = split_resources!(p);

    // Spawn the worker first so the feed never signals into the void
    spawner.spawn(wake_worker(r.power_switch, &DISPATCHER)).unwrap();
    spawner.spawn(pocket_sense(r.pocket_sensor)).unwrap();
    spawner
        .spawn(display_sense(r.display_sense, &TOUCH_STATE))
        .unwrap();
    spawner
        .spawn(touch_feed(r.touch_panel, &TOUCH_STATE, &DISPATCHER))
        .unwrap();
}
