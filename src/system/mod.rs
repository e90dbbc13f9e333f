//! Core system components for tap-to-wake
pub mod accumulator;
pub mod config;
pub mod device;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod power_key;
pub mod state;
pub mod tap;
#[cfg(feature = "touch-panel")]
pub mod touch_report;
