//! Tap-to-wake core
//!
//! Watches the raw multi-touch feed of a suspended display and, once per
//! qualifying tap, injects a power key press/release to wake the device.
//!
//! The crate is `no_std` and hardware independent. Shared state is passed
//! by reference so every component can be instantiated in isolation; the
//! firmware binary owns the `static` instances.

#![cfg_attr(not(test), no_std)]

// Must come first so the macros are visible to the modules below.
mod fmt;

/// Core tap-to-wake components
pub mod system;
