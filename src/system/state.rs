//! Touch State
//!
//! Holds the flags every raw touch event is gated on:
//! - Screen suspended (display off)
//! - Phone call in progress
//! - Tap-to-wake enabled
//!
//! The flags are independent of each other and read once per event, so
//! each one is a plain atomic with last-write-wins semantics. There is no
//! lock and no transition validation; rapid toggling only ever leaves the
//! last written value behind.
//!
//! # Access Pattern
//! ```rust
//! use tap_wake::system::state::TouchState;
//!
//! static TOUCH_STATE: TouchState = TouchState::new(true);
//! TOUCH_STATE.set_suspended(true);
//! assert!(TOUCH_STATE.is_suspended());
//! ```

use core::sync::atomic::{AtomicBool, Ordering};

/// Enable switch value used when no start-up parameter overrides it
pub const DEFAULT_ENABLED: bool = true;

/// Display power notifications delivered by the display collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScreenEvent {
    /// Display finished turning off
    OffComplete,
    /// Display finished turning on
    OnComplete,
}

/// Telephony notifications delivered by the call-state collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CallEvent {
    /// A call became active
    Started,
    /// The active call ended
    Ended,
}

/// Shared gating state for the tap-to-wake pipeline
///
/// Initialized to:
/// - Screen on (not suspended)
/// - No call in progress
/// - Enable switch as given
pub struct TouchState {
    /// Display is off
    /// - true: taps may wake the device
    /// - false: every touch event is ignored
    screen_suspended: AtomicBool,
    /// A phone call is in progress
    /// - true: every touch event is ignored (face against the panel)
    in_call: AtomicBool,
    /// Enable switch
    /// - false: the whole pipeline is a no-op
    enabled: AtomicBool,
}

impl TouchState {
    /// Creates the state with the given enable switch value
    pub const fn new(enabled: bool) -> Self {
        Self {
            screen_suspended: AtomicBool::new(false),
            in_call: AtomicBool::new(false),
            enabled: AtomicBool::new(enabled),
        }
    }

    pub fn set_suspended(&self, suspended: bool) {
        self.screen_suspended.store(suspended, Ordering::Relaxed);
    }

    pub fn is_suspended(&self) -> bool {
        self.screen_suspended.load(Ordering::Relaxed)
    }

    pub fn set_in_call(&self, in_call: bool) {
        self.in_call.store(in_call, Ordering::Relaxed);
    }

    pub fn is_in_call(&self) -> bool {
        self.in_call.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Maps a display power notification onto the suspended flag
    pub fn apply_screen_event(&self, event: ScreenEvent) {
        match event {
            ScreenEvent::OffComplete => {
                debug!("Screen off, tap-to-wake armed");
                self.set_suspended(true);
            }
            ScreenEvent::OnComplete => {
                debug!("Screen on, tap-to-wake idle");
                self.set_suspended(false);
            }
        }
    }

    /// Maps a telephony notification onto the in-call flag
    pub fn apply_call_event(&self, event: CallEvent) {
        self.set_in_call(event == CallEvent::Started);
    }
}

impl Default for TouchState {
    fn default() -> Self {
        Self::new(DEFAULT_ENABLED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_awake_and_not_in_call() {
        let state = TouchState::new(false);
        assert!(!state.is_suspended());
        assert!(!state.is_in_call());
        assert!(!state.is_enabled());

        assert!(TouchState::default().is_enabled() == DEFAULT_ENABLED);
    }

    #[test]
    fn last_write_wins() {
        let state = TouchState::default();
        for i in 0..101 {
            state.set_suspended(i % 2 == 0);
        }
        assert!(state.is_suspended());
        state.set_suspended(false);
        assert!(!state.is_suspended());
    }

    #[test]
    fn screen_events_toggle_suspend_state() {
        let state = TouchState::default();
        state.apply_screen_event(ScreenEvent::OffComplete);
        assert!(state.is_suspended());
        state.apply_screen_event(ScreenEvent::OffComplete);
        assert!(state.is_suspended());
        state.apply_screen_event(ScreenEvent::OnComplete);
        assert!(!state.is_suspended());
    }

    #[test]
    fn call_events_toggle_in_call() {
        let state = TouchState::default();
        state.apply_call_event(CallEvent::Started);
        assert!(state.is_in_call());
        state.apply_call_event(CallEvent::Ended);
        assert!(!state.is_in_call());
    }
}
