//! Touch Sample Accumulator
//!
//! Consumes raw per-axis touch updates on the event delivery path and hands
//! a sample to the [`WakeDispatcher`] as soon as a coordinate arrives.
//!
//! # Gating Order
//! Every update passes these checks in this order, and the first one that
//! matches drops it without side effects:
//! 1. Enable switch off
//! 2. Phone call in progress
//! 3. Screen on
//! 4. Slot selector (type B framing)
//! 5. Contact lift, standard or quirk form
//!
//! The order matters for malformed streams and must not be rearranged.
//! Device filtering happens before all of these, in the input handler.
//!
//! Triggering on any coordinate instead of a confirmed press and release
//! keeps this working on panels whose lift reporting is broken or missing.

use crate::system::dispatch::WakeDispatcher;
use crate::system::event::{is_contact_lift, AxisKind, InputEvent};
use crate::system::state::TouchState;

/// Coordinates of the contact being accumulated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    pub x: i32,
    pub y: i32,
    /// X was updated since the last dispatch
    pub x_set: bool,
    /// Y was updated since the last dispatch
    pub y_set: bool,
}

/// What happened to one axis update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Disposition {
    Disabled,
    InCall,
    ScreenOn,
    SlotFrame,
    ContactLift,
    /// Accepted, but carries no coordinate
    NoCoordinate,
    /// A sample was handed to the dispatcher
    Dispatched,
}

/// Per-device sample accumulator
pub struct TouchSampleAccumulator<'a> {
    state: &'a TouchState,
    dispatcher: &'a WakeDispatcher,
    sample: Sample,
}

impl<'a> TouchSampleAccumulator<'a> {
    pub fn new(state: &'a TouchState, dispatcher: &'a WakeDispatcher) -> Self {
        Self {
            state,
            dispatcher,
            sample: Sample::default(),
        }
    }

    /// Feeds one raw event
    pub fn on_event(&mut self, event: &InputEvent) -> Disposition {
        let axis = event.axis();
        trace!("code: {}|{}, val: {}", axis.label(), event.code, event.value);
        self.on_axis_update(axis, event.value)
    }

    /// Feeds one axis update; O(1) and never blocks
    pub fn on_axis_update(&mut self, axis: AxisKind, value: i32) -> Disposition {
        if !self.state.is_enabled() {
            return Disposition::Disabled;
        }
        if self.state.is_in_call() {
            return Disposition::InCall;
        }
        if !self.state.is_suspended() {
            return Disposition::ScreenOn;
        }
        if axis == AxisKind::Slot {
            return Disposition::SlotFrame;
        }
        if is_contact_lift(axis, value) {
            return Disposition::ContactLift;
        }

        match axis {
            AxisKind::X => {
                self.sample.x = value;
                self.sample.x_set = true;
            }
            AxisKind::Y => {
                self.sample.y = value;
                self.sample.y_set = true;
            }
            _ => (),
        }

        if self.sample.x_set || self.sample.y_set {
            self.sample.x_set = false;
            self.sample.y_set = false;
            self.dispatcher.enqueue(self.sample);
            Disposition::Dispatched
        } else {
            Disposition::NoCoordinate
        }
    }

    /// The sample as it stands
    pub fn sample(&self) -> &Sample {
        &self.sample
    }
}
