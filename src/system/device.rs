//! Touch Input Handler
//!
//! Attaches to input devices that look like touch panels and forwards their
//! raw events to the sample accumulator. Events from devices that were never
//! connected, or have been disconnected, are dropped before any state check.

use crate::system::accumulator::{Disposition, TouchSampleAccumulator};
use crate::system::dispatch::WakeDispatcher;
use crate::system::error::ConnectError;
use crate::system::event::InputEvent;
use crate::system::state::TouchState;

/// Number of devices that can be attached at once
pub const MAX_DEVICES: usize = 4;

/// Name fragments identifying touch panels
pub const TOUCH_DEVICE_PATTERNS: &[&str] = &["touch", "mtk-tpd"];

/// Returns true if a device with this name should be attached
pub fn accepts_device(name: &str) -> bool {
    TOUCH_DEVICE_PATTERNS
        .iter()
        .any(|pattern| name.contains(pattern))
}

/// Handle of an attached device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceHandle(u8);

impl DeviceHandle {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Input handler feeding attached devices into one accumulator
pub struct TouchInputHandler<'a> {
    accumulator: TouchSampleAccumulator<'a>,
    devices: [Option<&'a str>; MAX_DEVICES],
    gesture_device: Option<DeviceHandle>,
}

impl<'a> TouchInputHandler<'a> {
    pub fn new(state: &'a TouchState, dispatcher: &'a WakeDispatcher) -> Self {
        Self {
            accumulator: TouchSampleAccumulator::new(state, dispatcher),
            devices: [None; MAX_DEVICES],
            gesture_device: None,
        }
    }

    /// Attaches a device if its name marks it as a touch panel
    pub fn connect(&mut self, name: &'a str) -> Result<DeviceHandle, ConnectError> {
        if !accepts_device(name) {
            return Err(ConnectError::Filtered);
        }
        self.attach(name)
    }

    /// Attaches an alternate gesture source regardless of its name
    ///
    /// Replaces any previously registered gesture source, which stays
    /// attached as a plain device.
    pub fn attach_gesture_device(&mut self, name: &'a str) -> Result<DeviceHandle, ConnectError> {
        let handle = self.attach(name)?;
        self.gesture_device = Some(handle);
        Ok(handle)
    }

    fn attach(&mut self, name: &'a str) -> Result<DeviceHandle, ConnectError> {
        let Some(index) = self.devices.iter().position(Option::is_none) else {
            error!("No free handle for {}", name);
            return Err(ConnectError::Exhausted);
        };
        self.devices[index] = Some(name);
        info!("Attached {} as handle {}", name, index);
        Ok(DeviceHandle(index as u8))
    }

    /// Detaches a device; returns false if it was not attached
    pub fn disconnect(&mut self, handle: DeviceHandle) -> bool {
        let Some(slot) = self.devices.get_mut(handle.index()) else {
            return false;
        };
        let attached = slot.take().is_some();
        if self.gesture_device == Some(handle) {
            self.gesture_device = None;
        }
        attached
    }

    pub fn device_name(&self, handle: DeviceHandle) -> Option<&'a str> {
        self.devices.get(handle.index()).copied().flatten()
    }

    /// The registered alternate gesture source, if any
    pub fn gesture_device(&self) -> Option<DeviceHandle> {
        self.gesture_device
    }

    /// Feeds one raw event from an attached device
    ///
    /// Returns `None` if the handle is not attached.
    pub fn event(&mut self, handle: DeviceHandle, event: &InputEvent) -> Option<Disposition> {
        self.device_name(handle)?;
        Some(self.accumulator.on_event(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::event::ABS_MT_POSITION_X;

    #[test]
    fn filters_on_name() {
        assert!(accepts_device("synaptics_dsx touch"));
        assert!(accepts_device("ft6x06-touch"));
        assert!(accepts_device("mtk-tpd"));
        assert!(!accepts_device("gpio-keys"));
        assert!(!accepts_device("Touchpad"));
    }

    #[test]
    fn connect_rejects_non_touch_devices() {
        let state = TouchState::default();
        let dispatcher = WakeDispatcher::new();
        let mut handler = TouchInputHandler::new(&state, &dispatcher);

        assert_eq!(handler.connect("gpio-keys"), Err(ConnectError::Filtered));
        let handle = handler.connect("mtk-tpd").unwrap();
        assert_eq!(handler.device_name(handle), Some("mtk-tpd"));
    }

    #[test]
    fn exhausting_handles_is_an_error() {
        let state = TouchState::default();
        let dispatcher = WakeDispatcher::new();
        let mut handler = TouchInputHandler::new(&state, &dispatcher);

        let handles: Vec<DeviceHandle> = (0..MAX_DEVICES)
            .map(|_| handler.connect("touch").unwrap())
            .collect();
        assert_eq!(handler.connect("touch"), Err(ConnectError::Exhausted));

        assert!(handler.disconnect(handles[1]));
        assert!(!handler.disconnect(handles[1]));
        assert_eq!(handler.connect("touch"), Ok(handles[1]));
    }

    #[test]
    fn events_from_detached_devices_are_dropped() {
        let state = TouchState::new(true);
        state.set_suspended(true);
        let dispatcher = WakeDispatcher::new();
        let mut handler = TouchInputHandler::new(&state, &dispatcher);

        let handle = handler.connect("touch").unwrap();
        handler.disconnect(handle);
        assert_eq!(
            handler.event(handle, &InputEvent::abs(ABS_MT_POSITION_X, 1)),
            None
        );
        assert!(!dispatcher.is_pending());

        let handle = handler.connect("touch").unwrap();
        assert_eq!(
            handler.event(handle, &InputEvent::abs(ABS_MT_POSITION_X, 1)),
            Some(Disposition::Dispatched)
        );
    }

    #[test]
    fn gesture_source_bypasses_the_name_filter() {
        let state = TouchState::default();
        let dispatcher = WakeDispatcher::new();
        let mut handler = TouchInputHandler::new(&state, &dispatcher);

        let handle = handler.attach_gesture_device("wake_gesture").unwrap();
        assert_eq!(handler.gesture_device(), Some(handle));
        handler.disconnect(handle);
        assert_eq!(handler.gesture_device(), None);
    }
}
