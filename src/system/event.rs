//! Raw Input Events
//!
//! Defines the raw input event model shared by the touch feed and the power
//! key injector, using the Linux input event code numbering, and the
//! classifier that turns an event code into the axis the accumulator cares
//! about.

/// Event type of a raw input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventType {
    /// Synchronization marker
    Syn,
    /// Key or button state change
    Key,
    /// Absolute axis update
    Abs,
}

/// `SYN_REPORT`: end of one batch of field updates
pub const SYN_REPORT: u16 = 0x00;

/// Power key code
pub const KEY_POWER: u16 = 116;
/// Touch contact button code
pub const BTN_TOUCH: u16 = 0x14a;

/// Multi-touch slot selector
pub const ABS_MT_SLOT: u16 = 0x2f;
/// Multi-touch contact X position
pub const ABS_MT_POSITION_X: u16 = 0x35;
/// Multi-touch contact Y position
pub const ABS_MT_POSITION_Y: u16 = 0x36;
/// Multi-touch contact tracking id, -1 on lift
pub const ABS_MT_TRACKING_ID: u16 = 0x39;

/// One raw input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputEvent {
    pub kind: EventType,
    pub code: u16,
    pub value: i32,
}

impl InputEvent {
    pub const fn new(kind: EventType, code: u16, value: i32) -> Self {
        Self { kind, code, value }
    }

    /// Synchronization marker closing a batch
    pub const fn syn() -> Self {
        Self::new(EventType::Syn, SYN_REPORT, 0)
    }

    pub const fn key(code: u16, pressed: bool) -> Self {
        Self::new(EventType::Key, code, pressed as i32)
    }

    pub const fn abs(code: u16, value: i32) -> Self {
        Self::new(EventType::Abs, code, value)
    }

    /// Axis this event updates
    pub fn axis(&self) -> AxisKind {
        AxisKind::classify(self.code)
    }
}

/// The axis an event code updates, as far as tap detection is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisKind {
    X,
    Y,
    TrackingId,
    Slot,
    /// Any other code, kept for the lift quirk table
    Other(u16),
}

impl AxisKind {
    /// Classifies by event code alone
    ///
    /// The event type is not consulted: some panels report contact state
    /// through key codes, and the lift quirks below depend on seeing them.
    pub fn classify(code: u16) -> Self {
        match code {
            ABS_MT_POSITION_X => AxisKind::X,
            ABS_MT_POSITION_Y => AxisKind::Y,
            ABS_MT_TRACKING_ID => AxisKind::TrackingId,
            ABS_MT_SLOT => AxisKind::Slot,
            other => AxisKind::Other(other),
        }
    }

    /// Short label for trace output
    pub fn label(&self) -> &'static str {
        match self {
            AxisKind::X => "X",
            AxisKind::Y => "Y",
            AxisKind::TrackingId => "ID",
            AxisKind::Other(code) if is_lift_quirk_code(*code) => "ID",
            AxisKind::Slot => "SLOT",
            AxisKind::Other(_) => "undef",
        }
    }
}

/// Contact-lift signals of panels that ignore the type B protocol
///
/// Type B panels must report `ABS_MT_TRACKING_ID = -1` when a contact lifts.
/// Several do not, and some of those report the lift through a different
/// code/value pair instead. Each entry is `(code, value)`.
///
/// - Synaptics S3203: `BTN_TOUCH` (330) with value 0
///
/// The list is not exhaustive. Panels that report no lift at all (CYTTSP3)
/// cannot be covered here.
pub const LIFT_QUIRKS: &[(u16, i32)] = &[(BTN_TOUCH, 0)];

fn is_lift_quirk_code(code: u16) -> bool {
    LIFT_QUIRKS.iter().any(|&(quirk_code, _)| quirk_code == code)
}

/// Returns true if the update reports a contact lift, in either the
/// standard form or one of the [`LIFT_QUIRKS`]
pub fn is_contact_lift(axis: AxisKind, value: i32) -> bool {
    match axis {
        AxisKind::TrackingId => value == -1,
        AxisKind::Other(code) => LIFT_QUIRKS.contains(&(code, value)),
        _ => false,
    }
}
