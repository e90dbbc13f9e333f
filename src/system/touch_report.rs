//! FT6x06 Touch Reports
//!
//! Turns the touch events read by the `ft6x06-rs` driver into the type B
//! multi-touch event stream the input handler consumes:
//! - contact down or moving: `SLOT`, `TRACKING_ID`, `POSITION_X`, `POSITION_Y`, `BTN_TOUCH 1`
//! - contact lifted: `SLOT`, `TRACKING_ID -1`, `BTN_TOUCH 0`
//! - every non-empty batch ends with `SYN`
//!
//! The controller stops reporting a point once it is gone, so a point that
//! disappears between two reads is reported as lifted as well. A read with
//! no valid points (`None` from the driver) lifts every active slot.

use ft6x06_rs::{TouchEvent, TouchPoint, TouchType};
use heapless::Vec;

use crate::system::error::ReportError;
use crate::system::event::{
    InputEvent, ABS_MT_POSITION_X, ABS_MT_POSITION_Y, ABS_MT_SLOT, ABS_MT_TRACKING_ID, BTN_TOUCH,
};

/// The controller tracks at most two contacts
const MAX_POINTS: usize = 2;
/// Events for one contact update
const CONTACT_EVENTS: usize = 5;
/// Events for one lift
const LIFT_EVENTS: usize = 3;

/// Worst case for one report: every point a contact update, every slot
/// lifted as vanished, plus `SYN`
pub const MAX_BATCH: usize = MAX_POINTS * CONTACT_EVENTS + MAX_POINTS * LIFT_EVENTS + 1;

/// Events produced from one report
pub type EventBatch = Vec<InputEvent, MAX_BATCH>;

/// Stateful report-to-event translator
///
/// Slots are the controller's touch ids, which are 0 or 1.
#[derive(Default)]
pub struct ReportTranslator {
    active: [bool; MAX_POINTS],
}

impl ReportTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `slot` currently has a contact down
    pub fn is_active(&self, slot: usize) -> bool {
        self.active.get(slot).copied().unwrap_or(false)
    }

    /// Translates one driver read
    ///
    /// A slot is only marked lifted once its lift events are in the batch.
    pub fn translate(&mut self, event: Option<TouchEvent>) -> Result<EventBatch, ReportError> {
        let mut seen = [false; MAX_POINTS];
        let mut batch = EventBatch::new();

        if let Some(event) = event {
            let points = core::iter::once(event.primary_point).chain(event.secondary_point);
            for point in points {
                self.translate_point(&mut batch, &mut seen, &point)?;
            }
        }

        for slot in 0..MAX_POINTS {
            if !seen[slot] && self.active[slot] {
                push_lift(&mut batch, slot)?;
                self.active[slot] = false;
            }
        }

        if !batch.is_empty() {
            batch
                .push(InputEvent::syn())
                .map_err(|_| ReportError::BatchFull)?;
        }
        Ok(batch)
    }

    fn translate_point(
        &mut self,
        batch: &mut EventBatch,
        seen: &mut [bool; MAX_POINTS],
        point: &TouchPoint,
    ) -> Result<(), ReportError> {
        let slot = point.touch_id as usize;
        if slot >= MAX_POINTS {
            trace!("Ignoring touch id {}", point.touch_id);
            return Ok(());
        }
        match point.touch_type {
            TouchType::PressDown | TouchType::Contact => {
                seen[slot] = true;
                batch
                    .extend_from_slice(&[
                        InputEvent::abs(ABS_MT_SLOT, slot as i32),
                        InputEvent::abs(ABS_MT_TRACKING_ID, slot as i32),
                        InputEvent::abs(ABS_MT_POSITION_X, point.x as i32),
                        InputEvent::abs(ABS_MT_POSITION_Y, point.y as i32),
                        InputEvent::key(BTN_TOUCH, true),
                    ])
                    .map_err(|_| ReportError::BatchFull)?;
                self.active[slot] = true;
            }
            TouchType::LiftUp => {
                seen[slot] = true;
                if self.active[slot] {
                    push_lift(batch, slot)?;
                    self.active[slot] = false;
                }
            }
            TouchType::NoEvent | TouchType::Invalid => (),
        }
        Ok(())
    }
}

fn push_lift(batch: &mut EventBatch, slot: usize) -> Result<(), ReportError> {
    batch
        .extend_from_slice(&[
            InputEvent::abs(ABS_MT_SLOT, slot as i32),
            InputEvent::abs(ABS_MT_TRACKING_ID, -1),
            InputEvent::key(BTN_TOUCH, false),
        ])
        .map_err(|_| ReportError::BatchFull)
}
