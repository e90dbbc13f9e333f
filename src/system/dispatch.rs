//! Wake Dispatcher
//!
//! Moves tap evaluation off the event delivery path. The event side only
//! ever calls [`WakeDispatcher::enqueue`], which never blocks; a single
//! worker task drives [`WakeDispatcher::run`] and does the slow part.
//!
//! Pending work is a single-slot signal: enqueueing while an evaluation is
//! still queued overwrites the queued sample, so a burst of axis updates
//! collapses into one evaluation.

use crate::system::accumulator::Sample;
use crate::system::power_key::{KeySink, PowerKeyInjector, WakeOutcome};
use crate::system::tap::{TapDetector, WakeGate};
use core::convert::Infallible;
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Deferred, serialized tap evaluation
pub struct WakeDispatcher {
    /// Latest sample awaiting evaluation
    pending: Signal<CriticalSectionRawMutex, Sample>,
}

impl WakeDispatcher {
    pub const fn new() -> Self {
        Self {
            pending: Signal::new(),
        }
    }

    /// Queues an evaluation of `sample`, replacing any queued one
    ///
    /// Never blocks; safe to call from the event delivery path.
    pub fn enqueue(&self, sample: Sample) {
        self.pending.signal(sample);
    }

    /// Returns true if an evaluation is queued
    pub fn is_pending(&self) -> bool {
        self.pending.signaled()
    }

    /// Worker loop
    pub async fn run<G: WakeGate, S: KeySink>(
        &self,
        detector: &TapDetector<G>,
        injector: &PowerKeyInjector<S>,
    ) -> ! {
        info!("Wake dispatcher started");
        loop {
            self.handle_next(detector, injector).await;
        }
    }

    /// Waits for one queued evaluation and carries it out
    ///
    /// Returns `None` if the tap was gated. Work queued while the key is
    /// held is evaluated concurrently, so it runs into the injector's lock
    /// and is dropped instead of stacking a second press behind this one.
    pub async fn handle_next<G: WakeGate, S: KeySink>(
        &self,
        detector: &TapDetector<G>,
        injector: &PowerKeyInjector<S>,
    ) -> Option<WakeOutcome> {
        let sample = self.pending.wait().await;
        if !detector.is_tap(&sample) {
            return None;
        }

        match select(injector.trigger(), self.absorb(detector, injector)).await {
            Either::First(outcome) => Some(outcome),
            Either::Second(never) => match never {},
        }
    }

    async fn absorb<G: WakeGate, S: KeySink>(
        &self,
        detector: &TapDetector<G>,
        injector: &PowerKeyInjector<S>,
    ) -> Infallible {
        loop {
            let sample = self.pending.wait().await;
            if detector.is_tap(&sample) {
                let outcome = injector.trigger().await;
                trace!("Overlapping tap: {}", outcome);
            }
        }
    }
}

impl Default for WakeDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::error::InjectError;
    use crate::system::event::{EventType, InputEvent};
    use crate::system::power_key::PWRKEY_HOLD;
    use crate::system::tap::NoGate;
    use core::cell::Cell;
    use embassy_futures::block_on;
    use embassy_futures::join::join;
    use embassy_time::Timer;

    #[derive(Default)]
    struct Recorder {
        events: Vec<InputEvent>,
    }

    impl KeySink for Recorder {
        fn emit(&mut self, event: InputEvent) -> Result<(), InjectError> {
            self.events.push(event);
            Ok(())
        }
    }

    fn presses(events: &[InputEvent]) -> usize {
        events
            .iter()
            .filter(|e| e.kind == EventType::Key && e.value == 1)
            .count()
    }

    struct Pocket(Cell<bool>);

    impl WakeGate for Pocket {
        fn blocks_wake(&self) -> bool {
            self.0.get()
        }
    }

    #[test]
    fn enqueue_coalesces_into_one_evaluation() {
        let dispatcher = WakeDispatcher::new();
        assert!(!dispatcher.is_pending());

        dispatcher.enqueue(Sample {
            x: 1,
            ..Sample::default()
        });
        dispatcher.enqueue(Sample {
            x: 2,
            ..Sample::default()
        });
        assert!(dispatcher.is_pending());

        let detector = TapDetector::new(NoGate);
        let injector = PowerKeyInjector::new(Recorder::default());
        assert_eq!(
            block_on(dispatcher.handle_next(&detector, &injector)),
            Some(WakeOutcome::Pressed)
        );
        assert!(!dispatcher.is_pending());
        assert_eq!(presses(&injector.into_sink().events), 1);
    }

    #[test]
    fn gated_work_has_no_side_effects() {
        let dispatcher = WakeDispatcher::new();
        let pocket = Pocket(Cell::new(true));
        let detector = TapDetector::new(&pocket);
        let injector = PowerKeyInjector::new(Recorder::default());

        dispatcher.enqueue(Sample::default());
        assert_eq!(block_on(dispatcher.handle_next(&detector, &injector)), None);
        assert!(injector.into_sink().events.is_empty());
    }

    #[test]
    fn work_queued_during_a_press_is_dropped() {
        let dispatcher = WakeDispatcher::new();
        let detector = TapDetector::new(NoGate);
        let injector = PowerKeyInjector::new(Recorder::default());

        dispatcher.enqueue(Sample::default());
        let late_tap = async {
            Timer::after(PWRKEY_HOLD / 2).await;
            dispatcher.enqueue(Sample::default());
        };
        let (outcome, ()) = block_on(join(
            dispatcher.handle_next(&detector, &injector),
            late_tap,
        ));

        assert_eq!(outcome, Some(WakeOutcome::Pressed));
        assert!(!dispatcher.is_pending());
        assert_eq!(presses(&injector.into_sink().events), 1);
    }
}
