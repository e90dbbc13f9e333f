//! Power Key Injector
//!
//! Synthesizes a power key press/release on the injection channel. This is
//! the only place power key events are produced.
//!
//! # Sequence
//! 1. `KEY_POWER` down, `SYN`
//! 2. hold for [`PWRKEY_HOLD`]
//! 3. `KEY_POWER` up, `SYN`
//! 4. hold for [`PWRKEY_HOLD`]
//!
//! The sink is guarded by a mutex that is only ever try-locked: a second
//! trigger while a sequence is running returns at once, since the wake
//! already in flight satisfies it. Stacking a second press would turn the
//! display straight back off.

use crate::system::error::InjectError;
use crate::system::event::{InputEvent, KEY_POWER};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Timer};

/// Time the synthetic key is held down, and the settle time after release
pub const PWRKEY_HOLD: Duration = Duration::from_millis(20);

/// Identity of the synthetic power key device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceIdentity {
    pub name: &'static str,
    pub phys: &'static str,
    /// The only key the device is capable of
    pub key: u16,
}

/// The device every injected power key event is reported from
pub const POWER_KEY_DEVICE: DeviceIdentity = DeviceIdentity {
    name: "ot2w_pwrkey",
    phys: "ot2w_pwrkey/input0",
    key: KEY_POWER,
};

/// Injection channel for synthetic input events
pub trait KeySink {
    /// Emits one event; fails if the channel went away
    fn emit(&mut self, event: InputEvent) -> Result<(), InjectError>;
}

/// Result of one trigger attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WakeOutcome {
    /// A full press/release cycle was emitted
    Pressed,
    /// Another cycle held the lock; nothing was emitted
    AlreadyInFlight,
    /// The channel failed part way; the attempt was dropped
    Abandoned(InjectError),
}

/// Power key injector guarding a [`KeySink`]
pub struct PowerKeyInjector<S: KeySink> {
    /// The wake lock and the channel it protects
    sink: Mutex<CriticalSectionRawMutex, S>,
}

impl<S: KeySink> PowerKeyInjector<S> {
    pub const fn new(sink: S) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }

    /// Identity the sink should register its synthetic device under
    pub fn identity(&self) -> &'static DeviceIdentity {
        &POWER_KEY_DEVICE
    }

    /// Presses and releases the power key, unless a press is already running
    pub async fn trigger(&self) -> WakeOutcome {
        let Ok(mut sink) = self.sink.try_lock() else {
            debug!("Power key press already in flight, skipping");
            return WakeOutcome::AlreadyInFlight;
        };

        match press_and_release(&mut *sink).await {
            Ok(()) => {
                info!("Power key pressed");
                WakeOutcome::Pressed
            }
            Err(e) => {
                // A stale wake is worthless, so there is no retry.
                warn!("Power key injection abandoned: {}", e);
                WakeOutcome::Abandoned(e)
            }
        }
    }

    /// Consumes the injector and returns the sink
    pub fn into_sink(self) -> S {
        self.sink.into_inner()
    }
}

async fn press_and_release<S: KeySink>(sink: &mut S) -> Result<(), InjectError> {
    sink.emit(InputEvent::key(KEY_POWER, true))?;
    sink.emit(InputEvent::syn())?;
    Timer::after(PWRKEY_HOLD).await;
    sink.emit(InputEvent::key(KEY_POWER, false))?;
    sink.emit(InputEvent::syn())?;
    Timer::after(PWRKEY_HOLD).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::event::EventType;
    use embassy_futures::block_on;
    use embassy_futures::join::join;
    use embassy_time::Instant;

    #[derive(Default)]
    struct Recorder {
        events: Vec<(Instant, InputEvent)>,
    }

    impl KeySink for Recorder {
        fn emit(&mut self, event: InputEvent) -> Result<(), InjectError> {
            self.events.push((Instant::now(), event));
            Ok(())
        }
    }

    /// Accepts `budget` events, then reports the channel gone
    struct FlakySink {
        budget: usize,
        emitted: usize,
    }

    impl KeySink for FlakySink {
        fn emit(&mut self, _event: InputEvent) -> Result<(), InjectError> {
            if self.emitted == self.budget {
                return Err(InjectError::ChannelUnavailable);
            }
            self.emitted += 1;
            Ok(())
        }
    }

    #[test]
    fn emits_press_release_with_sync_markers() {
        let injector = PowerKeyInjector::new(Recorder::default());
        assert_eq!(block_on(injector.trigger()), WakeOutcome::Pressed);

        let events = injector.into_sink().events;
        let kinds: Vec<InputEvent> = events.iter().map(|(_, e)| *e).collect();
        assert_eq!(
            kinds,
            vec![
                InputEvent::new(EventType::Key, KEY_POWER, 1),
                InputEvent::syn(),
                InputEvent::new(EventType::Key, KEY_POWER, 0),
                InputEvent::syn(),
            ]
        );

        let held = events[2].0 - events[0].0;
        assert!(held >= PWRKEY_HOLD, "key held for {:?}", held);
    }

    #[test]
    fn holds_the_lock_through_the_settle_time() {
        let injector = PowerKeyInjector::new(Recorder::default());
        let start = Instant::now();
        block_on(injector.trigger());
        assert!(start.elapsed() >= PWRKEY_HOLD * 2);
    }

    #[test]
    fn concurrent_trigger_is_dropped_not_queued() {
        let injector = PowerKeyInjector::new(Recorder::default());

        let (first, second) = block_on(join(injector.trigger(), injector.trigger()));
        assert_eq!(first, WakeOutcome::Pressed);
        assert_eq!(second, WakeOutcome::AlreadyInFlight);

        // The lock is free again once the cycle is over.
        assert_eq!(block_on(injector.trigger()), WakeOutcome::Pressed);

        let presses = injector
            .into_sink()
            .events
            .iter()
            .filter(|(_, e)| e.kind == EventType::Key && e.value == 1)
            .count();
        assert_eq!(presses, 2);
    }

    #[test]
    fn unavailable_channel_abandons_the_attempt() {
        let injector = PowerKeyInjector::new(FlakySink { budget: 0, emitted: 0 });
        assert_eq!(
            block_on(injector.trigger()),
            WakeOutcome::Abandoned(InjectError::ChannelUnavailable)
        );

        // Failing mid-sequence is not retried either, and releases the lock.
        let injector = PowerKeyInjector::new(FlakySink { budget: 2, emitted: 0 });
        assert_eq!(
            block_on(injector.trigger()),
            WakeOutcome::Abandoned(InjectError::ChannelUnavailable)
        );
        assert_eq!(
            block_on(injector.trigger()),
            WakeOutcome::Abandoned(InjectError::ChannelUnavailable)
        );
        assert_eq!(injector.into_sink().emitted, 2);
    }

    #[test]
    fn reports_the_synthetic_device_identity() {
        let injector = PowerKeyInjector::new(Recorder::default());
        assert_eq!(injector.identity().name, "ot2w_pwrkey");
        assert_eq!(injector.identity().phys, "ot2w_pwrkey/input0");
        assert_eq!(injector.identity().key, KEY_POWER);
    }
}
