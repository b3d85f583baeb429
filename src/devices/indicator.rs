//! Timed flash sequencing for indicator LEDs.
//!
//! The heart of this module is a deadline-based state machine: every
//! pending output transition is stored as an absolute instant plus
//! the level to apply, and frequent polling fires transitions as
//! their deadlines pass. Nothing here blocks or sleeps.

use core::convert::Infallible;

use crate::{
    hal::{
        gpio::OutputPin,
        led::{Flash, Toggle},
        time::{self, Instant, Milliseconds},
    },
    static_assertions::const_assert,
};

#[cfg(not(target_arch = "arm"))]
use crate::hal::doubles::gpio::MockPin;

/// Duration of the lit phase of a flash cycle unless overridden.
pub const DEFAULT_ON_DUTY: Milliseconds = Milliseconds(500);
/// Duration of the unlit phase of a flash cycle unless overridden.
pub const DEFAULT_OFF_DUTY: Milliseconds = Milliseconds(500);
const_assert!(DEFAULT_ON_DUTY.0 > 0);
const_assert!(DEFAULT_OFF_DUTY.0 > 0);

#[derive(Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Logic {
    /// Logical high equals "on"
    Direct,
    /// Logical high equals "off"
    Inverted,
}

// Extension trait to ensure indicator pins are correctly operated
// based on the indicator's direct or inverted logic
trait LedPin: OutputPin {
    fn off(&mut self, logic: Logic) {
        if let Logic::Direct = logic {
            self.set_low();
        } else {
            self.set_high();
        }
    }

    fn on(&mut self, logic: Logic) {
        if let Logic::Direct = logic {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

// Blanket implementation of LedPin for all output pins
impl<Pin: OutputPin> LedPin for Pin {}

/// A scheduled output change: the level to apply, and when.
#[derive(Copy, Clone)]
struct Transition<I> {
    deadline: I,
    lit: bool,
}

/// Single-pin indicator LED with timed flash sequencing
///
/// Implements Toggle and Flash. Steady control takes effect
/// immediately; flash sequences advance through frequent polling,
/// one transition per poll at most.
///
/// # Example
/// ```
/// # use aldis::devices::indicator::*;
/// # use aldis::hal::led::*;
/// # use aldis::hal::doubles::{gpio::MockPin, time::MockSysTick};
/// # use aldis::hal::time::U32Ext;
/// # let clock = MockSysTick::default();
/// let mut indicator = TimedIndicator::new(MockPin::default(), clock.clone(), Logic::Direct);
///
/// // Two full on/off cycles, driven entirely by polling
/// indicator.flash(2);
/// assert!(indicator.is_on());
///
/// clock.advance(500.ms());
/// assert_eq!(indicator.poll(), Err(nb::Error::WouldBlock));
/// assert!(!indicator.is_on());
///
/// clock.advance(500.ms());
/// indicator.poll().ok();
/// assert!(indicator.is_on());
///
/// clock.advance(500.ms());
/// assert_eq!(indicator.poll(), Ok(()));
/// assert!(!indicator.is_on());
/// # assert!(indicator.is_idle());
/// ```
pub struct TimedIndicator<Pin, T>
where
    Pin: OutputPin,
    T: time::Now,
{
    pin: Pin,
    clock: T,
    logic: Logic,
    on_duty: Milliseconds,
    off_duty: Milliseconds,
    transition: Option<Transition<T::I>>,
    remaining: u32,
    is_on: bool,
    id: u8,
}

impl<Pin, T> TimedIndicator<Pin, T>
where
    Pin: OutputPin,
    T: time::Now,
{
    /// Constructs the indicator over a pin already configured as an
    /// output, driving it to its unlit level.
    pub fn new(pin: Pin, clock: T, logic: Logic) -> Self {
        Self::with_duties(pin, clock, logic, DEFAULT_ON_DUTY, DEFAULT_OFF_DUTY)
    }

    /// As [`Self::new`], with custom durations for the lit and unlit
    /// phases of a flash cycle.
    pub fn with_duties(
        mut pin: Pin,
        clock: T,
        logic: Logic,
        on_duty: impl Into<Milliseconds>,
        off_duty: impl Into<Milliseconds>,
    ) -> Self {
        pin.off(logic);
        Self {
            pin,
            clock,
            logic,
            on_duty: on_duty.into(),
            off_duty: off_duty.into(),
            transition: None,
            remaining: 0,
            is_on: false,
            id: 0,
        }
    }

    /// Constructs one indicator per pin, in array order, over a shared
    /// clock. Identifiers are assigned from the array index.
    pub fn for_pins<const N: usize>(pins: [Pin; N], clock: T, logic: Logic) -> [Self; N]
    where
        T: Clone,
    {
        // Identifiers must cover the whole bank
        assert!(N <= 1 + u8::MAX as usize);
        let mut index = 0usize;
        pins.map(|pin| {
            let mut indicator = Self::new(pin, clock.clone(), logic);
            indicator.id = index as u8;
            index += 1;
            indicator
        })
    }

    /// Identifier carried in diagnostics. Zero unless assigned by
    /// [`Self::for_pins`].
    pub fn id(&self) -> u8 { self.id }

    pub fn is_on(&self) -> bool { self.is_on }

    /// True when no timed transition is pending.
    pub fn is_idle(&self) -> bool { self.transition.is_none() }

    // Single point through which every output level flows. Repeated
    // writes of the current level are elided.
    fn apply(&mut self, lit: bool) {
        if lit != self.is_on {
            if lit {
                self.pin.on(self.logic);
            } else {
                self.pin.off(self.logic);
            }
        }
        self.is_on = lit;
    }
}

impl<Pin, T> Toggle for TimedIndicator<Pin, T>
where
    Pin: OutputPin,
    T: time::Now,
{
    fn on(&mut self) {
        self.transition = None;
        self.apply(true);
    }

    fn off(&mut self) {
        self.transition = None;
        self.apply(false);
    }

    fn toggle(&mut self) {
        if self.is_on {
            self.off();
        } else {
            self.on();
        }
    }
}

impl<Pin, T> Flash for TimedIndicator<Pin, T>
where
    Pin: OutputPin,
    T: time::Now,
{
    fn flash(&mut self, count: u32) {
        // The first cycle starts right here; only the others remain.
        self.remaining = count.saturating_sub(1);
        self.apply(true);
        self.transition =
            Some(Transition { deadline: self.clock.now() + self.on_duty, lit: false });
        #[cfg(feature = "defmt")]
        defmt::trace!("indicator {=u8}: flash requested (x{=u32})", self.id, count);
    }

    fn poll(&mut self) -> nb::Result<(), Infallible> {
        if let Some(Transition { deadline, lit }) = self.transition {
            if self.clock.now().reached(deadline) {
                self.apply(lit);
                // Rescheduling is relative to the deadline, not to the
                // current instant, so late polls don't accumulate drift.
                self.transition = if lit {
                    Some(Transition { deadline: deadline + self.on_duty, lit: false })
                } else if self.remaining > 0 {
                    self.remaining -= 1;
                    Some(Transition { deadline: deadline + self.off_duty, lit: true })
                } else {
                    None
                };
                #[cfg(feature = "defmt")]
                defmt::trace!(
                    "indicator {=u8}: {=bool}, {=u32} cycles pending",
                    self.id,
                    lit,
                    self.remaining
                );
            }
        }

        if self.transition.is_some() {
            Err(nb::Error::WouldBlock)
        } else {
            Ok(())
        }
    }
}

#[cfg(not(target_arch = "arm"))]
impl<T: time::Now> TimedIndicator<MockPin, T> {
    /// Test access to the pin and its recorded write history.
    #[doc(hidden)]
    pub fn pin(&self) -> &MockPin { &self.pin }
}
