//! Millisecond system tick, the time base for all flash scheduling.
use crate::hal::time;

#[cfg(target_arch = "arm")]
use core::sync::atomic::{AtomicU32, Ordering};
#[cfg(target_arch = "arm")]
use cortex_m::peripheral::{syst::SystClkSource, SYST};

/// Opaque wrapper around the millisecond counter at a certain point
/// in time. The counter wraps roughly every 49.7 days; all arithmetic
/// on ticks wraps with it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tick {
    milliseconds: u32,
}

impl Tick {
    /// Reconstructs the instant `milliseconds` after counter start.
    pub const fn from_millis(milliseconds: u32) -> Self { Self { milliseconds } }

    /// Raw counter reading.
    pub const fn millis(self) -> u32 { self.milliseconds }
}

/// Tick subtraction to obtain a time period. Remains correct when
/// the counter has wrapped between the two readings.
impl core::ops::Sub for Tick {
    type Output = time::Milliseconds;

    fn sub(self, rhs: Self) -> Self::Output {
        time::Milliseconds(self.milliseconds.wrapping_sub(rhs.milliseconds))
    }
}

/// Addition between any Millisecond-convertible type and the current tick.
impl<T: Into<time::Milliseconds>> core::ops::Add<T> for Tick {
    type Output = Self;

    fn add(self, rhs: T) -> Self {
        Self { milliseconds: self.milliseconds.wrapping_add(rhs.into().0) }
    }
}

impl time::Instant for Tick {
    fn reached(self, deadline: Self) -> bool {
        // Signed reinterpretation of the wrapped difference keeps the
        // comparison valid for deadlines up to half the counter range
        // away, on either side of a wraparound.
        (self.milliseconds.wrapping_sub(deadline.milliseconds) as i32) >= 0
    }
}

#[cfg(target_arch = "arm")]
static MILLISECONDS: AtomicU32 = AtomicU32::new(0);

/// Handle to the SysTick-driven millisecond clock. Freely copyable;
/// every handle reads the same counter.
#[cfg(target_arch = "arm")]
#[derive(Copy, Clone)]
pub struct SysTick {
    _private: (),
}

#[cfg(target_arch = "arm")]
impl SysTick {
    /// Configures the system timer for a 1 millisecond period and
    /// starts it. The SysTick exception handler must forward to
    /// [`Self::on_exception`] for the counter to advance.
    pub fn start(mut syst: SYST, sysclk: impl Into<time::Hertz>) -> Self {
        let ticks_per_milli = sysclk.into().0 / 1_000;
        // The reload register is 24 bits wide
        assert!(ticks_per_milli > 0 && ticks_per_milli <= 1 << 24);
        syst.set_clock_source(SystClkSource::Core);
        syst.set_reload(ticks_per_milli - 1);
        syst.clear_current();
        syst.enable_interrupt();
        syst.enable_counter();
        Self { _private: () }
    }

    /// Advances the counter by one millisecond. Call this from the
    /// SysTick exception handler, and from nowhere else.
    pub fn on_exception() { MILLISECONDS.fetch_add(1, Ordering::Relaxed); }
}

#[cfg(target_arch = "arm")]
impl time::Now for SysTick {
    type I = Tick;
    fn now(&self) -> Tick { Tick::from_millis(MILLISECONDS.load(Ordering::Relaxed)) }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::hal::time::Instant;

    #[test]
    fn tick_differences_and_additions() {
        // Given
        let test_tick_early = Tick::from_millis(0);
        let test_tick_late = Tick::from_millis(500);

        // Then
        assert_eq!(time::Milliseconds(500), test_tick_late - test_tick_early);

        // Given
        let test_tick_late = test_tick_late + time::Milliseconds(300);

        // Then
        assert_eq!(time::Milliseconds(800), test_tick_late - test_tick_early);
    }

    #[test]
    fn tick_arithmetic_wraps_with_the_counter() {
        // Given (an instant shortly before wraparound)
        let before_wrap = Tick::from_millis(u32::MAX - 99);

        // When (200 milliseconds pass)
        let after_wrap = before_wrap + time::Milliseconds(200);

        // Then
        assert_eq!(after_wrap.millis(), 100);
        assert_eq!(time::Milliseconds(200), after_wrap - before_wrap);
    }

    #[test]
    fn deadlines_are_reached_on_either_side_of_wraparound() {
        // Given (a deadline sitting past the wraparound point)
        let deadline = Tick::from_millis(u32::MAX - 100) + time::Milliseconds(300);
        assert_eq!(deadline.millis(), 199);

        // Then
        assert!(!Tick::from_millis(u32::MAX - 100).reached(deadline));
        assert!(!Tick::from_millis(u32::MAX).reached(deadline));
        assert!(!Tick::from_millis(0).reached(deadline));
        assert!(Tick::from_millis(199).reached(deadline));
        assert!(Tick::from_millis(5_000).reached(deadline));
    }

    #[test]
    fn deadlines_are_reached_exactly_on_the_dot() {
        // Given
        let deadline = Tick::from_millis(100);

        // Then
        assert!(!Tick::from_millis(99).reached(deadline));
        assert!(Tick::from_millis(100).reached(deadline));
        assert!(Tick::from_millis(101).reached(deadline));
    }
}
