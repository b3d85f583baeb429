//! LED interfaces
//!
//! Access to LEDs is segmented over two interfaces to facilitate
//! all usual LED patterns.

use core::convert::Infallible;

/// Interface to a LED's direct on/off/toggle operations. Likely to be
/// implemented for all LEDs, but could be left off for a flashing LED
/// that must never be held steady.
pub trait Toggle {
    fn on(&mut self);
    fn off(&mut self);
    fn toggle(&mut self);
}

/// Interface to a LED capable of counted flash sequences.
pub trait Flash {
    /// Begins `count` full on/off cycles, starting immediately with
    /// the lit phase. A count of zero still produces a single cycle.
    /// Any sequence already underway is discarded.
    fn flash(&mut self, count: u32);

    /// Advances a pending sequence. Must be called frequently; each
    /// call applies at most one scheduled transition and never
    /// blocks. Yields [`nb::Error::WouldBlock`] while a sequence is
    /// underway, and `Ok(())` once the LED has settled.
    fn poll(&mut self) -> nb::Result<(), Infallible>;
}
