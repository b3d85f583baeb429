//! # Simple GPIO interface
//!
//! Interface to output pins, automatically implemented by
//! GPIOs that support the operation.
//!
//! Board support crates with typestate GPIO implement this trait
//! only for pins already configured as outputs, so satisfying the
//! bound subsumes any explicit pin configuration step.

/// Interface to a writable pin.
pub trait OutputPin {
    fn set_low(&mut self);
    fn set_high(&mut self);
}
