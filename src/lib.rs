//! # Indicator Lamp Library
//!
//! This crate contains non-blocking, poll-driven control of
//! indicator LEDs in library form.
#![cfg_attr(test, allow(unused_imports))]
#![cfg_attr(target_arch = "arm", no_std)]

extern crate static_assertions;

pub mod utilities {
    pub mod guard;
}

pub mod hal;
pub mod devices;
pub mod drivers;
