//! Test doubles for the `hal` interfaces, available on host targets
//! only.

pub mod gpio;
pub mod time;
