//! Driver implementations satisfying the `hal` interfaces on
//! supported platforms. They offer a safe API over the raw
//! peripherals they own.

pub mod systick;
