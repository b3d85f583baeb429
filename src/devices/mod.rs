//! Complex modules with business logic related to the problem
//! domain, that lay on top of abstract drivers. Devices are
//! generic over `hal` interfaces, while board specifics (pins,
//! clock source) are injected at construction.

pub mod indicator;

/// General purpose traits that summarize requirements on devices.
pub mod traits {
    use crate::hal::led::{Flash, Toggle};
    use marker_blanket::marker_blanket;

    /// A full-featured indicator supports both steady control and
    /// counted flash sequences.
    #[marker_blanket]
    pub trait Indicator: Toggle + Flash {}
}
