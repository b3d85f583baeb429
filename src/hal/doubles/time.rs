use crate::{drivers::systick::Tick, hal::time};
use std::{cell::Cell, rc::Rc};

/// Manually driven clock double. Clones share a single timeline, so
/// a bank of devices under test observes one consistent time.
#[derive(Clone, Debug, Default)]
pub struct MockSysTick {
    now: Rc<Cell<Tick>>,
}

impl MockSysTick {
    /// Moves the shared timeline to an absolute instant.
    pub fn set(&self, instant: Tick) { self.now.set(instant); }

    /// Advances the shared timeline by a period.
    pub fn advance(&self, period: impl Into<time::Milliseconds>) {
        self.now.set(self.now.get() + period);
    }
}

impl time::Now for MockSysTick {
    type I = Tick;
    fn now(&self) -> Tick { self.now.get() }
}
