use crate::time::UtcInstant;
use chrono::{TimeDelta, Utc};

pub trait Clock {
    fn now(&self) -> UtcInstant;

    // real clocks ignore it
    fn advance(&mut self, _by: TimeDelta) {}
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> UtcInstant {
        UtcInstant(Utc::now())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: UtcInstant,
}

impl FixedClock {
    pub fn new(instant: UtcInstant) -> Self {
        FixedClock { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> UtcInstant {
        self.instant
    }

    fn advance(&mut self, by: TimeDelta) {
        self.instant = self.instant + by;
    }
}
