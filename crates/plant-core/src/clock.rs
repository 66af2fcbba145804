use chrono::{DateTime, Duration, FixedOffset, Local, Offset, Utc};
use std::cell::Cell;
use std::rc::Rc;

/// Source of the reference instant for commands and read views.
///
/// The offset of the returned instant defines the local calendar used for
/// day truncation.
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock in the machine's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let now = Local::now();
        now.with_timezone(now.offset())
    }
}

/// Manually driven clock. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Rc<Cell<DateTime<FixedOffset>>>,
}

impl FixedClock {
    pub fn at(now: DateTime<FixedOffset>) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    pub fn utc(now: DateTime<Utc>) -> Self {
        Self::at(now.with_timezone(&Utc.fix()))
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.now.get()
    }
}
