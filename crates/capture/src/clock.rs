//! Time source for the capture loop.

use std::cell::Cell;
use std::time::Duration;

/// Wall clock plus the ability to wait.
///
/// The capture loop only ever asks for the current time and for a pause
/// between snapshots, so both live behind this trait.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;

    /// Block the current thread for `duration`.
    fn sleep(&self, duration: Duration);
}

/// Real time via `SystemTime` and `thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        ael_core::unix_millis_now()
    }

    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Deterministic clock for tests.
///
/// `sleep` returns immediately and advances the clock by the requested
/// duration.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: Cell<u64>,
    sleeps: Cell<u32>,
}

impl ManualClock {
    /// Clock starting at `start_ms`.
    pub fn starting_at(start_ms: u64) -> Self {
        ManualClock {
            now_ms: Cell::new(start_ms),
            sleeps: Cell::new(0),
        }
    }

    /// Move the clock forward without counting a sleep.
    pub fn advance(&self, duration: Duration) {
        self.now_ms
            .set(self.now_ms.get().saturating_add(duration.as_millis() as u64));
    }

    /// Set the clock to an absolute time, possibly backwards.
    pub fn set(&self, now_ms: u64) {
        self.now_ms.set(now_ms);
    }

    /// Number of `sleep` calls so far.
    pub fn sleep_count(&self) -> u32 {
        self.sleeps.get()
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now_ms.get()
    }

    fn sleep(&self, duration: Duration) {
        self.sleeps.set(self.sleeps.get() + 1);
        self.advance(duration);
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }

    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}
