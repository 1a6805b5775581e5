//! Counting semaphore used as the worker's wake signal.
//!
//! A spinning implementation: an atomic count, no wait queue, no thread
//! parking. Over-signalling is harmless because the worker drains
//! every sendable CPort before blocking again, and this engine has
//! exactly one consumer, so there's nothing a wait queue would buy
//! here.

use core::sync::atomic::{AtomicIsize, Ordering};

pub struct Semaphore {
    count: AtomicIsize,
}

impl Semaphore {
    pub const fn new(initial: isize) -> Self {
        Self {
            count: AtomicIsize::new(initial),
        }
    }

    /// Blocks (spinning) until the count is positive, then decrements it.
    pub fn down(&self) {
        loop {
            let cur = self.count.load(Ordering::Acquire);
            if cur > 0
                && self
                    .count
                    .compare_exchange_weak(cur, cur - 1, Ordering::AcqRel, Ordering::Acquire)
                    .is_ok()
            {
                return;
            }
            core::hint::spin_loop();
        }
    }

    /// Non-blocking `down`: decrements and returns `true` only if the
    /// count was positive.
    pub fn try_down(&self) -> bool {
        let cur = self.count.load(Ordering::Acquire);
        cur > 0
            && self
                .count
                .compare_exchange(cur, cur - 1, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
    }

    /// Signals the semaphore. Extra signals beyond the number of
    /// pending wakeups are harmless no-ops.
    pub fn up(&self) {
        self.count.fetch_add(1, Ordering::Release);
    }
}
