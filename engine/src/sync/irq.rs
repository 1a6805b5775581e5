//! Interrupt-masked critical sections.
//!
//! A brief critical section that excludes both other producers and the
//! completion handler, which on real hardware runs from an interrupt
//! context that a plain spinlock can't exclude. This crate targets an
//! embedded bridge SoC rather than any one fixed architecture, so the
//! masking primitive (`cli`/`sti` and equivalents) is generalized into
//! an `InterruptController` collaborator trait instead of being called
//! directly.

use crate::sync::mutex::{Mutex, MutexGuard};
use alloc::sync::Arc;
use core::{
    fmt,
    ops::{Deref, DerefMut},
};

/// Masks and unmasks the platform's single interrupt line.
///
/// `mask` returns whatever state is needed to restore the previous
/// level: "was enabled before masking", collapsed to a bool.
pub trait InterruptController: Send + Sync {
    fn mask(&self) -> bool;
    fn unmask(&self, was_enabled: bool);
}

/// An `InterruptController` for single-core host/test builds, where
/// there is no real interrupt line to mask — mutual exclusion comes
/// from the inner `Mutex` alone.
pub struct NullInterruptController;

impl InterruptController for NullInterruptController {
    fn mask(&self) -> bool {
        true
    }
    fn unmask(&self, _was_enabled: bool) {}
}

pub struct MutexIrq<T: ?Sized> {
    intr: Arc<dyn InterruptController>,
    lock: Mutex<T>,
}

pub struct MutexGuardIrq<'a, T: ?Sized + 'a> {
    guard: MutexGuard<'a, T>,
    was_enabled: bool,
    intr: Arc<dyn InterruptController>,
}

unsafe impl<T: ?Sized + Send> Sync for MutexIrq<T> {}
unsafe impl<T: ?Sized + Send> Send for MutexIrq<T> {}

impl<T> MutexIrq<T> {
    pub fn new(data: T, intr: Arc<dyn InterruptController>) -> MutexIrq<T> {
        MutexIrq {
            intr,
            lock: Mutex::new(data),
        }
    }

    #[inline(always)]
    pub fn into_inner(self) -> T {
        self.lock.into_inner()
    }
}

impl<T: ?Sized> MutexIrq<T> {
    #[inline(always)]
    pub fn lock(&self) -> MutexGuardIrq<T> {
        let was_enabled = self.intr.mask();
        MutexGuardIrq {
            guard: self.lock.lock(),
            was_enabled,
            intr: self.intr.clone(),
        }
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for MutexIrq<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MutexIrq {{ data: {:?} }}", &*self.lock.lock())
    }
}

impl<'a, T: ?Sized> Deref for MutexGuardIrq<'a, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.guard
    }
}

impl<'a, T: ?Sized> DerefMut for MutexGuardIrq<'a, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.guard
    }
}

impl<'a, T: ?Sized> Drop for MutexGuardIrq<'a, T> {
    fn drop(&mut self) {
        self.intr.unmask(self.was_enabled);
    }
}
