//! Per-CPort TX queue.
//!
//! An intrusive list, a deque, or a ring all satisfy the only
//! requirement (O(1) head access, O(1) removal during a reset flush);
//! this crate uses `alloc::VecDeque` of heap-owned descriptors rather
//! than a hand-rolled intrusive list.

use crate::descriptor::Descriptor;
use alloc::boxed::Box;
use alloc::collections::VecDeque;
use core::ffi::c_void;

/// Invoked once when a pending reset finishes draining a CPort, with
/// the CPort id and the opaque argument registered at `begin_reset`.
pub type ResetCompletionCb = fn(cportid_raw: u32, priv_: *mut c_void);

/// Engine-owned state for one CPort.
///
/// The original driver treats `cport` as an externally-owned struct
/// this module only reads/writes three fields of; this crate folds
/// that state in directly (one `CportState` per dense id) so the
/// engine is self-contained and testable without a separate CPort
/// directory collaborator.
pub struct CportState {
    pub tx_fifo: VecDeque<Box<Descriptor>>,
    pub pending_reset: bool,
    pub reset_completion: Option<(ResetCompletionCb, *mut c_void)>,
    pub tx_buf: usize,
    /// Set once `flush_cport` has issued the synchronous hardware reset
    /// for the current reset cycle, so a picker that repeatedly observes
    /// `pending_reset` while an in-flight chunk drains doesn't re-strobe
    /// the hardware reset on every round-robin pass.
    pub reset_issued: bool,
}

// See `Descriptor`'s `Send` impl: `reset_completion`'s `priv_` pointer
// is opaque caller state handed back verbatim, never dereferenced here.
unsafe impl Send for CportState {}

impl CportState {
    pub fn new(tx_buf: usize) -> Self {
        Self {
            tx_fifo: VecDeque::new(),
            pending_reset: false,
            reset_completion: None,
            tx_buf,
            reset_issued: false,
        }
    }
}
