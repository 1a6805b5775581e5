//! Transfer descriptor.

use crate::collab::DmaOpHandle;
use crate::ids::{CportId, ChannelIndex};
use core::ffi::c_void;

/// Completion hook invoked exactly once per accepted `send_async`, with
/// `status` 0 on success or a negative errno on cancellation.
///
/// A plain `fn` pointer plus opaque `priv` argument, matching the
/// original's C calling convention (`unipro_send_completion_t`) rather
/// than a boxed closure, since descriptors cross what is conceptually
/// an FFI boundary to caller-owned memory.
pub type SendCallback = fn(status: i32, buf: *const u8, priv_: *mut c_void) -> i32;

/// Engine-internal record tracking one `send_async` call through the
/// pipeline.
pub struct Descriptor {
    pub cport: CportId,
    /// Caller-owned payload; never mutated, never released by this crate.
    pub data: *const u8,
    pub len: usize,
    pub data_offset: usize,
    pub callback: Option<SendCallback>,
    pub priv_: *mut c_void,
    /// `None` until a DMA op is submitted; cleared by the completion
    /// handler on the ES2 partial-transfer path so the picker can pick
    /// this descriptor again for its next chunk.
    pub channel: Option<ChannelIndex>,
    /// The DMA op backing the in-flight chunk, if any. Freed by the
    /// completion handler as soon as its own COMPLETE fires, regardless
    /// of whether that chunk finished the whole descriptor.
    pub op: Option<DmaOpHandle>,
    /// Set by `flush_cport` when a reset arrives while this descriptor
    /// is mid-flight (`channel.is_some()`), so the descriptor is freed
    /// by its own COMPLETE instead of being ripped out from under a DMA
    /// driver that still holds a callback argument into it.
    pub cancelled: bool,
}

// `data`/`priv_` are caller-supplied pointers handed to us across what
// is conceptually an FFI boundary; the engine never dereferences them
// except to pass them back to `callback`, so moving a `Descriptor`
// between the producer and the worker/completion-handler contexts is
// sound.
unsafe impl Send for Descriptor {}

impl Descriptor {
    pub fn new(
        cport: CportId,
        data: *const u8,
        len: usize,
        callback: Option<SendCallback>,
        priv_: *mut c_void,
    ) -> Self {
        Self {
            cport,
            data,
            len,
            data_offset: 0,
            callback,
            priv_,
            channel: None,
            op: None,
            cancelled: false,
        }
    }
}
