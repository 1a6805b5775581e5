//! Public submission API.

use crate::descriptor::{Descriptor, SendCallback};
use crate::engine::Engine;
use crate::error::TxError;
use crate::ids::CportId;
use crate::sync::semaphore::Semaphore;
use alloc::boxed::Box;
use core::ffi::c_void;
use core::sync::atomic::{AtomicI32, Ordering};

impl<const N: usize> Engine<N> {
    /// Queues `data[..len]` for transmission on `cportid` and returns
    /// immediately; `callback` fires exactly once, from worker context,
    /// once the whole buffer has been moved or the CPort is reset out
    /// from under it.
    pub fn send_async(
        &self,
        cportid: CportId,
        data: *const u8,
        len: usize,
        callback: Option<SendCallback>,
        priv_: *mut c_void,
    ) -> Result<(), TxError> {
        if cportid.as_usize() >= self.cport_count() {
            return Err(TxError::InvalidCport);
        }

        {
            let cports = self.cports.lock();
            if cports[cportid.as_usize()].pending_reset {
                return Err(TxError::ResetPending);
            }
        }

        let desc = Box::try_new(Descriptor::new(cportid, data, len, callback, priv_))
            .map_err(|_| TxError::NoMemory)?;

        {
            let mut cports = self.cports.lock();
            let cport = &mut cports[cportid.as_usize()];
            // Re-check: a reset could have begun between the two locks.
            if cport.pending_reset {
                return Err(TxError::ResetPending);
            }
            cport.tx_fifo.push_back(desc);
        }

        self.tx_fifo_lock.up();
        Ok(())
    }

    /// Blocking wrapper over [`Engine::send_async`] that waits for the
    /// transfer to complete: an on-stack binary semaphore plus a status
    /// slot, posted by an adapter callback once the real callback would
    /// have fired.
    pub fn send(&self, cportid: CportId, data: *const u8, len: usize) -> Result<(), TxError> {
        let state = SyncState {
            done: Semaphore::new(0),
            status: AtomicI32::new(0),
        };

        self.send_async(
            cportid,
            data,
            len,
            Some(sync_send_callback),
            (&state as *const SyncState) as *mut c_void,
        )?;

        state.done.down();

        match state.status.load(Ordering::Acquire) {
            0 => Ok(()),
            status => Err(TxError::Hardware(status)),
        }
    }
}

struct SyncState {
    done: Semaphore,
    status: AtomicI32,
}

/// Completion hook for [`Engine::send`]; `priv_` is the address of a
/// stack-local [`SyncState`] that outlives the call because `send`
/// blocks on `done` before returning.
fn sync_send_callback(status: i32, _buf: *const u8, priv_: *mut c_void) -> i32 {
    let state = unsafe { &*(priv_ as *const SyncState) };
    state.status.store(status, Ordering::Release);
    state.done.up();
    0
}
