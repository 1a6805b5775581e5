//! CPort reset handling.
//!
//! In the original driver, `cport` is owned by a separate CPort
//! directory layer that sets `pending_reset` before calling
//! `unipro_reset_notify`. This crate has no such external owner, so
//! [`Engine::begin_reset`] is the stand-in a caller uses to mark a
//! CPort draining before (or instead of) calling
//! [`Engine::reset_notify`].

use crate::engine::Engine;
use crate::error::{TxError, ECONNRESET};
use crate::ids::CportId;
use alloc::vec::Vec;
use core::ffi::c_void;

impl<const N: usize> Engine<N> {
    /// Marks `cportid` as draining for reset, without registering a
    /// completion callback. New `send_async` calls on this CPort start
    /// failing with [`TxError::ResetPending`] immediately; queued
    /// descriptors are cancelled the next time the worker visits this
    /// CPort.
    pub fn begin_reset(&self, cportid: CportId) -> Result<(), TxError> {
        let mut cports = self.cports.lock();
        let cport = cports
            .get_mut(cportid.as_usize())
            .ok_or(TxError::InvalidCport)?;
        cport.pending_reset = true;
        Ok(())
    }

    /// Clears `pending_reset`, allowing `send_async` to accept new
    /// descriptors on `cportid` again and a future reset cycle to issue
    /// the hardware reset primitive again. Draining the queue and
    /// firing the completion hook does not by itself reopen the CPort
    /// to new sends — only this call (the stand-in for the external
    /// CPort layer, see [`Engine::begin_reset`]) does.
    pub fn end_reset(&self, cportid: CportId) -> Result<(), TxError> {
        let mut cports = self.cports.lock();
        let cport = cports
            .get_mut(cportid.as_usize())
            .ok_or(TxError::InvalidCport)?;
        cport.pending_reset = false;
        cport.reset_issued = false;
        Ok(())
    }

    /// Registers a one-shot completion for when `cportid` finishes
    /// draining, firing it inline if the queue is already empty.
    pub fn reset_notify(
        &self,
        cportid: CportId,
        completion: crate::cport::ResetCompletionCb,
        priv_: *mut c_void,
    ) -> Result<(), TxError> {
        let mut cports = self.cports.lock();
        let cport = cports
            .get_mut(cportid.as_usize())
            .ok_or(TxError::InvalidCport)?;
        cport.pending_reset = true;

        if cport.tx_fifo.is_empty() {
            drop(cports);
            completion(cportid.0, priv_);
        } else {
            cport.reset_completion = Some((completion, priv_));
        }
        Ok(())
    }

    /// Drains every not-yet-in-flight descriptor on `cportid`, cancelling
    /// each with `-ECONNRESET`; a descriptor already mid-transfer is left
    /// for [`Engine::on_dma_event`] to reap once its DMA op completes —
    /// marked `cancelled` rather than freed here, since the DMA driver
    /// still holds a pointer into it.
    pub(crate) fn flush_cport(&self, cportid: CportId) {
        let (popped, reset_cb, issue_hw_reset) = {
            let mut cports = self.cports.lock();
            let cport = &mut cports[cportid.as_usize()];

            let mut popped = Vec::new();
            while let Some(front) = cport.tx_fifo.front() {
                if front.channel.is_some() {
                    cport.tx_fifo.front_mut().expect("just peeked").cancelled = true;
                    break;
                }
                popped.push(cport.tx_fifo.pop_front().expect("just peeked"));
            }

            let issue_hw_reset = !cport.reset_issued;
            cport.reset_issued = true;

            // `pending_reset` is left set here: `send_async` keeps
            // returning `-EPIPE` until [`Engine::end_reset`] explicitly
            // clears it, regardless of whether the queue just drained.
            let reset_cb = if cport.tx_fifo.is_empty() {
                cport.reset_completion.take()
            } else {
                None
            };

            (popped, reset_cb, issue_hw_reset)
        };

        if issue_hw_reset {
            self.link.reset_cport(cportid);
        }

        for desc in popped {
            if let Some(cb) = desc.callback {
                cb(-ECONNRESET, desc.data, desc.priv_);
            }
        }

        if let Some((cb, priv_)) = reset_cb {
            cb(cportid.0, priv_);
        }
    }
}
