//! DMA completion callback.
//!
//! Ported from `unipro_dma_tx_callback`. START only matters on ES3+: it
//! is the just-in-time signal to (re)bind the channel's ATABL REQn line
//! to the CPort this op belongs to, deferred this late so a single
//! channel can keep serving a rotating set of CPorts without
//! pre-reserving a request per CPort. COMPLETE is where the
//! descriptor's `data_offset` is checked against its `len` to decide
//! whether the whole send is done (strobe EOM, invoke the caller's
//! callback, retire the ATABL request, pop the descriptor) or whether
//! another chunk still needs picking (ES2 partial transfer).

use crate::collab::DmaEvent;
use crate::cport::ResetCompletionCb;
use crate::engine::Engine;
use crate::error::{TxError, ECONNRESET};
use crate::ids::CportId;
use alloc::boxed::Box;
use core::ffi::c_void;

impl<const N: usize> Engine<N> {
    /// Entry point collaborators call back into for DMA notifications.
    ///
    /// On a `Start` event, an `Err` return means the ATABL bind/activate
    /// dance failed — the caller (the DMA driver) is expected to abort
    /// the op rather than let the hardware transfer bytes into a CPort
    /// the channel isn't actually wired to. `Complete` never fails.
    pub fn on_dma_event(&self, cportid: CportId, event: DmaEvent) -> Result<(), TxError> {
        match event {
            DmaEvent::Start => self.on_start(cportid),
            DmaEvent::Complete => {
                self.on_complete(cportid);
                Ok(())
            }
        }
    }

    /// Binds this channel's ATABL request to `cportid` just in time. A
    /// no-op when ATABL isn't in play (ES2) or the channel never got a
    /// request allocated to begin with.
    fn on_start(&self, cportid: CportId) -> Result<(), TxError> {
        let Some(atabl) = self.rev.atabl() else {
            return Ok(());
        };
        let idx = self.channel_index_for(cportid);

        let mut channels = self.channels.lock();
        let channel = &mut channels.channels[idx];
        let Some(req) = channel.atabl_req else {
            return Ok(());
        };

        if channel.bound_cportid.is_some() && atabl.req_is_activated(req) {
            atabl.deactivate_req(req);
        }

        if channel.bound_cportid != Some(cportid) {
            if channel.bound_cportid.is_some() {
                atabl.disconnect_cport_from_req(req);
                channel.bound_cportid = None;
            }
            if let Err(e) = atabl.connect_cport_to_req(cportid, req) {
                unipro_tx_shared::eprintln!("atabl connect failed for {:?}", cportid);
                return Err(e);
            }
        }

        match atabl.activate_req(req) {
            Ok(()) => {
                channel.bound_cportid = Some(cportid);
                Ok(())
            }
            Err(e) => {
                unipro_tx_shared::eprintln!("atabl activate failed for {:?}", cportid);
                Err(e)
            }
        }
    }

    fn on_complete(&self, cportid: CportId) {
        let idx = self.channel_index_for(cportid);

        let finished: Option<(Box<crate::descriptor::Descriptor>, Option<(ResetCompletionCb, *mut c_void)>)> = {
            let mut cports = self.cports.lock();
            let cport = &mut cports[cportid.as_usize()];

            let Some(desc) = cport.tx_fifo.front_mut() else {
                return;
            };
            if let Some(op) = desc.op.take() {
                self.dma.op_free(op);
            }
            desc.channel = None;

            if desc.cancelled || desc.data_offset >= desc.len {
                let desc = cport.tx_fifo.pop_front().expect("front checked above");
                // Only `Engine::end_reset` clears `pending_reset`; a
                // drained queue alone doesn't reopen the CPort to new
                // sends.
                let reset_cb = if cport.tx_fifo.is_empty() {
                    cport.reset_completion.take()
                } else {
                    None
                };
                Some((desc, reset_cb))
            } else {
                None
            }
        };

        self.channels.lock().channels[idx].busy = false;

        if let Some((desc, reset_cb)) = finished {
            if !desc.cancelled {
                self.link.strobe_eom(cportid);
            }
            if let Some(cb) = desc.callback {
                let status = if desc.cancelled { -ECONNRESET } else { 0 };
                cb(status, desc.data, desc.priv_);
            }
            // Only a real finish retires the request line; a cancelled
            // descriptor never told ATABL it had anything to transfer
            // in the first place.
            if !desc.cancelled {
                if let Some(atabl) = self.rev.atabl() {
                    let req = self.channels.lock().channels[idx].atabl_req;
                    if let Some(req) = req {
                        atabl.transfer_completed(req);
                    }
                }
            }
            if let Some((cb, priv_)) = reset_cb {
                cb(cportid.0, priv_);
            }
        }

        // Either a chunk finished (more descriptors may now be sendable)
        // or a partial chunk cleared `channel` so the picker can re-pick
        // this CPort for its next chunk — either way, wake the worker.
        self.tx_fifo_lock.up();
    }
}
