//! Chunk submission.
//!
//! Ported from `unipro_dma_xfer`: on ES2 (no ATABL) each DMA op moves
//! at most `get_tx_free_buffer_space` bytes, so one descriptor can take
//! several chunks; on ES3+ the whole remainder goes in a single op and
//! ATABL arbitrates backpressure in hardware.

use crate::collab::{DmaEventMask, DmaSgEntry};
use crate::engine::Engine;
use crate::ids::CportId;

impl<const N: usize> Engine<N> {
    /// Submits the next chunk of `cportid`'s head descriptor.
    ///
    /// Only called right after [`Engine::pick`] returned `cportid`, so
    /// the head descriptor exists, is not already in flight, and the
    /// assigned channel is free.
    pub(crate) fn dma_xfer(&self, cportid: CportId) {
        let (data, data_offset, len) = {
            let cports = self.cports.lock();
            let desc = cports[cportid.as_usize()]
                .tx_fifo
                .front()
                .expect("pick() only returns cports with a head descriptor");
            (desc.data, desc.data_offset, desc.len)
        };

        let remaining = len - data_offset;
        let chunk = if self.rev.atabl().is_some() {
            remaining
        } else {
            remaining.min(self.link.get_tx_free_buffer_space(cportid))
        };
        if chunk == 0 {
            return;
        }

        let op = match self.dma.op_alloc() {
            Ok(op) => op,
            Err(_) => {
                unipro_tx_shared::eprintln!("op_alloc failed for {:?}", cportid);
                return;
            }
        };

        let idx = self.channel_index_for(cportid);
        let dma_handle = {
            let channels = self.channels.lock();
            channels.channels[idx]
                .dma_handle
                .expect("allocated channel must have a dma handle")
        };

        // ATABL binding/activation is deferred to the START event
        // (`Engine::on_start`) rather than done here, so a channel's
        // REQn line is only (re)wired once the DMA driver has actually
        // accepted this op.
        let tx_buf = self.cports.lock()[cportid.as_usize()].tx_buf;
        // The first dword of the CPort TX buffer is the header slot;
        // continuation chunks land one 64-bit word in.
        let dst_addr = if data_offset > 0 { tx_buf + 8 } else { tx_buf };
        let sg = DmaSgEntry {
            src_addr: (data as usize) + data_offset,
            dst_addr,
            len: chunk,
        };
        let events = DmaEventMask {
            start: self.rev.atabl().is_some(),
            complete: true,
        };

        match self.dma.enqueue(dma_handle, op, sg, events, cportid) {
            Ok(()) => {
                self.channels.lock().channels[idx].busy = true;

                let mut cports = self.cports.lock();
                let desc = cports[cportid.as_usize()]
                    .tx_fifo
                    .front_mut()
                    .expect("head descriptor unchanged while submitting");
                desc.channel = Some(idx);
                desc.op = Some(op);
                desc.data_offset += chunk;
            }
            Err(_) => {
                unipro_tx_shared::eprintln!("failed to start DMA transfer for {:?}", cportid);
                self.dma.op_free(op);
            }
        }
    }
}
