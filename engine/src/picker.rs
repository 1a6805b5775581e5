//! Round-robin CPort selection.
//!
//! Ported from the original `pick_tx_descriptor`: starting at `start`,
//! scan every CPort exactly once and return the first one with a
//! sendable head descriptor and an available channel. The original
//! only checked `pending_reset` when the queue was already empty; here
//! a pending reset is flushed unconditionally before the emptiness
//! check, so a reset on a CPort that still has unsent descriptors
//! actually drains them instead of stalling forever behind
//! `tx_fifo.is_empty()`.

use crate::engine::Engine;
use crate::ids::CportId;

impl<const N: usize> Engine<N> {
    /// Returns the next CPort the worker should service, or `None` once
    /// every CPort has been examined without finding one.
    pub(crate) fn pick(&self, start: u32) -> Option<CportId> {
        let count = self.cport_count();
        if count == 0 {
            return None;
        }

        for offset in 0..count {
            let raw = (start as usize).wrapping_add(offset) % count;
            let cportid = CportId(raw as u32);

            {
                let mut cports = self.cports.lock();
                if cports[raw].pending_reset {
                    drop(cports);
                    self.flush_cport(cportid);
                    cports = self.cports.lock();
                }

                match cports[raw].tx_fifo.front() {
                    None => continue,
                    Some(desc) if desc.channel.is_some() => continue,
                    Some(_) => {}
                }
            }

            let idx = self.channel_index_for(cportid);
            if self.channels.lock().channels[idx].busy {
                continue;
            }

            if self.link.get_tx_free_buffer_space(cportid) == 0 {
                continue;
            }

            return Some(cportid);
        }

        None
    }
}
