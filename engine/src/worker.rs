//! Long-lived worker task, ported from `unipro_tx_worker`.

use crate::engine::Engine;
use alloc::sync::Arc;

impl<const N: usize> Engine<N> {
    /// Blocks on new work, then drains every sendable CPort in
    /// round-robin order before blocking again. Runs for the lifetime
    /// of the engine; spawned once by [`Engine::tx_init`].
    pub(crate) fn worker_loop(self: Arc<Self>) {
        let mut start: u32 = 0;
        loop {
            self.tx_fifo_lock.down();
            while let Some(cportid) = self.pick(start) {
                self.dma_xfer(cportid);
                start = cportid.0.wrapping_add(1);
            }
        }
    }
}
