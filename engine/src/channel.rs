//! Channel pool.

use crate::collab::{AtablReqHandle, DmaHandle};
use crate::ids::CportId;

/// One DMA channel, permanently allocated at `tx_init` and never freed
/// during normal operation.
#[derive(Clone, Copy)]
pub struct Channel {
    pub dma_handle: Option<DmaHandle>,
    pub atabl_req: Option<AtablReqHandle>,
    /// The CPort id currently wired to this channel's ATABL request.
    /// `None` replaces the original driver's `0xFFFF` sentinel with an
    /// explicit bound/unbound state.
    pub bound_cportid: Option<CportId>,
    /// Set while a DMA op submitted through this channel has not yet
    /// completed. Since the channel pool can be smaller than the CPort
    /// count, two CPorts may share an index (`ChannelPool::index_for`);
    /// this flag is what makes the picker skip a CPort whose channel is
    /// serving a different CPort's in-flight chunk.
    pub busy: bool,
}

impl Channel {
    pub const fn empty() -> Self {
        Self {
            dma_handle: None,
            atabl_req: None,
            bound_cportid: None,
            busy: false,
        }
    }
}

/// Fixed-size array of DMA channels with an effective size
/// `max_channel <= N`.
pub struct ChannelPool<const N: usize> {
    pub channels: [Channel; N],
    pub max_channel: usize,
}

impl<const N: usize> ChannelPool<N> {
    pub fn new() -> Self {
        Self {
            channels: core::array::from_fn(|_| Channel::empty()),
            max_channel: 0,
        }
    }

    /// Deterministic channel assignment for a CPort: `cportid %
    /// max_channel`, not a free-list allocation, so a given CPort
    /// always lands on the same channel and minimizes ATABL rebinding
    /// churn.
    pub fn index_for(&self, cportid: CportId) -> usize {
        cportid.as_usize() % self.max_channel
    }
}

impl<const N: usize> Default for ChannelPool<N> {
    fn default() -> Self {
        Self::new()
    }
}
