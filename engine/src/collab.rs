//! Collaborator contracts consumed by the engine.
//!
//! The DMA controller, the ATABL flow-control arbiter, the UniPro link,
//! and task spawning are all external hardware/OS facilities this crate
//! doesn't own. They're expressed here as traits, behind `Box<dyn
//! ...>`, so the engine compiles and is unit-testable without real
//! hardware.

use crate::error::TxError;
use crate::ids::CportId;
use alloc::boxed::Box;

/// Opaque handle to a DMA channel allocated by the [`DmaController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DmaHandle(pub u64);

/// Opaque handle to a single scatter-gather DMA op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DmaOpHandle(pub u64);

/// Opaque handle to an ATABL REQn request line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtablReqHandle(pub u32);

/// DMA destination peripheral for a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DmaDevice {
    Mem,
    Unipro,
}

/// Per-channel allocation parameters, carried verbatim from the
/// original's `device_dma_params` literal in `unipro_tx_init`.
#[derive(Debug, Clone, Copy)]
pub struct DmaChanParams {
    pub src_device: DmaDevice,
    pub dst_device: DmaDevice,
    pub dst_peripheral_id: u32,
    pub transfer_size_bits: u32,
    pub burst_len: u32,
}

/// A single scatter-gather entry for one DMA op.
#[derive(Debug, Clone, Copy)]
pub struct DmaSgEntry {
    pub src_addr: usize,
    pub dst_addr: usize,
    pub len: usize,
}

/// Which callback events a submitted op should be notified for.
#[derive(Debug, Clone, Copy, Default)]
pub struct DmaEventMask {
    pub start: bool,
    pub complete: bool,
}

/// An event reported back through [`crate::engine::Engine::on_dma_event`].
///
/// `on_dma_event`'s `Result` on a `Start` event is the ATABL bind/activate
/// outcome: an `Err` means the caller must abort this op instead of
/// letting hardware move bytes into an unbound CPort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DmaEvent {
    /// The hardware has begun moving this op's bytes.
    Start,
    /// The hardware has finished moving this op's bytes.
    Complete,
}

/// Lower-level interface to the DMA controller driver.
///
/// `enqueue` is expected to return once the op has been accepted by the
/// hardware queue; START/COMPLETE notifications arrive later through
/// [`crate::engine::Engine::on_dma_event`], keyed by the owning CPort —
/// a descriptor with a bound channel is always at the front of its
/// CPort's queue, so the CPort id alone is sufficient to recover the
/// in-flight descriptor and no raw descriptor pointer crosses this
/// boundary.
pub trait DmaController: Send + Sync {
    fn open(&self) -> Result<(), TxError>;
    fn close(&self);

    fn chan_free_count(&self) -> usize;
    fn chan_alloc(&self, params: DmaChanParams) -> Result<DmaHandle, TxError>;
    fn chan_free(&self, chan: DmaHandle);

    fn op_alloc(&self) -> Result<DmaOpHandle, TxError>;
    fn op_free(&self, op: DmaOpHandle);

    fn enqueue(
        &self,
        chan: DmaHandle,
        op: DmaOpHandle,
        sg: DmaSgEntry,
        events: DmaEventMask,
        cportid: CportId,
    ) -> Result<(), TxError>;
}

/// Lower-level interface to the ATABL flow-control arbiter (non-ES2 only).
pub trait AtablController: Send + Sync {
    fn open(&self) -> Result<(), TxError>;
    fn close(&self);

    fn req_free_count(&self) -> usize;
    fn req_alloc(&self) -> Result<AtablReqHandle, TxError>;
    fn req_free(&self, req: AtablReqHandle);
    fn req_to_peripheral_id(&self, req: AtablReqHandle) -> u32;

    fn connect_cport_to_req(&self, cportid: CportId, req: AtablReqHandle) -> Result<(), TxError>;
    fn disconnect_cport_from_req(&self, req: AtablReqHandle);
    fn activate_req(&self, req: AtablReqHandle) -> Result<(), TxError>;
    fn deactivate_req(&self, req: AtablReqHandle);
    fn req_is_activated(&self, req: AtablReqHandle) -> bool;
    fn transfer_completed(&self, req: AtablReqHandle);
}

/// Lower-level interface to the UniPro link controller.
pub trait UniproLink: Send + Sync {
    /// Number of CPorts on this link (dense ids `0..cport_count()`).
    fn cport_count(&self) -> usize;
    /// Base address of the CPort's hardware TX buffer.
    fn cport_tx_buf(&self, cportid: CportId) -> usize;
    /// Bytes currently free in the CPort's hardware TX FIFO.
    fn get_tx_free_buffer_space(&self, cportid: CportId) -> usize;
    /// Synchronous hardware CPort reset primitive.
    fn reset_cport(&self, cportid: CportId);
    /// Writes 1 to `CPORT_EOM_BIT(cport)`.
    fn strobe_eom(&self, cportid: CportId);
    /// Reads `REG_TX_BUFFER_SPACE_OFFSET_REG(i)`.
    fn read_handshake_reg(&self, cportid: CportId) -> u32;
    /// Writes back `REG_TX_BUFFER_SPACE_OFFSET_REG(i)`.
    fn write_handshake_reg(&self, cportid: CportId, value: u32);
}

/// Spawns the long-lived worker task (the original's `pthread_create`).
pub trait WorkerSpawn: Send + Sync {
    fn spawn(&self, run: Box<dyn FnOnce() + Send + 'static>) -> Result<(), TxError>;
}
