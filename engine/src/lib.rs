//! UniPro TX DMA egress engine.
//!
//! Moves outbound UniPro payloads from caller-supplied buffers into
//! per-CPort hardware TX FIFOs over DMA, optionally arbitrated by ATABL
//! flow control on chips that have it. A single producer side
//! (`Engine::send_async`/`Engine::send`) enqueues descriptors; a single
//! long-lived worker task drains them in round-robin order.
#![feature(allocator_api)]
#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod api;
mod channel;
mod collab;
mod completion;
mod cport;
mod descriptor;
mod engine;
mod error;
mod ids;
mod picker;
mod reset;
mod rev;
mod sync;
mod worker;
mod xfer;

pub use collab::{
    AtablController, AtablReqHandle, DmaChanParams, DmaController, DmaDevice, DmaEvent,
    DmaEventMask, DmaHandle, DmaOpHandle, DmaSgEntry, UniproLink, WorkerSpawn,
};
pub use cport::ResetCompletionCb;
pub use descriptor::SendCallback;
pub use engine::{Engine, TxInitConfig};
pub use error::{TxError, ECONNRESET, EINVAL, ENODEV, ENOMEM, ENOSPC, EPIPE};
pub use ids::CportId;
pub use rev::Rev;
pub use sync::irq::{InterruptController, NullInterruptController};
