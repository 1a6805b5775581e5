//! Error taxonomy for the TX DMA engine.
//!
//! A plain enum implementing `Display`/`core::error::Error`, converted
//! to the legacy negative-errno ABI the original NuttX driver used at
//! its public API boundary.

use core::error::Error;
use core::fmt::{self, Debug, Display, Formatter};

pub const EINVAL: i32 = 22;
pub const ENOMEM: i32 = 12;
pub const EPIPE: i32 = 32;
pub const ENODEV: i32 = 19;
pub const ENOSPC: i32 = 28;
pub const ECONNRESET: i32 = 104;

/// Errors surfaced by the engine's internal operations.
///
/// `Hardware` wraps a raw negative-errno code returned by a collaborator
/// (DMA/ATABL) whose failure mode isn't otherwise named by the variants
/// below — it is logged at the call site rather than mapped to one of
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxError {
    /// `cportid` does not name a known CPort.
    InvalidCport,
    /// The CPort is draining for reset; no new transfers are accepted.
    ResetPending,
    /// Descriptor or pool allocation failed.
    NoMemory,
    /// No hardware TX buffer space was available for this chunk.
    NoSpace,
    /// A device failed to open, or too few channels/requests could be
    /// allocated to bring up at least one TX DMA channel.
    NoDevice,
    /// A collaborator (DMA or ATABL) returned a raw failure code.
    Hardware(i32),
}

impl Display for TxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

impl Error for TxError {
    fn description(&self) -> &str {
        match self {
            TxError::InvalidCport => "unknown cport id",
            TxError::ResetPending => "cport is draining for reset",
            TxError::NoMemory => "descriptor allocation failed",
            TxError::NoSpace => "no free TX buffer space",
            TxError::NoDevice => "device open or channel allocation failed",
            TxError::Hardware(_) => "collaborator returned a hardware error",
        }
    }
}

impl From<TxError> for i32 {
    fn from(e: TxError) -> i32 {
        match e {
            TxError::InvalidCport => -EINVAL,
            TxError::ResetPending => -EPIPE,
            TxError::NoMemory => -ENOMEM,
            TxError::NoSpace => -ENOSPC,
            TxError::NoDevice => -ENODEV,
            TxError::Hardware(code) => {
                if code > 0 {
                    -code
                } else {
                    code
                }
            }
        }
    }
}
