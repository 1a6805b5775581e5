//! Register layouts shared between the engine and its UniPro link
//! collaborator, expressed as typed bitfields with `bitbybit` rather
//! than hand-rolled shift/mask constants.

use bitbybit::bitfield;

/// Layout of `REG_TX_BUFFER_SPACE_OFFSET_REG(i)`: a free-running free
/// space counter in the low byte, with a hardware-handshake threshold
/// programmed into bits 8-15.
#[bitfield(u32, default = 0)]
pub struct TxBufferSpaceReg {
    #[bits(0..=7, rw)]
    pub free_space: u8,
    #[bits(8..=15, rw)]
    pub handshake_threshold: u8,
}

/// `0x10` under the write-memory-barrier build variant (`wmb` feature),
/// `0x20` otherwise.
pub const fn handshake_threshold(wmb: bool) -> u8 {
    if wmb {
        0x10
    } else {
        0x20
    }
}
