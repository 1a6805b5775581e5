//! Debug UART writer, used by the `println!`/`eprintln!` macros.
//!
//! Talks to a memory-mapped UART rather than x86 COM1 I/O ports, since
//! this crate targets an embedded bridge SoC rather than a PC.

use core::fmt;

#[cfg(not(feature = "host-test"))]
use crate::mmio::{read32, write32};

/// Base address of the debug UART. Platform-defined; like the UniPro
/// register window in the TX DMA engine, the real address is supplied
/// by the board support package this crate is linked into.
#[cfg(not(feature = "host-test"))]
const UART_BASE: usize = 0x4000_0000;

#[cfg(not(feature = "host-test"))]
const UART_THR: usize = UART_BASE; // Transmit holding register.
#[cfg(not(feature = "host-test"))]
const UART_LSR: usize = UART_BASE + 0x14; // Line status register.
#[cfg(not(feature = "host-test"))]
const UART_LSR_THRE: u32 = 1 << 5; // Transmit holding register empty.

pub struct SerialWriter {
    initialized: bool,
}

impl SerialWriter {
    fn ensure_initialized(&mut self) {
        if self.initialized {
            return;
        }
        // Real hardware would configure baud/parity/stop bits here; left
        // to the board support package since it owns the clock tree.
        self.initialized = true;
    }
}

#[cfg(not(feature = "host-test"))]
impl fmt::Write for SerialWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.ensure_initialized();

        for b in s.bytes() {
            // SAFETY: UART_BASE is a platform-supplied MMIO window; writes
            // are preceded by a busy-wait on the "transmit empty" bit.
            unsafe {
                while read32(UART_LSR) & UART_LSR_THRE == 0 {}
                write32(UART_THR, b as u32);
            }
        }

        Ok(())
    }
}

// No real UART exists in a hosted test process; this crate has no
// `host-test`-gated board support package to hand it a valid MMIO
// window, so the writer is a no-op here instead of faulting on an
// address that was never mapped.
#[cfg(feature = "host-test")]
impl fmt::Write for SerialWriter {
    fn write_str(&mut self, _s: &str) -> fmt::Result {
        self.ensure_initialized();
        Ok(())
    }
}

pub static mut SERIAL_WRITER: SerialWriter = SerialWriter { initialized: false };
