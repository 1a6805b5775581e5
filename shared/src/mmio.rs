//! Volatile memory-mapped I/O helpers.
//!
//! The original driver this crate is modeled on (a Toshiba UniPro
//! bridge ASIC) is accessed through plain MMIO rather than port I/O, so
//! register access goes through volatile loads/stores at a fixed
//! address instead of `inb`/`outb`-style port instructions.

/// Reads a 32-bit register at `addr`.
///
/// # Safety
///
/// `addr` must be a valid, correctly aligned, readable MMIO address.
pub unsafe fn read32(addr: usize) -> u32 {
    core::ptr::read_volatile(addr as *const u32)
}

/// Writes `value` to the 32-bit register at `addr`.
///
/// # Safety
///
/// `addr` must be a valid, correctly aligned, writable MMIO address.
pub unsafe fn write32(addr: usize, value: u32) {
    core::ptr::write_volatile(addr as *mut u32, value)
}

/// Writes `value` to the 8-bit register at `addr`.
///
/// # Safety
///
/// `addr` must be a valid, writable MMIO address.
pub unsafe fn write8(addr: usize, value: u8) {
    core::ptr::write_volatile(addr as *mut u8, value)
}

/// Reads the 8-bit register at `addr`.
///
/// # Safety
///
/// `addr` must be a valid, readable MMIO address.
pub unsafe fn read8(addr: usize) -> u8 {
    core::ptr::read_volatile(addr as *const u8)
}
