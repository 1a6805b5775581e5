#![allow(unused_macros)]

// SAFETY note: these macros assume a single core with interrupts masked
// around each write, so the writer is never torn by a concurrent
// access. Callers inside an interrupt-masked critical section (see
// `sync::irq`) satisfy this automatically; the worker and producer call
// sites mask interrupts for the duration of the print for the same
// reason.

#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        // SAFETY: single core, interrupts held by the caller.
        unsafe {
            write!($crate::serial::SERIAL_WRITER, "{}", format_args!($($arg)*)).unwrap();
        }
    }};
}

#[macro_export]
macro_rules! println {
    () => {{
        use core::fmt::Write;
        // SAFETY: single core, interrupts held by the caller.
        unsafe {
            write!($crate::serial::SERIAL_WRITER, "\n").unwrap();
        }
    }};
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        // SAFETY: single core, interrupts held by the caller.
        unsafe {
            write!($crate::serial::SERIAL_WRITER, "{}", format_args!($($arg)*)).unwrap();
            write!($crate::serial::SERIAL_WRITER, "\n").unwrap();
        }
    }};
}

#[macro_export]
macro_rules! eprint {
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        // SAFETY: single core, interrupts held by the caller.
        unsafe {
            write!($crate::serial::SERIAL_WRITER, "[unipro-tx] {}", format_args!($($arg)*)).unwrap();
        }
    }};
}

#[macro_export]
macro_rules! eprintln {
    () => {{ $crate::println!() }};
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        // SAFETY: single core, interrupts held by the caller.
        unsafe {
            write!($crate::serial::SERIAL_WRITER, "[unipro-tx] {}", format_args!($($arg)*)).unwrap();
            write!($crate::serial::SERIAL_WRITER, "\n").unwrap();
        }
    }};
}
