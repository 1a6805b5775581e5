//! Dense identifiers used across the engine.

use core::fmt;

/// A dense, non-negative CPort identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CportId(pub u32);

impl CportId {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for CportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cport{}", self.0)
    }
}

impl fmt::Display for CportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Index into the fixed-size channel pool.
pub type ChannelIndex = usize;
