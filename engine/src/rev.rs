//! Chip-revision dispatch for TX flow control.
//!
//! ES2 silicon has no ATABL arbiter: transfers must be chunked in
//! software, bounded by the CPort's free TX buffer space. ES3 and later
//! silicon offloads flow control to ATABL, moving one whole descriptor
//! per DMA operation. The ATABL collaborator lives inside the
//! `Es3Plus` variant rather than beside it, so "which revision" and
//! "is ATABL available" can never disagree.

use crate::collab::AtablController;
use alloc::boxed::Box;

/// Chip silicon revision and its associated flow-control collaborator.
pub enum Rev {
    Es2,
    Es3Plus(Box<dyn AtablController>),
}

impl Rev {
    /// The ATABL controller for this revision, if it has one.
    #[inline]
    pub fn atabl(&self) -> Option<&dyn AtablController> {
        match self {
            Rev::Es2 => None,
            Rev::Es3Plus(atabl) => Some(atabl.as_ref()),
        }
    }
}
