//! Arena-specific error types.

use std::error::Error;
use std::fmt;

use crate::list::BlockAddr;

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// Configuration rejected at construction time.
    InvalidConfig {
        /// Human-readable description of the problem.
        reason: String,
    },
    /// `init()` called on an arena that is already initialized.
    AlreadyInitialized,
    /// Requested more bytes than the largest size class. Multi-block
    /// allocations are unsupported by design.
    RequestTooLarge {
        /// Number of bytes requested.
        requested: usize,
        /// Byte size of the largest class.
        largest: usize,
    },
    /// No size class bins the request under the doubling rule
    /// (`size >= request && size / 2 < request`).
    NoFit {
        /// Number of bytes requested.
        requested: usize,
    },
    /// The request exceeds the bytes currently available across all
    /// free lists.
    CapacityExceeded {
        /// Number of bytes requested.
        requested: usize,
        /// Bytes currently available.
        available: usize,
    },
    /// The binned class has no free block and the one-level borrow from
    /// the next-larger class found nothing to split.
    Exhausted {
        /// Number of bytes requested.
        requested: usize,
        /// Byte size of the class the request binned to.
        class_bytes: usize,
    },
    /// No block lives at the given address.
    UnknownAddress {
        /// The unrecognised address.
        addr: BlockAddr,
    },
    /// The block at the given address is free; reallocating a free block
    /// is invalid.
    NotAllocated {
        /// The address of the free block.
        addr: BlockAddr,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { reason } => {
                write!(f, "invalid arena configuration: {reason}")
            }
            Self::AlreadyInitialized => {
                write!(f, "arena is already initialized")
            }
            Self::RequestTooLarge { requested, largest } => {
                write!(
                    f,
                    "request of {requested} bytes exceeds the largest class ({largest} bytes)"
                )
            }
            Self::NoFit { requested } => {
                write!(f, "no size class bins a request of {requested} bytes")
            }
            Self::CapacityExceeded {
                requested,
                available,
            } => {
                write!(
                    f,
                    "arena capacity exceeded: requested {requested} bytes, {available} bytes available"
                )
            }
            Self::Exhausted {
                requested,
                class_bytes,
            } => {
                write!(
                    f,
                    "no free or splittable block for {requested} bytes (class {class_bytes})"
                )
            }
            Self::UnknownAddress { addr } => {
                write!(f, "no block lives at address {addr}")
            }
            Self::NotAllocated { addr } => {
                write!(f, "block at address {addr} is not allocated")
            }
        }
    }
}

impl Error for ArenaError {}
