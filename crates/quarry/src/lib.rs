//! Fixed-capacity pool allocation over a static byte arena.
//!
//! Quarry carves one contiguous, fixed-size byte pool into power-of-two
//! size classes at init time. Each class is tracked by its own
//! fixed-capacity free list; alloc/free/realloc only ever move block
//! records between "free" and "in-use" states, splitting a larger block
//! into two smaller ones on demand. The allocator never requests memory
//! beyond its own pool — the free lists are sized up front for the worst
//! case where the entire pool collapses into the smallest class.
//!
//! # Architecture
//!
//! ```text
//! Arena (caller-owned value, no globals)
//! ├── pool: Box<[u8]>           (one fixed buffer for the process lifetime)
//! ├── FreeList × classes        (fixed-capacity Block records, descending sizes)
//! ├── initialized: bool         (transitions false → true exactly once)
//! └── available: usize          (Σ free-block bytes, maintained by every op)
//! ```
//!
//! # Limits, by design
//!
//! - Requests above the largest class fail; there is no multi-block
//!   allocation.
//! - A class out of blocks borrows from the next-larger class only —
//!   never further up the table.
//! - Freed siblings are never coalesced back into a larger block.
//! - Single-threaded: all mutation goes through `&mut Arena`, and callers
//!   invoking from multiple contexts must provide their own exclusion.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod arena;
pub mod capability;
pub mod class;
pub mod config;
pub mod error;
mod list;
pub mod partition;

// Public re-exports for the primary API surface.
pub use arena::{Arena, ArenaStats, ClassStats};
pub use capability::{Defragment, MemoryLayout, Region, RegionList};
pub use class::ClassTable;
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use list::BlockAddr;
pub use partition::InitPolicy;
