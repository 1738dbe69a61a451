//! The arena: pool, free-list set, and the alloc/free/realloc engines.
//!
//! [`Arena`] is an explicit value owned by the caller — there is no
//! process-wide singleton, so multiple independent arenas coexist and
//! tests get a fresh one each. All mutation goes through `&mut self`;
//! callers invoking from concurrent contexts must provide their own
//! mutual exclusion.
//!
//! After [`Arena::new`] the allocator performs no allocation of its own:
//! the pool and every free list are sized up front for the worst case
//! where the whole pool collapses into the smallest class.

use smallvec::SmallVec;

use crate::class::ClassTable;
use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::list::{Block, BlockAddr, FreeList};
use crate::partition::{partition, InitPolicy};

/// Per-class occupancy row in [`ArenaStats`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassStats {
    /// Byte size of the class.
    pub class_bytes: usize,
    /// Number of free blocks in the class.
    pub free: usize,
    /// Number of in-use blocks in the class.
    pub used: usize,
}

/// Point-in-time occupancy snapshot, one row per class in table order.
#[derive(Clone, Debug)]
pub struct ArenaStats {
    /// Total pool size in bytes.
    pub pool_bytes: usize,
    /// Bytes currently available across all free lists.
    pub available_bytes: usize,
    /// Per-class rows, largest class first.
    pub classes: SmallVec<[ClassStats; 8]>,
}

/// A fixed-capacity pool allocator over one contiguous byte buffer.
///
/// Created uninitialized by [`Arena::new`]; [`Arena::init`] seeds the
/// free lists exactly once. Thereafter [`Arena::alloc`],
/// [`Arena::free`], and [`Arena::realloc`] are the only writers of
/// block state and the available-byte counter.
pub struct Arena {
    /// The contiguous bytes all allocations are carved from.
    pool: Box<[u8]>,
    /// One free list per class, in table order (largest first).
    lists: Box<[FreeList]>,
    /// The size-class table.
    classes: ClassTable,
    /// Initial-count policy, consulted once by `init`.
    policy: InitPolicy,
    /// Transitions false → true exactly once.
    initialized: bool,
    /// Invariant: equals the byte sum of all free blocks after every
    /// operation.
    available: usize,
}

impl Arena {
    /// Create an uninitialized arena from a validated configuration.
    ///
    /// Allocates the pool and the worst-case free-list storage
    /// (`pool / class + 1` records per class — the extra slot covers an
    /// in-flight split). This is the last allocation the arena ever
    /// performs.
    pub fn new(config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        let ArenaConfig {
            pool_bytes,
            classes,
            policy,
        } = config;

        let pool = vec![0u8; pool_bytes].into_boxed_slice();
        let lists: Box<[FreeList]> = classes
            .iter()
            .map(|class_bytes| FreeList::new(class_bytes, pool_bytes / class_bytes + 1))
            .collect();

        Ok(Self {
            pool,
            lists,
            classes,
            policy,
            initialized: false,
            available: 0,
        })
    }

    /// Seed the free lists and mark the arena initialized.
    ///
    /// Walks the class table largest → smallest, assigning each class's
    /// configured count of contiguous pool offsets as free blocks, so the
    /// concatenation of (descending class → blocks) walks the pool in
    /// address order. Errors with [`ArenaError::AlreadyInitialized`] on a
    /// second call.
    pub fn init(&mut self) -> Result<(), ArenaError> {
        if self.initialized {
            return Err(ArenaError::AlreadyInitialized);
        }

        let counts = partition(&self.policy, &self.classes, self.pool.len());
        let mut offset = 0usize;
        let mut seeded = 0usize;
        for (ci, &count) in counts.iter().enumerate() {
            let class_bytes = self.classes.bytes(ci);
            for _ in 0..count {
                debug_assert!(offset < self.pool.len(), "seed cursor past pool end");
                self.lists[ci].push(Block::new(BlockAddr(offset as u32), true));
                offset += class_bytes;
                seeded += class_bytes;
                debug_assert!(offset <= self.pool.len(), "seed cursor past pool end");
            }
        }

        self.available = seeded;
        self.initialized = true;
        Ok(())
    }

    /// Whether `init` has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Allocate a block of at least `bytes` bytes.
    ///
    /// The request binds to the unique tightest class
    /// (`size >= bytes && size / 2 < bytes`). The binned class's list is
    /// scanned front-to-back for the first free block; exactly one block
    /// is consumed per call. If the list has none, the next-larger class
    /// — and only that class — is scanned back-to-front for a block to
    /// split in two. On any failure `available_bytes` is unchanged.
    pub fn alloc(&mut self, bytes: usize) -> Result<BlockAddr, ArenaError> {
        debug_assert!(self.initialized, "alloc on uninitialized arena");

        let largest = self.classes.largest();
        if bytes > largest {
            return Err(ArenaError::RequestTooLarge {
                requested: bytes,
                largest,
            });
        }
        if bytes > self.available {
            return Err(ArenaError::CapacityExceeded {
                requested: bytes,
                available: self.available,
            });
        }
        let ci = self
            .classes
            .tightest(bytes)
            .ok_or(ArenaError::NoFit { requested: bytes })?;
        let class_bytes = self.classes.bytes(ci);

        // Direct hit: first free block, front-to-back. Allocating from
        // the front keeps the seeded address ordering intact for longer.
        if let Some(bi) = self.lists[ci].first_free() {
            let record = self.lists[ci].get_mut(bi);
            record.free = false;
            let addr = record.addr;
            self.available -= class_bytes;
            return Ok(addr);
        }

        // Borrow one level up only; deeper walks are out of contract.
        // Splitting the donor list's rearmost free block keeps the
        // descending-class concatenation in address order.
        if ci > 0 {
            if let Some(bi) = self.lists[ci - 1].last_free() {
                let donor = self.lists[ci - 1].remove(bi);
                let low = donor.addr;
                let high = BlockAddr(low.0 + class_bytes as u32);
                self.lists[ci].push(Block::new(low, false));
                self.lists[ci].push(Block::new(high, true));
                self.available -= class_bytes;
                return Ok(low);
            }
        }

        Err(ArenaError::Exhausted {
            requested: bytes,
            class_bytes,
        })
    }

    /// Return the block at `addr` to its free list.
    ///
    /// Unknown and already-free addresses are tolerated as no-ops. Freed
    /// siblings are never coalesced back into a larger block; a split is
    /// permanent.
    pub fn free(&mut self, addr: BlockAddr) {
        debug_assert!(self.initialized, "free on uninitialized arena");

        let Some((ci, bi)) = self.find(addr) else {
            return;
        };
        let class_bytes = self.lists[ci].class_bytes();
        let record = self.lists[ci].get_mut(bi);
        if record.free {
            return;
        }
        record.free = true;
        self.available += class_bytes;
    }

    /// Resize the allocation at `addr` to `bytes` bytes.
    ///
    /// - `Ok(None)`: `bytes` was zero; the block was freed.
    /// - `Ok(Some(addr))` with the original address: either the block's
    ///   class was already the tightest fit (no move needed), or the
    ///   replacement allocation failed — callers distinguish failure by
    ///   comparing the returned address against the one passed in.
    /// - `Ok(Some(new))`: the content moved; the first
    ///   `min(old_class_bytes, bytes)` bytes were copied and the old
    ///   block freed.
    pub fn realloc(
        &mut self,
        addr: BlockAddr,
        bytes: usize,
    ) -> Result<Option<BlockAddr>, ArenaError> {
        debug_assert!(self.initialized, "realloc on uninitialized arena");

        let (ci, bi) = self
            .find(addr)
            .ok_or(ArenaError::UnknownAddress { addr })?;
        if self.lists[ci].get(bi).free {
            return Err(ArenaError::NotAllocated { addr });
        }
        if bytes == 0 {
            self.free(addr);
            return Ok(None);
        }
        let class_bytes = self.classes.bytes(ci);
        if class_bytes / 2 < bytes && bytes <= class_bytes {
            // Already the tightest-fitting class; nothing to move.
            return Ok(Some(addr));
        }

        match self.alloc(bytes) {
            Ok(new_addr) => {
                let n = bytes.min(class_bytes);
                let src = addr.0 as usize;
                self.pool.copy_within(src..src + n, new_addr.0 as usize);
                self.free(addr);
                Ok(Some(new_addr))
            }
            // Failure by non-movement: the old block stays allocated.
            Err(_) => Ok(Some(addr)),
        }
    }

    /// Whether a block lives at `addr` and is currently allocated.
    ///
    /// False for unknown addresses and for known-but-free blocks.
    pub fn is_allocated(&self, addr: BlockAddr) -> bool {
        match self.find(addr) {
            Some((ci, bi)) => !self.lists[ci].get(bi).free,
            None => false,
        }
    }

    /// Shared view of the allocated block at `addr`, class-size long.
    ///
    /// `None` for unknown addresses and free blocks.
    pub fn block(&self, addr: BlockAddr) -> Option<&[u8]> {
        let (ci, bi) = self.find(addr)?;
        if self.lists[ci].get(bi).free {
            return None;
        }
        let start = addr.0 as usize;
        Some(&self.pool[start..start + self.lists[ci].class_bytes()])
    }

    /// Mutable view of the allocated block at `addr`, class-size long.
    ///
    /// `None` for unknown addresses and free blocks.
    pub fn block_mut(&mut self, addr: BlockAddr) -> Option<&mut [u8]> {
        let (ci, bi) = self.find(addr)?;
        if self.lists[ci].get(bi).free {
            return None;
        }
        let start = addr.0 as usize;
        let end = start + self.lists[ci].class_bytes();
        Some(&mut self.pool[start..end])
    }

    /// Bytes currently available across all free lists.
    pub fn available_bytes(&self) -> usize {
        self.available
    }

    /// Total pool size in bytes.
    pub fn pool_bytes(&self) -> usize {
        self.pool.len()
    }

    /// The size-class table.
    pub fn class_table(&self) -> &ClassTable {
        &self.classes
    }

    /// Per-class occupancy snapshot.
    pub fn stats(&self) -> ArenaStats {
        let classes = self
            .lists
            .iter()
            .map(|list| {
                let free = list.free_count();
                ClassStats {
                    class_bytes: list.class_bytes(),
                    free,
                    used: list.len() - free,
                }
            })
            .collect();
        ArenaStats {
            pool_bytes: self.pool.len(),
            available_bytes: self.available,
            classes,
        }
    }

    /// Resolve an address to (class index, block index) by exact match.
    ///
    /// Linear scan across every class's list. Debug builds keep scanning
    /// after a hit to assert that no second record names the same
    /// address — a duplicate is corruption, never a valid state. Release
    /// builds short-circuit on the first match.
    fn find(&self, addr: BlockAddr) -> Option<(usize, usize)> {
        debug_assert!(self.initialized, "lookup on uninitialized arena");

        let mut hit = None;
        for (ci, list) in self.lists.iter().enumerate() {
            for (bi, block) in list.iter().enumerate() {
                if block.addr == addr {
                    if cfg!(debug_assertions) {
                        debug_assert!(
                            hit.is_none(),
                            "duplicate block address {addr} across free lists"
                        );
                        hit = Some((ci, bi));
                    } else {
                        return Some((ci, bi));
                    }
                }
            }
        }
        hit
    }
}
