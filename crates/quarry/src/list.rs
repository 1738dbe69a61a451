//! Block records and fixed-capacity free lists.
//!
//! A [`FreeList`] is the per-class record of blocks: a boxed slice sized
//! at construction for the theoretical worst case (the whole pool owned
//! by this one class) plus one slot of headroom for an in-flight split,
//! and a length counter. The storage never grows — these lists are the
//! bookkeeping for dynamic memory, so their own footprint is fixed up
//! front.

use std::fmt;

/// Byte offset of a block within the arena pool.
///
/// Addresses are unique across the entire free-list set at all times;
/// a duplicate is internal corruption, never a valid state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockAddr(pub u32);

impl fmt::Display for BlockAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for BlockAddr {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// One allocatable block: its pool offset and whether it is free.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Block {
    /// Offset of the block within the pool.
    pub(crate) addr: BlockAddr,
    /// Cleared when the block is handed out.
    pub(crate) free: bool,
}

impl Block {
    pub(crate) fn new(addr: BlockAddr, free: bool) -> Self {
        Self { addr, free }
    }
}

/// Fixed-capacity list of [`Block`] records for one size class.
pub(crate) struct FreeList {
    /// Byte size of every block in this list.
    class_bytes: usize,
    /// Backing storage, allocated once. Slots past `len` are inert.
    blocks: Box<[Block]>,
    /// Number of live records.
    len: usize,
}

impl FreeList {
    /// Create an empty list with room for `capacity` records.
    pub(crate) fn new(class_bytes: usize, capacity: usize) -> Self {
        let placeholder = Block::new(BlockAddr(0), false);
        Self {
            class_bytes,
            blocks: vec![placeholder; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    pub(crate) fn class_bytes(&self) -> usize {
        self.class_bytes
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn capacity(&self) -> usize {
        self.blocks.len()
    }

    /// Append a record. Overflow is a programmer error: capacities are
    /// sized so the whole pool fits in any single class.
    pub(crate) fn push(&mut self, block: Block) {
        debug_assert!(
            self.len < self.blocks.len(),
            "free list over capacity ({} records)",
            self.len
        );
        self.blocks[self.len] = block;
        self.len += 1;
    }

    /// Remove the record at `index`, shifting later records down to keep
    /// insertion order (and with it the address-order seeding convention).
    pub(crate) fn remove(&mut self, index: usize) -> Block {
        debug_assert!(index < self.len, "remove past live records");
        let removed = self.blocks[index];
        self.blocks.copy_within(index + 1..self.len, index);
        self.len -= 1;
        removed
    }

    pub(crate) fn get(&self, index: usize) -> &Block {
        debug_assert!(index < self.len, "index past live records");
        &self.blocks[index]
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> &mut Block {
        debug_assert!(index < self.len, "index past live records");
        &mut self.blocks[index]
    }

    /// Index of the first free record, scanning front-to-back.
    pub(crate) fn first_free(&self) -> Option<usize> {
        self.iter().position(|b| b.free)
    }

    /// Index of the last free record, scanning back-to-front. The borrow
    /// path splits from the end so the seeded address ordering survives.
    pub(crate) fn last_free(&self) -> Option<usize> {
        self.iter().rposition(|b| b.free)
    }

    /// Iterate the live records in insertion order.
    pub(crate) fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks[..self.len].iter()
    }

    /// Number of live records currently free.
    pub(crate) fn free_count(&self) -> usize {
        self.iter().filter(|b| b.free).count()
    }
}
