//! Capability interfaces for owning structures.
//!
//! Structures that own arena memory may implement these traits so that
//! external tooling can inspect or remediate their footprint. Both are
//! optional extension points: the allocator core exports the contracts,
//! never calls them, and ships no implementation.

use smallvec::SmallVec;

/// One contiguous region of an owning structure's footprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    /// Byte offset of the region within the owner's arena.
    pub offset: usize,
    /// Length of the region in bytes.
    pub len: usize,
}

/// Bounded list of regions reported by [`MemoryLayout::regions`].
pub type RegionList = SmallVec<[Region; 8]>;

/// Report a structure's current memory footprint for visualization
/// tooling.
pub trait MemoryLayout {
    /// The regions the structure currently occupies, in no particular
    /// order.
    fn regions(&self) -> RegionList;

    /// Total size of the structure's footprint in bytes.
    fn total_bytes(&self) -> usize;
}

/// Report and remediate fragmentation in a structure's footprint.
pub trait Defragment {
    /// Whether the structure's footprint is currently fragmented.
    fn is_fragmented(&self) -> bool;

    /// Attempt to defragment. Returns true if the footprint changed.
    fn defragment(&mut self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    /// Minimal owning structure standing in for a real container.
    struct TwoChunkOwner {
        chunks: [Region; 2],
        compacted: bool,
    }

    impl MemoryLayout for TwoChunkOwner {
        fn regions(&self) -> RegionList {
            smallvec![self.chunks[0], self.chunks[1]]
        }

        fn total_bytes(&self) -> usize {
            self.chunks.iter().map(|r| r.len).sum()
        }
    }

    impl Defragment for TwoChunkOwner {
        fn is_fragmented(&self) -> bool {
            !self.compacted
        }

        fn defragment(&mut self) -> bool {
            let was_fragmented = !self.compacted;
            self.compacted = true;
            was_fragmented
        }
    }

    fn owner() -> TwoChunkOwner {
        TwoChunkOwner {
            chunks: [
                Region { offset: 0, len: 64 },
                Region {
                    offset: 256,
                    len: 32,
                },
            ],
            compacted: false,
        }
    }

    #[test]
    fn layout_dispatches_through_trait_object() {
        let owner = owner();
        let layout: &dyn MemoryLayout = &owner;
        assert_eq!(layout.regions().len(), 2);
        assert_eq!(layout.total_bytes(), 96);
    }

    #[test]
    fn defragment_dispatches_through_trait_object() {
        let mut owner = owner();
        let defrag: &mut dyn Defragment = &mut owner;
        assert!(defrag.is_fragmented());
        assert!(defrag.defragment());
        assert!(!defrag.is_fragmented());
        assert!(!defrag.defragment());
    }
}
