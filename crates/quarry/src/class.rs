//! The size-class table and the binning rule.
//!
//! A [`ClassTable`] is the fixed, strictly descending sequence of
//! power-of-two block sizes the arena supports. It is immutable after
//! construction; every other component indexes into it by position
//! (index 0 = largest class).

use crate::error::ArenaError;

/// The default class sizes, largest first.
pub const DEFAULT_CLASS_SIZES: [u32; 6] = [1024, 512, 256, 128, 64, 32];

/// Ordered table of block size classes, largest first.
///
/// Invariant (checked at construction): sizes are non-empty powers of two
/// in strictly descending order. A table that fails validation is an
/// [`ArenaError::InvalidConfig`] — misordering is never a runtime state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassTable {
    sizes: Box<[u32]>,
}

impl ClassTable {
    /// Build a table from the given sizes, largest first.
    pub fn new(sizes: &[u32]) -> Result<Self, ArenaError> {
        if sizes.is_empty() {
            return Err(ArenaError::InvalidConfig {
                reason: "class table must name at least one size".to_string(),
            });
        }
        for &sz in sizes {
            if !sz.is_power_of_two() {
                return Err(ArenaError::InvalidConfig {
                    reason: format!("class size {sz} is not a power of two"),
                });
            }
        }
        for pair in sizes.windows(2) {
            if pair[0] <= pair[1] {
                return Err(ArenaError::InvalidConfig {
                    reason: format!(
                        "class sizes must be strictly descending, got {} before {}",
                        pair[0], pair[1]
                    ),
                });
            }
        }
        Ok(Self {
            sizes: sizes.into(),
        })
    }

    /// Number of classes in the table.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Whether the table is empty. Always false for a constructed table.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Byte size of the class at `index` (0 = largest).
    pub fn bytes(&self, index: usize) -> usize {
        self.sizes[index] as usize
    }

    /// Byte size of the largest class.
    pub fn largest(&self) -> usize {
        self.sizes[0] as usize
    }

    /// Byte size of the smallest class.
    pub fn smallest(&self) -> usize {
        self.sizes[self.sizes.len() - 1] as usize
    }

    /// Iterate class sizes in table order (largest first).
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.sizes.iter().map(|&sz| sz as usize)
    }

    /// Index of the tightest-fitting class for `request` bytes.
    ///
    /// Scans largest → smallest for the first class with
    /// `size >= request && size / 2 < request` — the doubling/binning rule
    /// that bounds internal fragmentation to at most 2x the request.
    /// Returns `None` when no class satisfies the rule: requests of zero,
    /// requests at or below half the smallest class, and requests above
    /// the largest class all have no bin.
    pub fn tightest(&self, request: usize) -> Option<usize> {
        self.sizes.iter().position(|&sz| {
            let sz = sz as usize;
            sz >= request && sz / 2 < request
        })
    }
}

impl Default for ClassTable {
    fn default() -> Self {
        Self {
            sizes: Box::new(DEFAULT_CLASS_SIZES),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_is_descending_powers_of_two() {
        let table = ClassTable::default();
        assert_eq!(table.len(), 6);
        assert_eq!(table.largest(), 1024);
        assert_eq!(table.smallest(), 32);
    }

    #[test]
    fn empty_table_rejected() {
        assert!(matches!(
            ClassTable::new(&[]),
            Err(ArenaError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn non_power_of_two_rejected() {
        assert!(matches!(
            ClassTable::new(&[1024, 768, 256]),
            Err(ArenaError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn ascending_order_rejected() {
        assert!(matches!(
            ClassTable::new(&[32, 64, 128]),
            Err(ArenaError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn duplicate_size_rejected() {
        assert!(matches!(
            ClassTable::new(&[128, 128, 64]),
            Err(ArenaError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn tightest_binds_to_doubling_rule() {
        let table = ClassTable::default();
        // 50 bytes: 64 >= 50 and 32 < 50.
        assert_eq!(table.tightest(50).map(|i| table.bytes(i)), Some(64));
        // 100 bytes binds to 128, not 1024.
        assert_eq!(table.tightest(100).map(|i| table.bytes(i)), Some(128));
        // Exact class size is its own tightest fit.
        assert_eq!(table.tightest(1024).map(|i| table.bytes(i)), Some(1024));
        assert_eq!(table.tightest(32).map(|i| table.bytes(i)), Some(32));
        // One past a class boundary moves up a class.
        assert_eq!(table.tightest(513).map(|i| table.bytes(i)), Some(1024));
    }

    #[test]
    fn tightest_has_no_bin_for_tiny_or_oversized_requests() {
        let table = ClassTable::default();
        assert_eq!(table.tightest(0), None);
        // At or below half the smallest class there is no class with
        // size/2 < request.
        assert_eq!(table.tightest(16), None);
        assert_eq!(table.tightest(17).map(|i| table.bytes(i)), Some(32));
        // Above the largest class.
        assert_eq!(table.tightest(1025), None);
    }
}
