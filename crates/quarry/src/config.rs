//! Arena configuration parameters.

use crate::class::ClassTable;
use crate::error::ArenaError;
use crate::partition::InitPolicy;

/// Configuration for a fixed-capacity arena.
///
/// The pool size is fixed for the life of the arena, the class table is
/// immutable after construction, and the init policy is consulted exactly
/// once. Validated by [`crate::Arena::new`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Total pool size in bytes. Fixed; there is no growth path.
    pub pool_bytes: usize,

    /// The size-class table, largest class first.
    pub classes: ClassTable,

    /// How init distributes the pool across the classes.
    pub policy: InitPolicy,
}

impl ArenaConfig {
    /// Create a config with the default class table (1024 down to 32)
    /// and the default [`InitPolicy::Saturate`] policy.
    pub fn new(pool_bytes: usize) -> Self {
        Self {
            pool_bytes,
            classes: ClassTable::default(),
            policy: InitPolicy::default(),
        }
    }

    /// Validate the configuration.
    ///
    /// Checks the pool size and, for [`InitPolicy::Explicit`], that the
    /// counts cover every class and their byte sum fits the pool. The
    /// class table validates itself at construction.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.pool_bytes == 0 {
            return Err(ArenaError::InvalidConfig {
                reason: "pool size must be non-zero".to_string(),
            });
        }
        if self.pool_bytes > u32::MAX as usize {
            return Err(ArenaError::InvalidConfig {
                reason: "pool size exceeds the 4 GiB block-address range".to_string(),
            });
        }
        if let InitPolicy::Explicit(counts) = &self.policy {
            if counts.len() != self.classes.len() {
                return Err(ArenaError::InvalidConfig {
                    reason: format!(
                        "explicit counts name {} classes, table has {}",
                        counts.len(),
                        self.classes.len()
                    ),
                });
            }
            let total: usize = counts
                .iter()
                .zip(self.classes.iter())
                .map(|(count, sz)| count * sz)
                .sum();
            if total > self.pool_bytes {
                return Err(ArenaError::InvalidConfig {
                    reason: format!(
                        "explicit counts claim {total} bytes, pool holds {}",
                        self.pool_bytes
                    ),
                });
            }
        }
        Ok(())
    }
}
