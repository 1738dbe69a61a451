//! Benchmark profiles for the quarry pool allocator.
//!
//! Provides pre-built, initialized arenas so benches and examples share
//! the same shapes:
//!
//! - [`saturated_arena`]: default policy, whole pool in the largest class
//! - [`spread_arena`]: widest workable class distribution
//! - [`one_of_each_arena`]: one block per class, for split-path benches

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use quarry::{Arena, ArenaConfig, InitPolicy};

/// Pool size shared by all profiles: 64 KiB.
pub const PROFILE_POOL_BYTES: usize = 64 * 1024;

/// Build an initialized arena with the default [`InitPolicy::Saturate`]
/// policy.
pub fn saturated_arena() -> Arena {
    build(InitPolicy::Saturate)
}

/// Build an initialized arena with the [`InitPolicy::Spread`] policy,
/// so every class starts populated.
pub fn spread_arena() -> Arena {
    build(InitPolicy::Spread)
}

/// Build an initialized arena holding exactly one block of each class.
///
/// Most of the pool is left unowned; useful for exercising the
/// borrow-and-split path from a known shape.
pub fn one_of_each_arena() -> Arena {
    build(InitPolicy::Explicit(vec![1, 1, 1, 1, 1, 1]))
}

fn build(policy: InitPolicy) -> Arena {
    let config = ArenaConfig {
        policy,
        ..ArenaConfig::new(PROFILE_POOL_BYTES)
    };
    let mut arena = Arena::new(config).expect("profile config is valid");
    arena.init().expect("fresh arena initializes");
    arena
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_initialize() {
        assert!(saturated_arena().is_initialized());
        assert!(spread_arena().is_initialized());
        assert!(one_of_each_arena().is_initialized());
    }

    #[test]
    fn saturated_profile_owns_the_whole_pool() {
        let arena = saturated_arena();
        assert_eq!(arena.available_bytes(), PROFILE_POOL_BYTES);
    }
}
