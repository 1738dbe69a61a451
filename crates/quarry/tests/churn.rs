//! Integration test: allocation churn over many rounds.
//!
//! Drives the arena through repeated fill/drain cycles with a seeded
//! random request mix and verifies that the accounting counter always
//! returns to its initial value, that fragmentation (the total record
//! count) only ever grows, and that the hard limits hold under churn.

use quarry::{Arena, ArenaConfig, ArenaError, BlockAddr, InitPolicy};
use rand::{RngExt, SeedableRng};
use rand_chacha::ChaCha8Rng;

const POOL_BYTES: usize = 8192;
const ROUNDS: usize = 50;

fn spread_arena() -> Arena {
    let config = ArenaConfig {
        policy: InitPolicy::Spread,
        ..ArenaConfig::new(POOL_BYTES)
    };
    let mut arena = Arena::new(config).unwrap();
    arena.init().unwrap();
    arena
}

fn total_records(arena: &Arena) -> usize {
    arena
        .stats()
        .classes
        .iter()
        .map(|row| row.free + row.used)
        .sum()
}

#[test]
fn fill_drain_cycles_restore_the_accounting() {
    let mut arena = spread_arena();
    let initial = arena.available_bytes();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut records = total_records(&arena);

    for round in 0..ROUNDS {
        // Fill: allocate random sizes until the arena refuses.
        let mut live: Vec<BlockAddr> = Vec::new();
        loop {
            let bytes = rng.random_range(17..=1024);
            match arena.alloc(bytes) {
                Ok(addr) => {
                    assert!(arena.is_allocated(addr));
                    live.push(addr);
                }
                Err(_) => break,
            }
        }
        assert!(!live.is_empty(), "round {round} allocated nothing");

        // Oversized requests fail no matter how much is free.
        assert!(matches!(
            arena.alloc(1025),
            Err(ArenaError::RequestTooLarge { .. })
        ));

        // Fragmentation is monotone: splits add records, nothing merges.
        let now = total_records(&arena);
        assert!(now >= records, "round {round} lost block records");
        records = now;

        // Drain: every byte comes back.
        for addr in live {
            arena.free(addr);
            assert!(!arena.is_allocated(addr));
        }
        assert_eq!(
            arena.available_bytes(),
            initial,
            "round {round} leaked bytes"
        );
    }
}

#[test]
fn realloc_churn_preserves_the_content_prefix() {
    let mut arena = spread_arena();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for _ in 0..200 {
        let bytes = rng.random_range(17..=512);
        let Ok(mut addr) = arena.alloc(bytes) else {
            continue;
        };
        let fill = rng.random_range(0..=u8::MAX as u32) as u8;
        let old_len = {
            let data = arena.block_mut(addr).unwrap();
            data.fill(fill);
            data.len()
        };

        let new_bytes = rng.random_range(17..=1024);
        match arena.realloc(addr, new_bytes) {
            Ok(Some(new_addr)) => {
                let carried = new_bytes.min(old_len);
                let data = arena.block(new_addr).unwrap();
                assert!(
                    data[..carried].iter().all(|&b| b == fill),
                    "realloc dropped content"
                );
                addr = new_addr;
            }
            Ok(None) => unreachable!("new_bytes is never zero"),
            Err(e) => panic!("realloc of a live block failed: {e}"),
        }
        arena.free(addr);
    }
}

#[test]
fn exhaustion_is_not_permanent() {
    let mut arena = spread_arena();
    let initial = arena.available_bytes();

    // Exhaust the smallest class with 32-byte-binned requests. Once the
    // 32 and 64 lists are drained the next request fails even though
    // larger classes still hold free bytes — borrowing is one level only.
    let mut live = Vec::new();
    while let Ok(addr) = arena.alloc(17) {
        live.push(addr);
    }
    assert!(matches!(
        arena.alloc(17),
        Err(ArenaError::Exhausted { .. })
    ));
    assert!(arena.available_bytes() > 0);

    // Release one block and the same-size request succeeds again.
    let released = live.pop().unwrap();
    arena.free(released);
    assert_eq!(arena.alloc(17).unwrap(), released);

    for addr in live {
        arena.free(addr);
    }
    arena.free(released);
    assert_eq!(arena.available_bytes(), initial);
}
