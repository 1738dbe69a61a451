//! Initial free-list count policies.
//!
//! At init time the pool is carved into per-class block counts. Ideally
//! the initial distribution matches the runtime request distribution —
//! that minimizes splitting. Since the request mix is unknowable up
//! front, callers pick a policy or supply their own counts.

use crate::class::ClassTable;

/// How the initializer distributes the pool across the size classes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InitPolicy {
    /// The largest class absorbs the pool first; the remainder cascades
    /// down through each smaller class in turn (divmod walk). The
    /// default.
    Saturate,
    /// Spread the pool across the widest workable set of classes,
    /// distributing stride-sized shares from the middle of the set
    /// outward and handing any remaining gap to the smaller classes.
    Spread,
    /// Caller-supplied per-class counts, in table order (largest first).
    /// Validated at construction: the byte sum must fit the pool.
    Explicit(Vec<usize>),
}

impl Default for InitPolicy {
    fn default() -> Self {
        Self::Saturate
    }
}

/// Compute per-class initial block counts for the given pool size.
///
/// Counts are in table order (largest class first). Every policy
/// guarantees `Σ count × class_size <= pool_bytes`; any trailing gap
/// below the smallest class size is left unowned. Runs at construction
/// time only.
pub fn partition(policy: &InitPolicy, table: &ClassTable, pool_bytes: usize) -> Vec<usize> {
    match policy {
        InitPolicy::Saturate => saturate(table, pool_bytes),
        InitPolicy::Spread => spread(table, pool_bytes),
        InitPolicy::Explicit(counts) => counts.clone(),
    }
}

fn saturate(table: &ClassTable, pool_bytes: usize) -> Vec<usize> {
    let mut remaining = pool_bytes;
    table
        .iter()
        .map(|class_bytes| {
            let count = remaining / class_bytes;
            remaining %= class_bytes;
            count
        })
        .collect()
}

fn spread(table: &ClassTable, pool_bytes: usize) -> Vec<usize> {
    let mut counts = vec![0usize; table.len()];
    let smallest = table.smallest();
    if pool_bytes < smallest {
        return counts;
    }

    // Pick the widest workable set: for each candidate number of ways to
    // split the pool, the stride is the largest class fitting one share,
    // and the set is every class no larger than the stride for which a
    // whole stride still fits in the pool. The widest set wins.
    let mut members: Vec<usize> = Vec::new();
    let mut stride = 0usize;
    for ways in (1..=table.len()).rev() {
        let share = pool_bytes / ways;
        let Some(stride_idx) = table.iter().position(|sz| sz <= share) else {
            continue;
        };
        let candidate_stride = table.bytes(stride_idx);
        let max_members = pool_bytes / candidate_stride;
        let candidate: Vec<usize> = (stride_idx..table.len()).take(max_members).collect();
        if candidate.len() > members.len() {
            members = candidate;
            stride = candidate_stride;
        }
    }

    // Distribute stride-sized shares starting from the middle of the set
    // and alternating outward, biased one step toward the smaller sizes.
    let mid = if members.len() >= 2 {
        members.len() / 2 - 1
    } else {
        0
    };
    let mut order = vec![mid];
    for d in 1..members.len() {
        let mut placed = false;
        if mid >= d {
            order.push(mid - d);
            placed = true;
        }
        if mid + d < members.len() {
            order.push(mid + d);
            placed = true;
        }
        if !placed {
            break;
        }
    }

    let mut remaining = pool_bytes;
    while remaining >= stride {
        for &m in &order {
            if remaining < stride {
                break;
            }
            let ci = members[m];
            counts[ci] += stride / table.bytes(ci);
            remaining -= stride;
        }
    }

    // Hand the remaining gap to the smaller classes, smallest first.
    while remaining >= smallest {
        for ci in (0..table.len()).rev() {
            let class_bytes = table.bytes(ci);
            if class_bytes <= remaining {
                counts[ci] += 1;
                remaining -= class_bytes;
            }
        }
    }

    counts
}
