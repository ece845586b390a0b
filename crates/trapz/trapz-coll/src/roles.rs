//! Per-round role assignment for the binomial broadcast tree.
//!
//! Everything here is pure rank arithmetic. Keeping the topology logic
//! free of any transport lets the tree shape be tested exhaustively as
//! plain functions.
//!
//! # The Tree
//!
//! Round `i` (of `d = ceil(log2(N))`) works on a stride of `2^(d-i)` and a
//! half-stride `half = stride / 2`, over ranks *relative to the root*:
//!
//! ```text
//! N = 8, root = 0:
//!
//! round 0 (stride 8, half 4):   0 ────────────▶ 4
//! round 1 (stride 4, half 2):   0 ──────▶ 2    4 ──────▶ 6
//! round 2 (stride 2, half 1):   0 ─▶ 1  2 ─▶ 3  4 ─▶ 5  6 ─▶ 7
//! ```
//!
//! Each informed rank forwards to exactly one new rank per round, so the
//! informed set doubles every round. For non-power-of-two N the guard
//! `rel + half < N` simply leaves the highest would-be partner out of a
//! round; such a rank is idle, never a second-time receiver.

/// What a rank does during one round of the broadcast.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StepRole {
    /// Forward the held value to this absolute rank.
    Send(usize),
    /// Receive the value from this absolute rank.
    Recv(usize),
    /// Sit this round out.
    Idle,
}

/// Number of broadcast rounds for a group of `group_size` ranks:
/// `ceil(log2(group_size))`, 0 for a group of one.
///
/// Computed in integer arithmetic; `next_power_of_two` rounds up to the
/// enclosing hypercube dimension.
///
/// # Example
/// ```
/// use trapz_coll::rounds;
/// assert_eq!(rounds(1), 0);
/// assert_eq!(rounds(3), 2);
/// assert_eq!(rounds(4), 2);
/// assert_eq!(rounds(5), 3);
/// ```
#[inline]
pub fn rounds(group_size: usize) -> u32 {
    debug_assert!(group_size >= 1);
    group_size.next_power_of_two().trailing_zeros()
}

/// Role of `rank` in round `step` of a broadcast rooted at `root`.
///
/// Rotating every rank by `-root` reduces the general case to a tree
/// rooted at relative rank 0; peers are rotated back before returning.
/// Within a round, sender `k` pairs with receiver `k + half` and the
/// modulus test keeps the pairings disjoint: no receiver has two senders.
///
/// `step >= rounds(group_size)` yields `Idle`. Bounding the round index
/// this way keeps `half >= 1`, so the modulus below never degenerates.
pub fn step_role(rank: usize, group_size: usize, root: usize, step: usize) -> StepRole {
    let d = rounds(group_size) as usize;
    if step >= d {
        return StepRole::Idle;
    }

    let stride = 1usize << (d - step);
    let half = stride >> 1;
    let rel = (rank + group_size - root) % group_size;

    if rel % stride == 0 {
        if rel + half < group_size {
            StepRole::Send(to_absolute(rel + half, root, group_size))
        } else {
            // informed rank whose partner would fall off the group
            StepRole::Idle
        }
    } else if rel % half == 0 {
        StepRole::Recv(to_absolute(rel - half, root, group_size))
    } else {
        StepRole::Idle
    }
}

#[inline]
fn to_absolute(rel: usize, root: usize, group_size: usize) -> usize {
    (rel + root) % group_size
}
