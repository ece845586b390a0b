//! Collective operations over the rank group: broadcast and reduce.
//!
//! These are the coordination core of the system. Both are built from
//! nothing but the pairwise rendezvous operations of [`trapz_transport`],
//! with no collective support assumed from the transport itself.
//!
//! # Design
//! - **Broadcast**: binomial (hypercube) tree rooted at any rank. The
//!   informed set doubles each round, so dissemination takes
//!   `ceil(log2(N))` sequential rounds instead of the `N - 1` sends a
//!   naive root-to-everyone loop would need.
//! - **Reduce**: linear gather at the root. Only one scalar flows back per
//!   rank, and summation order must be fixed for reproducible floating
//!   point results, so the O(N) loop is the straightforward choice here.
//! - **Roles**: which rank sends to whom at which round is a pure function
//!   of `(rank, group_size, root, step)` in [`roles`], unit-testable with
//!   no transport at all.
//!
//! # Blocking Behavior
//! Every round is a rendezvous. A missing partner (crashed rank, skipped
//! call) stalls the whole group; there is no timeout by contract.

mod broadcast;
mod reduce;
pub mod roles;

pub use broadcast::broadcast_job;
pub use reduce::reduce_estimate;
pub use roles::{StepRole, rounds, step_role};

use thiserror::Error;
use trapz_transport::TransportError;

/// Errors surfaced by the collective operations.
#[derive(Debug, Error)]
pub enum CollectiveError {
    #[error("root rank {root} out of range for group of {group_size}")]
    RootOutOfRange { root: usize, group_size: usize },

    /// The root was asked to broadcast without holding a value.
    #[error("broadcast root holds no value")]
    MissingRootValue,

    /// A rank was scheduled to forward before anything reached it, or
    /// finished the rounds still empty-handed. Unreachable given the role
    /// tables; checked at runtime all the same.
    #[error("rank {rank} reached round {step} uninformed")]
    Uninformed { rank: usize, step: usize },

    /// A peer sent a different wire variant than the phase called for.
    #[error("unexpected message variant from rank {peer}")]
    UnexpectedMessage { peer: usize },

    #[error("transport failure")]
    Transport(#[from] TransportError),
}
