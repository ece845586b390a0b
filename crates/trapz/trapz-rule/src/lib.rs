//! Work partitioning and the trapezoidal rule.
//!
//! Pure functions only: no communication, no state. Given the same job
//! every rank derives its own slice independently and all slices agree,
//! which is what lets the partition run without any coordination round.

mod panel;
mod trap;

pub use panel::{Panel, partition};
pub use trap::trap;
