#![forbid(unsafe_code)]

// The job record is the only state that crosses rank boundaries during the
// broadcast phase. It must be POD: fixed-size, Copy, identical layout at
// every rank, so that the copy each rank holds after dissemination is
// bit-for-bit the root's original.
//
// repr(C) -> predictable field ordering, stable across the whole group

/// Description of one integration run: the interval `[a, b]` and the total
/// number of trapezoids `n` to split it into.
///
/// Before the broadcast this is valid only at the root; afterwards every
/// rank holds an identical copy and treats it as read-only.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct IntegralJob {
    /// Left endpoint of the interval.
    pub a: f64,
    /// Right endpoint of the interval.
    pub b: f64,
    /// Total trapezoid count across all ranks. Must be positive.
    pub n: i32,
}

impl IntegralJob {
    pub fn new(a: f64, b: f64, n: i32) -> Self {
        Self { a, b, n }
    }

    /// Width of one trapezoid. The same at every rank because the job
    /// itself is the same at every rank.
    #[inline]
    pub fn base_len(&self) -> f64 {
        (self.b - self.a) / self.n as f64
    }
}
