use trapz_events::IntegralJob;

/// One rank's contiguous slice of the integration interval.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Panel {
    /// Left endpoint of the slice.
    pub left: f64,
    /// Right endpoint of the slice.
    pub right: f64,
    /// Trapezoids inside the slice.
    pub traps: i32,
}

/// Derives `rank`'s panel of the job's interval.
///
/// Every rank gets `n / N` trapezoids; the remainder `n % N` goes to the
/// last rank, so the panels tile `[a, b]` exactly for any `n >= N` instead
/// of silently dropping the leftover trapezoids. With `n < N` the base
/// share is zero: every non-last rank gets an empty panel pinned at `a`
/// and the last rank carries the whole interval. Deterministic and
/// identical across ranks given an identical job.
///
/// Panel edges are computed from `a` by multiplication, not by repeated
/// addition, so adjacent ranks agree on their shared edge bit-for-bit.
pub fn partition(rank: usize, group_size: usize, job: &IntegralJob) -> Panel {
    debug_assert!(group_size >= 1);
    debug_assert!(rank < group_size);

    let h = job.base_len();
    let share = job.n / group_size as i32;
    let traps = if rank == group_size - 1 {
        share + job.n % group_size as i32
    } else {
        share
    };

    let left = job.a + (rank as i32 * share) as f64 * h;
    let right = if rank == group_size - 1 {
        // land exactly on b, no accumulated rounding
        job.b
    } else {
        job.a + ((rank as i32 + 1) * share) as f64 * h
    };

    Panel { left, right, traps }
}
