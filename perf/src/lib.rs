//! Shared helpers for the trapz benchmarks.

use trapz_events::IntegralJob;

/// A representative job record for benchmark runs.
pub fn make_test_job() -> IntegralJob {
    IntegralJob::new(0.0, 1.0, 4096)
}

/// The reference integrand.
pub fn square(x: f64) -> f64 {
    x * x
}
