pub mod integral_job;
pub use integral_job::IntegralJob;

// the "type" of the message (which variant) is encoded
// in the stored bytes (discriminant + payload)

/// Wire message for the rank-to-rank transport. One variant is sent per
/// rendezvous; the receiver matches on the discriminant to handle each kind.
/// Must be `Copy` (and `Clone`) so it can move through the channel group
/// without serialization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Message {
    /// Broadcast phase: the job record travelling down the binomial tree.
    Job(IntegralJob),
    /// Reduction phase: one rank's partial estimate travelling to the root.
    Estimate(f64),
}
