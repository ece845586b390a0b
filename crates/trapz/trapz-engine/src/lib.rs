//! Per-rank orchestration: input -> broadcast -> compute -> reduce.
//!
//! One [`Worker`] runs on each rank. The root acquires the job from an
//! injected [`JobSource`], validates it, and only then lets the broadcast
//! begin; invalid input is fatal at the root before any dissemination, so
//! no rank ever computes on undefined values. Non-root ranks have no error
//! path of their own: they either receive a valid job or stall with the
//! group.

mod job_source;
mod worker;

pub use job_source::{FileJobSource, JobSource, JobSourceError};
pub use worker::{EngineError, Summary, Worker};
