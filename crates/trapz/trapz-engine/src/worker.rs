use crate::job_source::{JobSource, JobSourceError};
use thiserror::Error;
use tracing::{debug, info};
use trapz_coll::{CollectiveError, broadcast_job, reduce_estimate};
use trapz_events::Message;
use trapz_rule::{partition, trap};
use trapz_transport::Transport;

/// The root's view of a finished run, handed to the output sink.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Summary {
    pub a: f64,
    pub b: f64,
    pub n: i32,
    pub total: f64,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("job input failed")]
    Source(#[from] JobSourceError),

    /// Rejected at the root before any dissemination.
    #[error("invalid job: {detail} (a={a}, b={b}, n={n})")]
    InvalidJob {
        a: f64,
        b: f64,
        n: i32,
        detail: &'static str,
    },

    /// The root rank was started without a job source.
    #[error("root rank {rank} has no job source")]
    RootWithoutSource { rank: usize },

    #[error("collective operation failed")]
    Collective(#[from] CollectiveError),
}

/// One rank's run of the whole pipeline.
///
/// Owns this rank's transport endpoint for the duration of the run. All
/// ranks call [`Worker::run`] concurrently with the same `root`; the calls
/// rendezvous with each other through the collectives.
pub struct Worker<X: Transport<Message>> {
    transport: X,
}

impl<X: Transport<Message>> Worker<X> {
    pub fn new(transport: X) -> Self {
        Self { transport }
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.transport.rank()
    }

    #[inline]
    pub fn group_size(&self) -> usize {
        self.transport.group_size()
    }

    /// Runs input acquisition, broadcast, local compute and reduction.
    ///
    /// `source` is consulted only on the root rank; other ranks may pass
    /// `None`. Returns `Some(summary)` at the root and `None` elsewhere.
    pub fn run(
        &self,
        root: usize,
        source: Option<&dyn JobSource>,
        integrand: impl Fn(f64) -> f64,
    ) -> Result<Option<Summary>, EngineError> {
        let rank = self.rank();

        let seed = if rank == root {
            let source = source.ok_or(EngineError::RootWithoutSource { rank })?;
            let job = source.load()?;
            validate(&job)?;
            info!(rank, a = job.a, b = job.b, n = job.n, "job loaded at root");
            Some(job)
        } else {
            None
        };

        let job = broadcast_job(&self.transport, root, seed)?;

        let panel = partition(rank, self.group_size(), &job);
        debug!(
            rank,
            left = panel.left,
            right = panel.right,
            traps = panel.traps,
            "panel assigned"
        );

        let local = trap(panel.left, panel.right, panel.traps, job.base_len(), integrand);
        debug!(rank, local, "local estimate");

        let total = reduce_estimate(&self.transport, root, local)?;

        Ok(total.map(|total| {
            info!(rank, total, "run complete");
            Summary {
                a: job.a,
                b: job.b,
                n: job.n,
                total,
            }
        }))
    }
}

fn validate(job: &trapz_events::IntegralJob) -> Result<(), EngineError> {
    let invalid = |detail| EngineError::InvalidJob {
        a: job.a,
        b: job.b,
        n: job.n,
        detail,
    };

    if !job.a.is_finite() || !job.b.is_finite() {
        return Err(invalid("endpoints must be finite"));
    }
    if job.n <= 0 {
        return Err(invalid("trapezoid count must be positive"));
    }
    Ok(())
}
