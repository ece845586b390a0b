use crate::roles::{StepRole, rounds, step_role};
use crate::CollectiveError;
use tracing::trace;
use trapz_events::{IntegralJob, Message};
use trapz_transport::Transport;

/// Disseminates a job record from `root` to every rank of the group.
///
/// The root calls this with `Some(job)`, every other rank with `None`;
/// on success every rank returns the root's record, bit-for-bit. The walk
/// takes exactly `rounds(N)` rendezvous rounds (0 when N is 1), each rank
/// acting per [`step_role`]: forward the held record, receive it, or idle.
///
/// Blocking: every round with a role is a rendezvous with its partner.
/// A partner that never shows up stalls the call indefinitely.
///
/// # Errors
/// - [`CollectiveError::RootOutOfRange`] before any communication.
/// - [`CollectiveError::MissingRootValue`] if the root passed `None`.
/// - [`CollectiveError::UnexpectedMessage`] if a peer sent a non-job
///   variant mid-broadcast.
/// - [`CollectiveError::Transport`] if a peer endpoint was dropped.
pub fn broadcast_job<X>(
    transport: &X,
    root: usize,
    job: Option<IntegralJob>,
) -> Result<IntegralJob, CollectiveError>
where
    X: Transport<Message>,
{
    let group_size = transport.group_size();
    let rank = transport.rank();

    if root >= group_size {
        return Err(CollectiveError::RootOutOfRange { root, group_size });
    }

    let mut held = if rank == root {
        Some(job.ok_or(CollectiveError::MissingRootValue)?)
    } else {
        // whatever a non-root caller passed is a placeholder, not data
        None
    };

    for step in 0..rounds(group_size) as usize {
        match step_role(rank, group_size, root, step) {
            StepRole::Send(peer) => {
                let value = held.ok_or(CollectiveError::Uninformed { rank, step })?;
                trace!(rank, step, peer, "broadcast forward");
                transport.send(peer, Message::Job(value))?;
            }
            StepRole::Recv(peer) => {
                trace!(rank, step, peer, "broadcast receive");
                match transport.recv(peer)? {
                    Message::Job(value) => held = Some(value),
                    Message::Estimate(_) => {
                        return Err(CollectiveError::UnexpectedMessage { peer });
                    }
                }
            }
            StepRole::Idle => {}
        }
    }

    // termination invariant: after rounds(N) rounds nobody is uninformed
    held.ok_or(CollectiveError::Uninformed {
        rank,
        step: rounds(group_size) as usize,
    })
}
