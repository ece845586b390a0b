use crate::CollectiveError;
use tracing::trace;
use trapz_events::Message;
use trapz_transport::Transport;

/// Gathers every rank's local estimate at `root` and returns their sum.
///
/// Non-root ranks send their estimate to the root and get `Ok(None)`.
/// The root seeds the total with its own estimate and then receives from
/// every other rank in increasing rank order, so the summation order (and
/// with it the floating point result) is the same on every run.
///
/// The gather is deliberately linear: one scalar flows back per rank, and
/// the root must touch every value anyway. Blocking: the root waits on
/// each peer in turn; a rank that never sends stalls the call.
///
/// # Errors
/// - [`CollectiveError::RootOutOfRange`] before any communication.
/// - [`CollectiveError::UnexpectedMessage`] if a peer sent a non-estimate
///   variant during the gather.
/// - [`CollectiveError::Transport`] if a peer endpoint was dropped.
pub fn reduce_estimate<X>(
    transport: &X,
    root: usize,
    local: f64,
) -> Result<Option<f64>, CollectiveError>
where
    X: Transport<Message>,
{
    let group_size = transport.group_size();
    let rank = transport.rank();

    if root >= group_size {
        return Err(CollectiveError::RootOutOfRange { root, group_size });
    }

    if rank != root {
        trace!(rank, root, local, "reduce send");
        transport.send(root, Message::Estimate(local))?;
        return Ok(None);
    }

    let mut total = local;
    for peer in (0..group_size).filter(|&p| p != root) {
        match transport.recv(peer)? {
            Message::Estimate(value) => {
                trace!(rank, peer, value, "reduce receive");
                total += value;
            }
            Message::Job(_) => return Err(CollectiveError::UnexpectedMessage { peer }),
        }
    }

    Ok(Some(total))
}
