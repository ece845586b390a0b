use crossbeam_channel::{Receiver, Sender, bounded};
use thiserror::Error;

/// Errors surfaced by the point-to-point operations.
///
/// Note what is *not* here: there is no timeout variant. A rendezvous with a
/// live but silent peer blocks indefinitely; that stall is the accepted fault
/// model of this transport, not an error it reports.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("peer rank {peer} out of range for group of {group_size}")]
    PeerOutOfRange { peer: usize, group_size: usize },

    #[error("rank {rank} addressed itself")]
    SelfMessage { rank: usize },

    #[error("peer rank {peer} hung up")]
    Disconnected { peer: usize },
}

/// Blocking pairwise messaging within a fixed-size rank group.
///
/// Both operations have rendezvous semantics: `send` returns only after the
/// matching `recv` has consumed the value, `recv` blocks until a matching
/// `send` arrives. The payload type must be `Copy` so that a message is a
/// plain bitwise transfer with no shared ownership between ranks.
pub trait Transport<T: Copy> {
    /// This participant's rank in `[0, group_size)`.
    fn rank(&self) -> usize;

    /// Number of participants in the group. Fixed for the endpoint's lifetime.
    fn group_size(&self) -> usize;

    /// Deliver `value` to `peer`, blocking until `peer` has received it.
    fn send(&self, peer: usize, value: T) -> Result<(), TransportError>;

    /// Receive the next value sent by `peer`, blocking until it arrives.
    fn recv(&self, peer: usize) -> Result<T, TransportError>;
}

/// One rank's endpoint into a channel-backed group.
///
/// Created in bulk by [`ChannelEndpoint::connect_group`], which wires a
/// zero-capacity channel for every ordered rank pair. Each endpoint holds
/// the sender halves toward every peer and the receiver halves from every
/// peer, indexed by peer rank; the diagonal (self) slots stay empty.
pub struct ChannelEndpoint<T: Copy> {
    rank: usize,
    to_peer: Vec<Option<Sender<T>>>,
    from_peer: Vec<Option<Receiver<T>>>,
}

impl<T: Copy> ChannelEndpoint<T> {
    /// Builds the fully-wired endpoints for a group of `group_size` ranks.
    ///
    /// The returned vector is indexed by rank; hand element `i` to the
    /// thread (or process proxy) acting as rank `i` and drop nothing early,
    /// since a dropped endpoint turns its peers' operations into
    /// [`TransportError::Disconnected`].
    ///
    /// # Panics
    /// Panics if `group_size` is zero.
    pub fn connect_group(group_size: usize) -> Vec<ChannelEndpoint<T>> {
        assert!(group_size >= 1, "group must have at least one rank");

        let mut to_peer: Vec<Vec<Option<Sender<T>>>> = (0..group_size)
            .map(|_| (0..group_size).map(|_| None).collect())
            .collect();
        let mut from_peer: Vec<Vec<Option<Receiver<T>>>> = (0..group_size)
            .map(|_| (0..group_size).map(|_| None).collect())
            .collect();

        for src in 0..group_size {
            for dst in 0..group_size {
                if src == dst {
                    continue;
                }
                // Zero capacity makes the channel a rendezvous point: the
                // send blocks until the receive takes the value.
                let (tx, rx) = bounded(0);
                to_peer[src][dst] = Some(tx);
                from_peer[dst][src] = Some(rx);
            }
        }

        to_peer
            .into_iter()
            .zip(from_peer)
            .enumerate()
            .map(|(rank, (to_peer, from_peer))| ChannelEndpoint {
                rank,
                to_peer,
                from_peer,
            })
            .collect()
    }

    fn check_peer(&self, peer: usize) -> Result<(), TransportError> {
        if peer >= self.to_peer.len() {
            return Err(TransportError::PeerOutOfRange {
                peer,
                group_size: self.to_peer.len(),
            });
        }
        if peer == self.rank {
            return Err(TransportError::SelfMessage { rank: self.rank });
        }
        Ok(())
    }
}

impl<T: Copy> Transport<T> for ChannelEndpoint<T> {
    #[inline]
    fn rank(&self) -> usize {
        self.rank
    }

    #[inline]
    fn group_size(&self) -> usize {
        self.to_peer.len()
    }

    fn send(&self, peer: usize, value: T) -> Result<(), TransportError> {
        self.check_peer(peer)?;
        // check_peer guarantees the slot is populated
        let tx = self.to_peer[peer].as_ref().unwrap();
        tx.send(value)
            .map_err(|_| TransportError::Disconnected { peer })
    }

    fn recv(&self, peer: usize) -> Result<T, TransportError> {
        self.check_peer(peer)?;
        let rx = self.from_peer[peer].as_ref().unwrap();
        rx.recv().map_err(|_| TransportError::Disconnected { peer })
    }
}
