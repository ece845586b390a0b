//! Multi-rank integration tests for the collective primitives.
//!
//! Each test stands up a real rank group: one OS thread per rank, wired
//! with the rendezvous channel transport, every rank running the same
//! collective call concurrently. This exercises the actual blocking
//! behavior of the rounds, not just the role arithmetic.

use std::cell::Cell;
use std::thread;
use trapz_coll::{broadcast_job, reduce_estimate, rounds};
use trapz_events::{IntegralJob, Message};
use trapz_transport::{ChannelEndpoint, Transport, TransportError};

/// Transport wrapper that counts the point-to-point operations a rank
/// performs, to pin down the communication volume of a collective.
struct Counting<X> {
    inner: X,
    sends: Cell<usize>,
    recvs: Cell<usize>,
}

impl<X> Counting<X> {
    fn new(inner: X) -> Self {
        Self {
            inner,
            sends: Cell::new(0),
            recvs: Cell::new(0),
        }
    }
}

impl<T: Copy, X: Transport<T>> Transport<T> for Counting<X> {
    fn rank(&self) -> usize {
        self.inner.rank()
    }

    fn group_size(&self) -> usize {
        self.inner.group_size()
    }

    fn send(&self, peer: usize, value: T) -> Result<(), TransportError> {
        self.sends.set(self.sends.get() + 1);
        self.inner.send(peer, value)
    }

    fn recv(&self, peer: usize) -> Result<T, TransportError> {
        self.recvs.set(self.recvs.get() + 1);
        self.inner.recv(peer)
    }
}

/// Runs `body` once per rank on its own thread and collects the results
/// in rank order.
fn run_group<R, F>(group_size: usize, body: F) -> Vec<R>
where
    R: Send + 'static,
    F: Fn(ChannelEndpoint<Message>) -> R + Send + Sync + 'static + Clone,
{
    let endpoints = ChannelEndpoint::<Message>::connect_group(group_size);
    let handles: Vec<_> = endpoints
        .into_iter()
        .map(|ep| {
            let body = body.clone();
            thread::spawn(move || body(ep))
        })
        .collect();
    handles
        .into_iter()
        .map(|h| h.join().expect("rank thread panicked"))
        .collect()
}

#[test]
fn broadcast_reaches_every_rank_for_every_root() {
    for group_size in 1..=8 {
        for root in 0..group_size {
            let job = IntegralJob::new(-2.5, 7.75, 96);
            let results = run_group(group_size, move |ep| {
                let held = (ep.rank() == root).then_some(job);
                broadcast_job(&ep, root, held).expect("broadcast failed")
            });

            for (rank, got) in results.iter().enumerate() {
                // bit-for-bit copy of the root's record
                assert_eq!(
                    *got, job,
                    "N={group_size} root={root} rank={rank} got a different job"
                );
            }
        }
    }
}

#[test]
fn broadcast_communication_volume_is_logarithmic() {
    for group_size in [1usize, 2, 3, 4, 5, 8] {
        let job = IntegralJob::new(0.0, 1.0, 1024);
        let counts = run_group(group_size, move |ep| {
            let counting = Counting::new(ep);
            let held = (counting.rank() == 0).then_some(job);
            broadcast_job(&counting, 0, held).expect("broadcast failed");
            (counting.sends.get(), counting.recvs.get())
        });

        let total_sends: usize = counts.iter().map(|(s, _)| s).sum();
        let total_recvs: usize = counts.iter().map(|(_, r)| r).sum();

        // exactly one receive per non-root rank, ever
        assert_eq!(total_recvs, group_size - 1, "N={group_size}");
        assert_eq!(total_sends, total_recvs, "N={group_size}");

        // no rank talks more often than the round count allows
        let d = rounds(group_size) as usize;
        for (rank, (sends, recvs)) in counts.iter().enumerate() {
            assert!(*sends <= d, "N={group_size} rank={rank} sent {sends} > {d}");
            assert!(*recvs <= 1, "N={group_size} rank={rank} received twice");
        }

        // the root is a sender in every round of a power-of-two group
        if group_size.is_power_of_two() {
            assert_eq!(counts[0].0, d, "N={group_size} root send count");
        }
    }
}

#[test]
fn broadcast_asymmetric_group_of_three() {
    // ceil(log2(3)) = 2 rounds; rank 2 is informed in round 0 and must
    // not block on a phantom partner in round 1.
    assert_eq!(rounds(3), 2);

    let job = IntegralJob::new(1.0, 4.0, 30);
    let results = run_group(3, move |ep| {
        let held = (ep.rank() == 0).then_some(job);
        broadcast_job(&ep, 0, held).expect("broadcast failed")
    });

    assert_eq!(results, vec![job; 3]);
}

#[test]
fn broadcast_single_rank_is_a_no_op() {
    let job = IntegralJob::new(0.0, 3.0, 3);
    let results = run_group(1, move |ep| {
        broadcast_job(&ep, 0, Some(job)).expect("broadcast failed")
    });
    assert_eq!(results, vec![job]);
}

#[test]
fn broadcast_rejects_rootless_call() {
    let results = run_group(1, |ep| broadcast_job(&ep, 0, None));
    assert!(results[0].is_err(), "root without a value must fail");
}

#[test]
fn broadcast_rejects_out_of_range_root() {
    let results = run_group(2, |ep| broadcast_job(&ep, 9, None));
    for r in results {
        assert!(r.is_err());
    }
}

#[test]
fn reduce_sums_in_rank_order() {
    // values chosen so any reordering of the fixed summation order would
    // produce a different floating point result
    let locals = [1.0e16, 1.0, -1.0e16, 3.0, 0.5];
    let expected = locals.iter().copied().fold(0.0, |acc, v| acc + v);
    // root-order fold: root's own value first, then ranks 1..N
    assert_eq!(expected, (((1.0e16 + 1.0) + -1.0e16) + 3.0) + 0.5);

    let results = run_group(locals.len(), move |ep| {
        reduce_estimate(&ep, 0, locals[ep.rank()]).expect("reduce failed")
    });

    assert_eq!(results[0], Some(expected));
    for r in &results[1..] {
        assert_eq!(*r, None);
    }
}

#[test]
fn reduce_at_nonzero_root() {
    let results = run_group(4, |ep| {
        reduce_estimate(&ep, 2, (ep.rank() + 1) as f64).expect("reduce failed")
    });

    for (rank, r) in results.iter().enumerate() {
        if rank == 2 {
            assert_eq!(*r, Some(10.0));
        } else {
            assert_eq!(*r, None);
        }
    }
}

#[test]
fn reduce_single_rank_returns_own_value() {
    let results = run_group(1, |ep| reduce_estimate(&ep, 0, 1.25).expect("reduce failed"));
    assert_eq!(results, vec![Some(1.25)]);
}
