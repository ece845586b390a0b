//! Rendezvous point-to-point transport between the ranks of a fixed-size group.
//!
//! This crate provides the messaging substrate the collective primitives are
//! built on: blocking, synchronous, pairwise send/receive between integer
//! ranks `0..N`. A send completes only once the matching receive has consumed
//! the value; a receive blocks until a matching send arrives.
//!
//! # Design
//! - **Addressing**: every participant is identified by its rank within the
//!   group. The message envelope is implicit — channel identity encodes the
//!   (sender, receiver) pair, the payload is the typed value itself.
//! - **Backend**: one zero-capacity crossbeam channel per ordered rank pair.
//!   A zero-capacity channel *is* a rendezvous channel, so the blocking
//!   contract comes from the backend rather than from extra bookkeeping.
//! - **Fault model**: no timeout, no retry. A send or receive with no
//!   matching peer operation blocks forever; only a dropped peer endpoint is
//!   observable, as [`TransportError::Disconnected`].
//!
//! # Thread Safety
//! `ChannelEndpoint` is `Send` but meant for exclusive use by one thread:
//! one endpoint per rank, one rank per thread.

mod endpoint;

pub use endpoint::{ChannelEndpoint, Transport, TransportError};
