//! Utilities to implement the different futures and streams of this crate.

mod indexer;
mod pin;
mod poll_state;
mod rng;
mod trace;
mod tuple;
mod wakers;

pub(crate) use indexer::Indexer;
pub(crate) use pin::get_pin_mut_from_vec;
pub(crate) use poll_state::{PollState, PollStates};
pub(crate) use rng::RandomGenerator;
pub(crate) use trace::trace_event;
pub(crate) use tuple::tuple_len;
pub(crate) use wakers::WakerVec;

#[cfg(test)]
pub(crate) use wakers::DummyWaker;

#[cfg(test)]
pub(crate) mod channel;
