//! Race and aggregate asynchronous channels.
//!
//! A *channel* here is anything implementing [`Stream`][futures_core::Stream]:
//! a yielded value is a received message, and the end of the stream means the
//! channel was closed. Receivers from `futures::channel::mpsc`,
//! `async-channel` and friends all qualify.
//!
//! Every operation in this crate is executor-agnostic. Instead of spawning a
//! task per channel, each returns a single [`Future`][core::future::Future]
//! or [`Stream`][futures_core::Stream] which polls all of its channels
//! concurrently from the task that awaits it.
//!
//! # Operations
//!
//! This library provides the following operations on arrays, vecs, and tuples:
//!
//! - [`race::RaceAny`]: Wait for the first receive adapter to deliver a value
//!   into its slot.
//! - [`race::RaceAny::await_first`]: Like `race_any`, then cancel the producers
//!   through a [`cancel::CancelToken`].
//! - [`aggregate::Aggregate`]: Combine multiple channels into a single channel
//!   of all their values.
//!
//! And on pairs of channels of different types:
//!
//! - [`aggregate::aggregate_either`]: Combine two channels into a single
//!   channel of [`either::Either`] values.
//!
//! # Examples
//!
//! Race three channels of different types, and find out which fired first:
//!
//! ```rust
//! use channel_race::prelude::*;
//! use channel_race::receive::Target;
//! use futures::channel::mpsc;
//! use futures_lite::future::block_on;
//!
//! block_on(async {
//!     let (_words_tx, mut words) = mpsc::channel::<String>(0);
//!     let (mut numbers_tx, mut numbers) = mpsc::channel::<i32>(0);
//!     let (_floats_tx, mut floats) = mpsc::channel::<f64>(0);
//!     numbers_tx.try_send(2).unwrap();
//!
//!     let (mut word, mut number, mut float) = (None, None, None);
//!     let winner = (
//!         Target::new(&mut words, &mut word),
//!         Target::new(&mut numbers, &mut number),
//!         Target::new(&mut floats, &mut float),
//!     )
//!         .race_any()
//!         .await;
//!
//!     assert_eq!(winner, Ok(1));
//!     assert_eq!((word, number, float), (None, Some(2), None));
//! })
//! ```

#![deny(missing_debug_implementations, nonstandard_style)]
#![warn(missing_docs, unreachable_pub)]
#![allow(non_snake_case)]

mod utils;

/// The channel-race prelude.
pub mod prelude {
    pub use super::aggregate::Aggregate as _;
    pub use super::race::RaceAny as _;
}

pub mod aggregate;
pub mod cancel;
pub mod either;
pub mod error;
pub mod race;
pub mod receive;

pub use error::RaceError;

/// Helper functions and types for tuples.
pub mod tuple {
    pub use crate::aggregate::tuple::{
        Aggregate1, Aggregate10, Aggregate11, Aggregate12, Aggregate2, Aggregate3, Aggregate4,
        Aggregate5, Aggregate6, Aggregate7, Aggregate8, Aggregate9,
    };
    pub use crate::race::tuple::{
        RaceAny1, RaceAny10, RaceAny11, RaceAny12, RaceAny2, RaceAny3, RaceAny4, RaceAny5,
        RaceAny6, RaceAny7, RaceAny8, RaceAny9,
    };
}

/// Helper functions and types for contiguous growable array type with heap-allocated contents,
/// written `Vec<T>`, and for fixed-length arrays.
pub mod vec {
    pub use crate::aggregate::vec::Aggregate;
    pub use crate::race::vec::RaceAny;
}
