use channel_race::prelude::*;
use channel_race::receive::Target;
use futures_core::Stream;
use futures_lite::future::block_on;
use futures_lite::prelude::*;
use pin_project::pin_project;

use std::cell::RefCell;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

/// Create `max` channels which deliver in index order.
pub(crate) fn countdowns(max: usize) -> Vec<Countdown> {
    let wakers = Rc::new(RefCell::new(vec![]));
    let completed = Rc::new(RefCell::new(0));
    (0..max)
        .map(|n| Countdown::new(n, wakers.clone(), completed.clone()))
        .collect()
}

pub(crate) fn aggregate_test(max: usize) {
    block_on(async {
        let mut s = countdowns(max).aggregate();

        let mut counter = 0;
        while s.next().await.is_some() {
            counter += 1;
        }
        assert_eq!(counter, max);
    })
}

pub(crate) fn race_test(max: usize) {
    block_on(async {
        let mut slots = vec![None; max];
        let winner = countdowns(max)
            .into_iter()
            .zip(slots.iter_mut())
            .map(|(channel, slot)| Target::new(channel, slot))
            .collect::<Vec<_>>()
            .race_any()
            .await;

        assert_eq!(winner, Ok(0));
        assert_eq!(slots[0], Some(0));
    })
}

#[derive(Clone, Copy)]
enum State {
    Waiting,
    Done,
}

/// A channel which delivers its index once every lower index has delivered.
///
/// Channels whose turn hasn't come park their waker. The channel whose turn it
/// is wakes every parked channel as it delivers, so the set always makes
/// progress.
#[pin_project]
pub(crate) struct Countdown {
    state: State,
    wakers: Rc<RefCell<Vec<Waker>>>,
    index: usize,
    completed_count: Rc<RefCell<usize>>,
}

impl Countdown {
    fn new(index: usize, wakers: Rc<RefCell<Vec<Waker>>>, completed_count: Rc<RefCell<usize>>) -> Self {
        Self {
            state: State::Waiting,
            wakers,
            index,
            completed_count,
        }
    }
}

impl Stream for Countdown {
    type Item = usize;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();

        match this.state {
            State::Waiting if *this.completed_count.borrow() == *this.index => {
                *this.state = State::Done;
                *this.completed_count.borrow_mut() += 1;
                let parked = std::mem::take(&mut *this.wakers.borrow_mut());
                for waker in parked {
                    waker.wake();
                }
                Poll::Ready(Some(*this.index))
            }
            State::Waiting => {
                this.wakers.borrow_mut().push(cx.waker().clone());
                Poll::Pending
            }
            State::Done => Poll::Ready(None),
        }
    }
}
