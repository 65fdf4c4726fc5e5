use channel_race::aggregate::aggregate_either;
use channel_race::cancel::CancelToken;
use channel_race::either::Either;
use channel_race::prelude::*;
use channel_race::receive::{BoxAttempt, Target};
use channel_race::RaceError;

use futures::channel::mpsc;
use futures::{SinkExt, StreamExt};
use rand::Rng;
use std::time::{Duration, Instant};
use tokio::time::{sleep, timeout};

/// Send `value` after `delay`, then close the channel.
fn emit_after<T: Send + 'static>(value: T, delay: Duration) -> mpsc::Receiver<T> {
    let (mut tx, rx) = mpsc::channel(0);
    tokio::spawn(async move {
        sleep(delay).await;
        let _ = tx.send(value).await;
    });
    rx
}

/// Close the channel after `delay` without sending anything.
fn close_after<T: Send + 'static>(delay: Duration) -> mpsc::Receiver<T> {
    let (tx, rx) = mpsc::channel(0);
    tokio::spawn(async move {
        sleep(delay).await;
        drop(tx);
    });
    rx
}

#[tokio::test]
async fn single_adapter_resolves_with_first_value() {
    let start = Instant::now();
    let mut c1 = emit_after("a", Duration::from_millis(50));
    let _c2 = close_after::<&str>(Duration::from_millis(200));

    let mut out = None;
    let res = (Target::new(&mut c1, &mut out),).race_any().await;

    assert_eq!(res, Ok(0));
    assert_eq!(out, Some("a"));
    assert!(start.elapsed() < Duration::from_millis(100));
}

#[tokio::test]
async fn silent_channel_does_not_delay_the_winner() {
    let start = Instant::now();
    let mut c1 = emit_after("a", Duration::from_millis(50));
    let mut c2 = close_after::<&str>(Duration::from_millis(200));

    let mut out1 = None;
    let mut out2 = None;
    let res = vec![
        Target::new(&mut c1, &mut out1),
        Target::new(&mut c2, &mut out2),
    ]
    .race_any()
    .await;

    assert_eq!(res, Ok(0));
    assert_eq!((out1, out2), (Some("a"), None));
    assert!(start.elapsed() < Duration::from_millis(100));
}

#[tokio::test]
async fn single_adapter_matches_direct_receive() {
    let mut direct = emit_after(7u64, Duration::from_millis(10));
    let mut raced = emit_after(7u64, Duration::from_millis(10));

    let expected = direct.next().await;
    let mut out = None;
    let res = (Target::new(&mut raced, &mut out),).race_any().await;

    assert_eq!(res, Ok(0));
    assert_eq!(out, expected);
}

#[tokio::test]
async fn only_the_producing_channel_wins() {
    let mut rng = rand::thread_rng();
    for _ in 0..20 {
        let len = rng.gen_range(1..8);
        let winner = rng.gen_range(0..len);

        let mut senders = Vec::with_capacity(len);
        let mut receivers = Vec::with_capacity(len);
        for _ in 0..len {
            let (tx, rx) = mpsc::channel::<usize>(0);
            senders.push(tx);
            receivers.push(rx);
        }

        let mut slots = vec![None; len];
        let mut tx = senders[winner].clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(5)).await;
            let _ = tx.send(winner * 10).await;
        });

        let res = receivers
            .iter_mut()
            .zip(slots.iter_mut())
            .map(|(rx, slot)| Target::new(rx, slot))
            .collect::<Vec<_>>()
            .race_any()
            .await;

        assert_eq!(res, Ok(winner));
        for (i, slot) in slots.iter().enumerate() {
            if i == winner {
                assert_eq!(*slot, Some(winner * 10));
            } else {
                assert_eq!(*slot, None);
            }
        }
    }
}

#[tokio::test]
async fn simultaneously_ready_populates_one_slot() {
    for _ in 0..50 {
        let mut receivers: Vec<_> = (0..5)
            .map(|i| {
                let (mut tx, rx) = mpsc::channel::<i32>(0);
                tx.try_send(i).unwrap();
                rx
            })
            .collect();
        let mut slots = vec![None; 5];

        let winner = receivers
            .iter_mut()
            .zip(slots.iter_mut())
            .map(|(rx, slot)| Target::new(rx, slot))
            .collect::<Vec<_>>()
            .race_any()
            .await
            .unwrap();

        let populated: Vec<_> = slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|v| (i, v)))
            .collect();
        assert_eq!(populated, vec![(winner, winner as i32)]);
    }
}

#[tokio::test]
async fn losers_keep_their_values() {
    let (mut tx_a, mut rx_a) = mpsc::channel::<u8>(0);
    let (mut tx_b, mut rx_b) = mpsc::channel::<u8>(0);
    tx_a.try_send(1).unwrap();

    let mut a = None;
    let mut b = None;
    let res = (Target::new(&mut rx_a, &mut a), Target::new(&mut rx_b, &mut b))
        .race_any()
        .await;
    assert_eq!(res, Ok(0));

    tx_b.try_send(2).unwrap();
    assert_eq!(rx_b.next().await, Some(2));
    assert_eq!(b, None);
}

#[tokio::test]
async fn heterogeneous_boxed_race() {
    let mut word = emit_after(String::from("late"), Duration::from_millis(80));
    let mut number = emit_after(2i32, Duration::from_millis(10));

    let mut w = None;
    let mut n = None;
    let attempts: Vec<BoxAttempt<'_>> = vec![
        Target::new(&mut word, &mut w).boxed(),
        Target::new(&mut number, &mut n).boxed(),
    ];
    assert_eq!(attempts.race_any().await, Ok(1));
    assert_eq!((w, n), (None, Some(2)));
}

#[tokio::test]
async fn every_channel_closed() {
    let mut a = close_after::<u8>(Duration::from_millis(5));
    let mut b = close_after::<u8>(Duration::from_millis(10));
    let res = [Target::discard(&mut a), Target::discard(&mut b)]
        .race_any()
        .await;
    assert_eq!(res, Err(RaceError::Closed));
}

#[tokio::test]
async fn no_participants() {
    let attempts: Vec<BoxAttempt<'_>> = Vec::new();
    assert_eq!(attempts.race_any().await, Err(RaceError::Empty));
}

async fn produce<T: Clone>(
    mut tx: mpsc::Sender<T>,
    value: T,
    every: Duration,
    token: CancelToken,
) {
    loop {
        tokio::select! {
            _ = token.cancelled() => return,
            _ = sleep(every) => {}
        }
        tokio::select! {
            _ = token.cancelled() => return,
            res = tx.send(value.clone()) => if res.is_err() { return },
        }
    }
}

#[tokio::test]
async fn await_first_stops_the_producers() {
    let token = CancelToken::new();
    let (tx1, mut c1) = mpsc::channel::<String>(0);
    let (tx2, mut c2) = mpsc::channel::<i32>(0);
    let (tx3, mut c3) = mpsc::channel::<f64>(0);

    let producers = [
        tokio::spawn(produce(tx1, "1".to_string(), Duration::from_millis(300), token.clone())),
        tokio::spawn(produce(tx2, 2, Duration::from_millis(400), token.clone())),
        tokio::spawn(produce(tx3, 3.0, Duration::from_millis(200), token.clone())),
    ];

    let (mut r1, mut r2, mut r3) = (None, None, None);
    let res = (
        Target::new(&mut c1, &mut r1),
        Target::new(&mut c2, &mut r2),
        Target::new(&mut c3, &mut r3),
    )
        .await_first(token.clone())
        .await;

    assert_eq!(res, Ok(2));
    assert_eq!((r1, r2, r3), (None, None, Some(3.0)));
    assert!(token.is_cancelled());

    for producer in producers {
        timeout(Duration::from_millis(100), producer)
            .await
            .expect("producer ignored cancellation")
            .unwrap();
    }

    // Producers exited, so their channels are closed.
    assert_eq!(c1.next().await, None);
    assert_eq!(c2.next().await, None);
}

#[tokio::test]
async fn aggregate_yields_every_value_then_closes() {
    let c1 = emit_after("1", Duration::from_millis(20));
    let c2 = emit_after(2, Duration::from_millis(10));

    let mut all: Vec<_> = aggregate_either(c1, c2).collect().await;
    all.sort();
    assert_eq!(all, vec![Either::Left("1"), Either::Right(2)]);
}

#[tokio::test]
async fn aggregate_zero_channels() {
    let channels: Vec<mpsc::Receiver<u8>> = Vec::new();
    let all: Vec<_> = channels.aggregate().collect().await;
    assert!(all.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn aggregate_never_drops_values() {
    const SOURCES: usize = 6;
    const PER_SOURCE: usize = 200;

    let receivers: Vec<_> = (0..SOURCES)
        .map(|source| {
            let (mut tx, rx) = mpsc::channel(0);
            tokio::spawn(async move {
                for n in 0..PER_SOURCE {
                    if n % 17 == 0 {
                        tokio::task::yield_now().await;
                    }
                    tx.send((source, n)).await.unwrap();
                }
            });
            rx
        })
        .collect();

    let all: Vec<(usize, usize)> = receivers.aggregate().collect().await;
    assert_eq!(all.len(), SOURCES * PER_SOURCE);

    // Values from one source keep their relative order.
    for source in 0..SOURCES {
        let from_source: Vec<_> = all
            .iter()
            .filter(|(s, _)| *s == source)
            .map(|(_, n)| *n)
            .collect();
        assert_eq!(from_source, (0..PER_SOURCE).collect::<Vec<_>>());
    }
}

#[async_std::test]
async fn async_std_channels() {
    let (tx_a, rx_a) = async_std::channel::bounded::<&str>(1);
    let (tx_b, rx_b) = async_std::channel::bounded::<u16>(1);

    async_std::task::spawn(async move {
        async_std::task::sleep(Duration::from_millis(10)).await;
        tx_b.send(443).await.unwrap();
    });

    let mut a = None;
    let mut b = None;
    let res = (Target::new(rx_a, &mut a), Target::new(rx_b, &mut b))
        .race_any()
        .await;
    assert_eq!(res, Ok(1));
    assert_eq!((a, b), (None, Some(443)));
    drop(tx_a);
}

#[async_std::test]
async fn async_std_aggregate_tuple() {
    let (tx_a, rx_a) = async_std::channel::unbounded::<u32>();
    let (tx_b, rx_b) = async_std::channel::unbounded::<u32>();

    for n in 0..10 {
        tx_a.send(n).await.unwrap();
        tx_b.send(n * 100).await.unwrap();
    }
    drop(tx_a);
    drop(tx_b);

    let total: u32 = (rx_a, rx_b).aggregate().fold(0, |acc, n| async move { acc + n }).await;
    assert_eq!(total, 45 + 4500);
}
