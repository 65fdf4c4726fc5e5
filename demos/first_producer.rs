//! Three producers emit values of different types at different rates. The
//! first value to arrive wins, and every producer is then told to stop.
//!
//! Run with `RUST_LOG=trace` to see the race events.

use std::time::Duration;

use channel_race::cancel::CancelToken;
use channel_race::prelude::*;
use channel_race::receive::Target;
use futures::channel::mpsc;
use futures::SinkExt;
use tokio::time::sleep;
use tracing_subscriber::EnvFilter;

async fn produce<T: Clone>(
    name: &'static str,
    mut tx: mpsc::Sender<T>,
    value: T,
    every: Duration,
    token: CancelToken,
) {
    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = sleep(every) => {}
        }
        tokio::select! {
            _ = token.cancelled() => break,
            res = tx.send(value.clone()) => if res.is_err() { break },
        }
    }
    tracing::info!(producer = name, "stopped");
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let token = CancelToken::new();
    let (words_tx, mut words) = mpsc::channel::<String>(0);
    let (numbers_tx, mut numbers) = mpsc::channel::<i32>(0);
    let (floats_tx, mut floats) = mpsc::channel::<f64>(0);

    let producers = [
        tokio::spawn(produce(
            "words",
            words_tx,
            "1".to_string(),
            Duration::from_millis(300),
            token.clone(),
        )),
        tokio::spawn(produce(
            "numbers",
            numbers_tx,
            2,
            Duration::from_millis(400),
            token.clone(),
        )),
        tokio::spawn(produce(
            "floats",
            floats_tx,
            3.0,
            Duration::from_millis(200),
            token.clone(),
        )),
    ];

    let (mut word, mut number, mut float) = (None, None, None);
    let winner = (
        Target::new(&mut words, &mut word),
        Target::new(&mut numbers, &mut number),
        Target::new(&mut floats, &mut float),
    )
        .await_first(token)
        .await;

    match winner {
        Ok(0) => println!("first: word {:?}", word),
        Ok(1) => println!("first: number {:?}", number),
        Ok(_) => println!("first: float {:?}", float),
        Err(err) => println!("no winner: {err}"),
    }

    for producer in producers {
        let _ = producer.await;
    }
}
