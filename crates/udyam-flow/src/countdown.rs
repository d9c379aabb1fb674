//! # Resend Countdown
//!
//! A cosmetic timer started when a one-time password is sent. It counts
//! down once per tick and only gates the resend action, which is enabled at
//! zero.
//!
//! The ticking runs in a spawned tokio task that publishes the remaining
//! value on a `watch` channel. The task is owned by the [`Countdown`]:
//! dropping it (the identity step is left, the flow restarts) or restarting
//! it aborts the task, so no tick outlives the step that started it.
//! Deadlines are computed from the start instant, so a late poll never
//! stretches the countdown.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::AbortHandle;
use tokio::time::Instant;

/// Seconds on the countdown after a code is sent.
pub const RESEND_COUNTDOWN_SECS: u32 = 30;

/// Interval between decrements.
pub const TICK: Duration = Duration::from_secs(1);

/// The pure counter behind [`Countdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownState {
    remaining: u32,
}

impl CountdownState {
    /// A counter starting at `start`.
    pub fn new(start: u32) -> Self {
        Self { remaining: start }
    }

    /// Units left.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Whether the counter reached zero.
    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// Decrement by one, stopping at zero. Returns the new value.
    pub fn tick(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }
}

/// A running countdown. Aborts its task when dropped.
#[derive(Debug)]
pub struct Countdown {
    start: u32,
    tick: Duration,
    remaining: watch::Receiver<u32>,
    task: AbortHandle,
}

impl Countdown {
    /// Start a countdown from `start` with one-second ticks.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(start: u32) -> Self {
        Self::with_tick(start, TICK)
    }

    /// Start a countdown from `start`, decrementing every `tick`.
    pub fn with_tick(start: u32, tick: Duration) -> Self {
        let (tx, rx) = watch::channel(start);
        let origin = Instant::now();
        let task = tokio::spawn(run(tx, CountdownState::new(start), tick, origin));
        Self {
            start,
            tick,
            remaining: rx,
            task: task.abort_handle(),
        }
    }

    /// Units left.
    pub fn remaining(&self) -> u32 {
        *self.remaining.borrow()
    }

    /// Whether the countdown reached zero.
    pub fn is_finished(&self) -> bool {
        self.remaining() == 0
    }

    /// A receiver that observes every decrement.
    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.remaining.clone()
    }

    /// Abort the current task and start again from the initial value.
    pub fn restart(&mut self) {
        *self = Self::with_tick(self.start, self.tick);
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    tx: watch::Sender<u32>,
    mut state: CountdownState,
    tick: Duration,
    origin: Instant,
) {
    let mut elapsed_ticks: u32 = 0;
    while !state.is_finished() {
        elapsed_ticks += 1;
        tokio::time::sleep_until(origin + tick * elapsed_ticks).await;
        let remaining = state.tick();
        if tx.send(remaining).is_err() {
            break;
        }
    }
    tracing::trace!("countdown finished");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_stops_at_zero() {
        let mut state = CountdownState::new(2);
        assert_eq!(state.tick(), 1);
        assert_eq!(state.tick(), 0);
        assert!(state.is_finished());
        assert_eq!(state.tick(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn decrements_once_per_second_until_zero() {
        let countdown = Countdown::start(RESEND_COUNTDOWN_SECS);
        let started = Instant::now();
        assert_eq!(countdown.remaining(), 30);
        assert!(!countdown.is_finished());

        let mut rx = countdown.subscribe();
        for expected in (0..RESEND_COUNTDOWN_SECS).rev() {
            rx.changed().await.unwrap();
            assert_eq!(*rx.borrow(), expected);
            let elapsed = started.elapsed().as_secs() as u32;
            assert_eq!(elapsed, RESEND_COUNTDOWN_SECS - expected);
        }
        assert!(countdown.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn stays_at_zero() {
        let countdown = Countdown::with_tick(2, Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(countdown.remaining(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_aborts_task() {
        let countdown = Countdown::start(5);
        let mut rx = countdown.subscribe();
        drop(countdown);
        // The sender lives in the aborted task, so the channel closes without a tick.
        assert!(rx.changed().await.is_err());
        assert_eq!(*rx.borrow(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_resets_to_initial_value() {
        let mut countdown = Countdown::with_tick(3, Duration::from_secs(1));
        tokio::time::sleep(Duration::from_millis(3_500)).await;
        assert_eq!(countdown.remaining(), 0);

        countdown.restart();
        assert_eq!(countdown.remaining(), 3);
        tokio::time::sleep(Duration::from_millis(1_500)).await;
        assert_eq!(countdown.remaining(), 2);
    }
}
