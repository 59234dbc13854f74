//! One-second heartbeat for running sessions.
//!
//! The clock is a cancellable tokio task, not a loop inside the session.
//! Every (re)start bumps a generation number carried by each tick, so a
//! tick that was already queued when the clock stopped can be recognised
//! and dropped. A restarted clock waits one full period before its first
//! tick.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::trace;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub generation: u64,
}

pub struct IntervalClock {
    period: Duration,
    tx: mpsc::Sender<Tick>,
    generation: u64,
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl IntervalClock {
    pub fn new(period: Duration) -> (Self, mpsc::Receiver<Tick>) {
        let (tx, rx) = mpsc::channel(8);
        let clock = Self {
            period,
            tx,
            generation: 0,
            handle: None,
            cancel_token: None,
        };
        (clock, rx)
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Generation of the current run. Ticks from earlier runs are stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, tick: Tick) -> bool {
        self.is_running() && tick.generation == self.generation
    }

    /// Start ticking. Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.generation += 1;
        let generation = self.generation;
        let period = self.period;
        let tx = self.tx.clone();
        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();

        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = token_clone.cancelled() => break,
                    _ = interval.tick() => {
                        if tx.send(Tick { generation }).await.is_err() {
                            break;
                        }
                    }
                }
            }
            trace!(generation, "clock stopped");
        });

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
    }

    pub fn stop(&mut self) {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for IntervalClock {
    fn drop(&mut self) {
        self.stop();
    }
}
