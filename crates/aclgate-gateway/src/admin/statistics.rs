use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use aclgate_core::error::Result;
use aclgate_core::protocol::{Stat, StatDelta, StatSnapshot};

use super::sink::StreamSink;
use crate::bus::SubscriptionGuard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AggregatorState {
    Accumulating,
    Flushing,
}

/// Per-subscriber windowed counter.
///
/// Deltas received between two ticks are summed; each tick emits the window
/// and starts a fresh one. The first tick fires one full period after `run`.
pub struct StatAggregator {
    guard: SubscriptionGuard,
    rx: mpsc::Receiver<StatDelta>,
    period: Duration,
    shutdown: CancellationToken,
    state: AggregatorState,
    window: Stat,
}

impl StatAggregator {
    pub(crate) fn new(
        guard: SubscriptionGuard,
        rx: mpsc::Receiver<StatDelta>,
        period: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            guard,
            rx,
            period,
            shutdown,
            state: AggregatorState::Accumulating,
            window: Stat::default(),
        }
    }

    pub fn id(&self) -> u64 {
        self.guard.id()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Drive the window until shutdown (`Ok`) or a failed write (`Err`).
    pub async fn run<S: StreamSink<StatSnapshot>>(mut self, mut sink: S) -> Result<()> {
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            // tick before intake: a saturated channel must not hold back a flush
            tokio::select! {
                biased;

                _ = self.shutdown.cancelled() => return Ok(()),

                _ = ticker.tick() => {
                    self.flush(&mut sink).await?;
                }

                maybe = self.rx.recv() => {
                    let Some(delta) = maybe else { return Ok(()) };
                    self.window.merge(&delta);
                }
            }
        }
    }

    fn transition(&mut self, next: AggregatorState) {
        tracing::trace!(
            subscriber = self.guard.id(),
            from = ?self.state,
            to = ?next,
            "aggregator state"
        );
        self.state = next;
    }

    async fn flush<S: StreamSink<StatSnapshot>>(&mut self, sink: &mut S) -> Result<()> {
        self.transition(AggregatorState::Flushing);
        let snapshot = self.window.take_snapshot();
        tracing::debug!(
            subscriber = self.guard.id(),
            methods = snapshot.by_method.len(),
            consumers = snapshot.by_consumer.len(),
            "stat window flushed"
        );
        if let Err(e) = sink.send(snapshot).await {
            tracing::warn!(
                subscriber = self.guard.id(),
                error = %e,
                "stat stream delivery failed"
            );
            return Err(e);
        }
        self.transition(AggregatorState::Accumulating);
        Ok(())
    }
}
