use crate::scanner::DealScanner;
use crate::types::TickOutcome;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{info, warn};

/// Source of scan ticks. Returning `false` ends the run loop.
#[async_trait]
pub trait Ticker: Send {
    async fn tick(&mut self) -> bool;
}

/// Wall-clock ticker. The first tick fires immediately so a pass runs at startup.
pub struct IntervalTicker {
    inner: Interval,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        let mut inner = interval(period);
        // A pass that overruns the period pushes the next tick back instead of bunching ticks up.
        inner.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { inner }
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) -> bool {
        self.inner.tick().await;
        true
    }
}

/// Fires a fixed number of ticks back to back, then stops.
pub struct CountedTicker {
    remaining: usize,
}

impl CountedTicker {
    pub fn new(ticks: usize) -> Self {
        Self { remaining: ticks }
    }
}

#[async_trait]
impl Ticker for CountedTicker {
    async fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

/// Runs one pass per tick. Passes are awaited in line, so two never overlap.
/// Returns the number of ticks processed.
pub async fn run<T: Ticker>(scanner: Arc<DealScanner>, mut ticker: T) -> u64 {
    let mut ticks = 0u64;
    while ticker.tick().await {
        ticks += 1;
        match scanner.run_tick().await {
            TickOutcome::Completed(report) => {
                info!("Tick {} done: {} notification(s)", ticks, report.notifications_sent)
            }
            TickOutcome::Aborted(reason) => warn!("Tick {} aborted: {}", ticks, reason),
        }
    }
    ticks
}
