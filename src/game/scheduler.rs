use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// The single recurring game timer.
///
/// Holds at most one interval. `start` replaces the previous one, so two tick
/// streams can never advance the same game.
pub struct TickScheduler {
    period: Duration,
    interval: Option<Interval>,
}

impl TickScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    /// (Re)arm the timer; the first tick fires one period from now
    pub fn start(&mut self) {
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.interval = Some(interval);
    }

    pub fn cancel(&mut self) {
        self.interval = None;
    }

    pub fn is_active(&self) -> bool {
        self.interval.is_some()
    }

    /// Resolves on the next tick; never resolves while cancelled
    pub async fn next_tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
