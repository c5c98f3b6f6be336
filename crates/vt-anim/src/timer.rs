//! `PeriodicTimer` — a cancellable fixed-period schedule.
//!
//! The timer is plain data: an optional next deadline and a period.  It does
//! not spawn anything.  Whoever drives it awaits [`until_deadline`] and then
//! calls [`PeriodicTimer::fire`].  Cancelling is therefore immediate and
//! idempotent, and a period change is a controlled cancel + re-arm.

use std::time::Duration;

use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct PeriodicTimer {
    period:   Duration,
    deadline: Option<Instant>,
}

impl PeriodicTimer {
    /// Create a disarmed timer.
    pub fn new(period: Duration) -> Self {
        Self { period, deadline: None }
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Next firing instant, or `None` when disarmed.
    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Schedule the first firing one period after `now`.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.period);
    }

    /// Disarm.  Returns `true` if the timer was armed.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Change the period.  An armed timer is re-armed from `now`, so the old
    /// schedule has no influence on the next firing.
    pub fn set_period(&mut self, period: Duration, now: Instant) {
        self.period = period;
        if self.is_armed() {
            self.arm(now);
        }
    }

    /// Consume one firing if the deadline has passed.
    ///
    /// The next deadline keeps the fixed cadence (`deadline + period`).  If
    /// the driver fell more than a period behind, missed firings are dropped
    /// and the schedule restarts from `now`.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(due) if due <= now => {
                let next = due + self.period;
                self.deadline = Some(if next > now { next } else { now + self.period });
                true
            }
            _ => false,
        }
    }
}

/// Sleep until `deadline`, or forever when there is none.
///
/// Meant for a `tokio::select!` branch: a disarmed timer simply never wins.
pub async fn until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(d) => tokio::time::sleep_until(d).await,
        None    => std::future::pending().await,
    }
}
