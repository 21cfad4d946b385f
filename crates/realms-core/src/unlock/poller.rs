//! Recurring re-evaluation driver.
//!
//! The poller evaluates once immediately, then once per interval on a tokio
//! timer. Each tick recomputes the whole [`UnlockState`]; timer drift only
//! affects how smoothly the countdown refreshes, never when a card unlocks,
//! so ticks are not compensated.
//!
//! ## Usage
//!
//! ```ignore
//! let handle = start_polling(schedule, Duration::from_secs(1), SystemClock, |state| {
//!     render(&state);
//! });
//! // later
//! handle.cancel();
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Local, TimeZone};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::engine::{evaluate, UnlockState};
use crate::milestone::Schedule;

/// Source of "now" for the poller.
pub trait Clock: Send + Sync + 'static {
    type Zone: TimeZone;

    fn now(&self) -> DateTime<Self::Zone>;
}

/// The machine's wall clock in its local zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Zone = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<FixedOffset>>>,
}

impl ManualClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn set(&self, now: DateTime<FixedOffset>) {
        if let Ok(mut guard) = self.now.lock() {
            *guard = now;
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        if let Ok(mut guard) = self.now.lock() {
            *guard += by;
        }
    }
}

impl Clock for ManualClock {
    type Zone = FixedOffset;

    fn now(&self) -> DateTime<FixedOffset> {
        match self.now.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// Cancels a running poller.
///
/// Cancelling is idempotent. Dropping the handle cancels as well, so the
/// caller must keep it alive for as long as updates are wanted.
#[derive(Debug)]
pub struct PollHandle {
    cancelled: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn cancel(&self) {
        if self.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }
        self.task.abort();
        info!("unlock poller cancelled");
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Evaluate `schedule` now and on every `interval` until the handle is
/// cancelled, passing each fresh state to `on_update`.
///
/// The first evaluation runs synchronously before this returns. Must be
/// called from within a tokio runtime.
pub fn start_polling<C, F>(
    schedule: Schedule,
    interval: Duration,
    clock: C,
    mut on_update: F,
) -> PollHandle
where
    C: Clock,
    F: FnMut(UnlockState) + Send + 'static,
{
    let interval = interval.max(Duration::from_millis(1));
    let cancelled = Arc::new(AtomicBool::new(false));

    on_update(evaluate(&schedule, &clock.now()));
    info!(
        milestones = schedule.len(),
        interval_ms = interval.as_millis() as u64,
        "unlock poller started"
    );

    let flag = Arc::clone(&cancelled);
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; that evaluation already ran.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if flag.load(Ordering::SeqCst) {
                break;
            }
            let state = evaluate(&schedule, &clock.now());
            debug!(
                unlocked = state.unlocked.len(),
                locked = state.countdowns.len(),
                "unlock tick"
            );
            on_update(state);
        }
    });

    PollHandle { cancelled, task }
}
