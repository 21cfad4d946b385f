//! Runs a [`CelebrationPlan`] against an effects sink.
//!
//! The caller owns the returned [`CelebrationHandle`]; cancelling it stops
//! pending bursts and clears whatever the sink has on screen. Nothing is
//! stored globally, so closing a card simply drops or cancels its handle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::info;

use super::burst::{BurstSpec, CelebrationPlan};

/// External particle renderer.
pub trait Effects: Send + Sync + 'static {
    fn burst(&self, spec: &BurstSpec);

    /// Clear every particle currently on screen.
    fn reset(&self);
}

pub struct CelebrationHandle {
    cancelled: Arc<AtomicBool>,
    task: JoinHandle<()>,
    effects: Arc<dyn Effects>,
}

impl std::fmt::Debug for CelebrationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CelebrationHandle")
            .field("cancelled", &self.is_cancelled())
            .field("finished", &self.is_finished())
            .finish()
    }
}

impl CelebrationHandle {
    /// Stop the celebration and reset the sink. Later calls do nothing.
    pub fn cancel(&self) {
        if self.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }
        self.task.abort();
        self.effects.reset();
        info!("celebration cancelled");
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// True once every burst of the plan has fired or it was cancelled.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for CelebrationHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Start firing `plan` on `effects`. Must be called from within a tokio
/// runtime.
pub fn start_celebration<R>(
    plan: CelebrationPlan,
    effects: Arc<dyn Effects>,
    mut rng: R,
) -> CelebrationHandle
where
    R: Rng + Send + 'static,
{
    let cancelled = Arc::new(AtomicBool::new(false));
    info!(trigger = ?plan.trigger, "celebration started");

    let flag = Arc::clone(&cancelled);
    let sink = Arc::clone(&effects);
    let task = tokio::spawn(async move {
        let start = Instant::now();
        let CelebrationPlan { bursts, stream, .. } = plan;

        let one_shots = async {
            let mut bursts = bursts;
            bursts.sort_by_key(|b| b.delay);
            for scheduled in bursts {
                tokio::time::sleep_until(start + scheduled.delay).await;
                if flag.load(Ordering::SeqCst) {
                    return;
                }
                sink.burst(&scheduled.burst);
            }
        };

        let repeating = async {
            let Some(stream) = stream else {
                return;
            };
            let period = stream.period.max(Duration::from_millis(1));
            let mut ticker = tokio::time::interval_at(start + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if flag.load(Ordering::SeqCst) {
                    return;
                }
                let bursts = stream.bursts_at(start.elapsed(), &mut rng);
                if bursts.is_empty() {
                    return;
                }
                for burst in &bursts {
                    sink.burst(burst);
                }
            }
        };

        tokio::join!(one_shots, repeating);
    });

    CelebrationHandle {
        cancelled,
        task,
        effects,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::celebration::Trigger;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct Recording {
        bursts: Mutex<Vec<BurstSpec>>,
        resets: Mutex<u32>,
    }

    impl Effects for Recording {
        fn burst(&self, spec: &BurstSpec) {
            self.bursts.lock().unwrap().push(spec.clone());
        }

        fn reset(&self) {
            *self.resets.lock().unwrap() += 1;
        }
    }

    impl Recording {
        fn count(&self) -> usize {
            self.bursts.lock().unwrap().len()
        }
    }

    fn run(trigger: Trigger, effects: &Arc<Recording>) -> CelebrationHandle {
        let sink: Arc<dyn Effects> = effects.clone();
        start_celebration(
            CelebrationPlan::for_trigger(trigger),
            sink,
            StdRng::seed_from_u64(1),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn ordinary_card_fires_once() {
        let effects = Arc::new(Recording::default());
        let handle = run(Trigger::CardOpened { finale: false }, &effects);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(effects.count(), 1);
        assert!(handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn finale_card_streams_for_three_seconds() {
        let effects = Arc::new(Recording::default());
        let handle = run(Trigger::CardOpened { finale: true }, &effects);
        tokio::time::sleep(Duration::from_secs(5)).await;

        // Ticks at 250ms..=2750ms, two bursts each.
        assert_eq!(effects.count(), 22);
        let bursts = effects.bursts.lock().unwrap();
        assert!(bursts.first().unwrap().particle_count > bursts.last().unwrap().particle_count);
        drop(bursts);
        assert!(handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn acceptance_runs_until_cancelled() {
        let effects = Arc::new(Recording::default());
        let handle = run(Trigger::ProposalAccepted, &effects);
        tokio::time::sleep(Duration::from_millis(1_000)).await;

        // Three hearts plus stream ticks at 400ms and 800ms.
        assert_eq!(effects.count(), 3 + 4);
        assert!(!handle.is_finished());

        handle.cancel();
        handle.cancel();
        assert_eq!(*effects.resets.lock().unwrap(), 1);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(effects.count(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_resets_effects() {
        let effects = Arc::new(Recording::default());
        drop(run(Trigger::ProposalAccepted, &effects));
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(effects.count(), 0);
        assert_eq!(*effects.resets.lock().unwrap(), 1);
    }
}
