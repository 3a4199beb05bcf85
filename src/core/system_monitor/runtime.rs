//! Tokio runtime hosting the periodic timers.
//!
//! Each timer is an interval task on a shared two-worker runtime. The tick
//! body runs with `block_in_place`, so sensor queries never stall the other
//! timer, and a tick that is already running always completes: stopping a
//! timer only prevents the next tick.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::error::{Result, UsagePinError};

/// Background timer facility
pub struct Scheduler {
    runtime: tokio::runtime::Runtime,
    active: Arc<AtomicUsize>,
}

impl Scheduler {
    pub fn new() -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_time()
            .thread_name("usagepin-timer")
            .build()
            .map_err(|e| UsagePinError::scheduler(format!("Failed to start runtime: {}", e)))?;

        Ok(Self {
            runtime,
            active: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Run `tick` every `period`, first firing one period from now.
    pub fn every<F>(&self, name: &'static str, period: Duration, mut tick: F) -> PeriodicTimer
    where
        F: FnMut() + Send + 'static,
    {
        let task = self.runtime.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                tokio::task::block_in_place(&mut tick);
            }
        });

        self.active.fetch_add(1, Ordering::SeqCst);
        log::debug!("Timer '{}' started ({:?})", name, period);

        PeriodicTimer {
            name,
            task: Some(task),
            active: Arc::clone(&self.active),
        }
    }

    /// Number of timers started and not yet stopped
    pub fn active_timers(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

/// Handle to a running periodic timer. Dropping it stops the timer.
pub struct PeriodicTimer {
    name: &'static str,
    task: Option<JoinHandle<()>>,
    active: Arc<AtomicUsize>,
}

impl PeriodicTimer {
    /// Stop the timer. Returns `false` if it was already stopped.
    pub fn stop(&mut self) -> bool {
        match self.task.take() {
            Some(task) => {
                task.abort();
                self.active.fetch_sub(1, Ordering::SeqCst);
                log::debug!("Timer '{}' stopped", self.name);
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for PeriodicTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    #[test]
    fn test_timer_fires_and_stops() {
        let scheduler = Scheduler::new().unwrap();
        let ticks = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&ticks);

        let mut timer = scheduler.every("test", Duration::from_millis(10), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(scheduler.active_timers(), 1);

        std::thread::sleep(Duration::from_millis(200));
        assert!(ticks.load(Ordering::SeqCst) >= 1);

        assert!(timer.stop());
        assert!(!timer.stop());
        assert!(!timer.is_running());
        assert_eq!(scheduler.active_timers(), 0);

        // Let an in-flight tick finish, then make sure nothing else fires
        std::thread::sleep(Duration::from_millis(30));
        let after_stop = ticks.load(Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(60));
        assert_eq!(ticks.load(Ordering::SeqCst), after_stop);
    }

    #[test]
    fn test_drop_stops_timer() {
        let scheduler = Scheduler::new().unwrap();
        {
            let _a = scheduler.every("a", Duration::from_secs(60), || {});
            let _b = scheduler.every("b", Duration::from_secs(60), || {});
            assert_eq!(scheduler.active_timers(), 2);
        }
        assert_eq!(scheduler.active_timers(), 0);
    }
}
