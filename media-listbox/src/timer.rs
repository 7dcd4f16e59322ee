//! Typeahead decay timer.
//!
//! The listbox never sleeps. It asks a [`DecayTimer`] to schedule a fire-once
//! callback and the host reports the fired handle back through
//! `Listbox::on_typeahead_timeout`. Scheduling goes through a port so tests can
//! drive time by hand with [`ManualTimer`].

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::TimerError;

/// Identifies one scheduled decay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Schedule/cancel port for fire-once timers.
pub trait DecayTimer {
    /// Schedule a timer that fires once after `delay`.
    fn schedule(&mut self, delay: Duration) -> TimerHandle;

    /// Cancel a pending timer. Cancelling a fired or unknown handle is a no-op.
    fn cancel(&mut self, handle: TimerHandle);
}

// =============================================================================
// ManualTimer
// =============================================================================

/// Deterministic timer driven by [`ManualTimer::advance`].
#[derive(Debug, Default)]
pub struct ManualTimer {
    now: Duration,
    next_id: u64,
    pending: Vec<(TimerHandle, Duration)>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers that have not fired or been cancelled.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Move the clock forward and return the handles that fired, in deadline
    /// order.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerHandle> {
        self.now += by;
        let now = self.now;
        let mut fired: Vec<_> = self
            .pending
            .iter()
            .filter(|(_, deadline)| *deadline <= now)
            .copied()
            .collect();
        fired.sort_by_key(|(_, deadline)| *deadline);
        self.pending.retain(|(_, deadline)| *deadline > now);
        fired.into_iter().map(|(handle, _)| handle).collect()
    }
}

impl DecayTimer for ManualTimer {
    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending.push((handle, self.now + delay));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|(h, _)| *h != handle);
    }
}

// =============================================================================
// TokioDecayTimer
// =============================================================================

/// Timer backed by tokio tasks.
///
/// Each scheduled timer is a task that sleeps and then sends its handle over a
/// channel; cancelling aborts the task. [`TokioDecayTimer::schedule`] must be
/// called from within a tokio runtime.
#[derive(Debug)]
pub struct TokioDecayTimer {
    tx: mpsc::UnboundedSender<TimerHandle>,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
    next_id: u64,
}

/// Receives handles of fired [`TokioDecayTimer`] timers.
#[derive(Debug)]
pub struct FiredTimers {
    rx: mpsc::UnboundedReceiver<TimerHandle>,
}

impl FiredTimers {
    /// Wait for the next fired timer.
    pub async fn recv(&mut self) -> Result<TimerHandle, TimerError> {
        self.rx.recv().await.ok_or(TimerError::Closed)
    }

    /// Next fired timer if one is ready.
    pub fn try_recv(&mut self) -> Option<TimerHandle> {
        self.rx.try_recv().ok()
    }
}

impl TokioDecayTimer {
    /// Create a timer and the receiver of its fired handles.
    pub fn channel() -> (Self, FiredTimers) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                tasks: HashMap::new(),
                next_id: 0,
            },
            FiredTimers { rx },
        )
    }
}

impl DecayTimer for TokioDecayTimer {
    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        self.tasks.retain(|_, task| !task.is_finished());
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver dropped = host shutting down
            let _ = tx.send(handle);
        });
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
        }
    }
}

impl Drop for TokioDecayTimer {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_timer_fires_at_deadline() {
        let mut timer = ManualTimer::new();
        let handle = timer.schedule(Duration::from_millis(500));

        assert!(timer.advance(Duration::from_millis(499)).is_empty());
        assert_eq!(timer.advance(Duration::from_millis(1)), vec![handle]);
        assert_eq!(timer.pending(), 0);
    }

    #[test]
    fn manual_timer_cancel() {
        let mut timer = ManualTimer::new();
        let handle = timer.schedule(Duration::from_millis(10));
        timer.cancel(handle);
        assert!(timer.advance(Duration::from_secs(1)).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_timer_delivers_handle() {
        let (mut timer, mut fired) = TokioDecayTimer::channel();
        let handle = timer.schedule(Duration::from_millis(500));
        assert_eq!(fired.recv().await.unwrap(), handle);
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_timer_cancel_aborts() {
        let (mut timer, mut fired) = TokioDecayTimer::channel();
        let first = timer.schedule(Duration::from_millis(500));
        timer.cancel(first);
        let second = timer.schedule(Duration::from_millis(500));
        assert_eq!(fired.recv().await.unwrap(), second);
        assert!(fired.try_recv().is_none());
    }
}
