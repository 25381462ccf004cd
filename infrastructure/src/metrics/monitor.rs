//! Throughput monitor - shared, thread-safe view over the decision window.
//!
//! Wraps the domain's rolling window with the process-level gauges the
//! window itself does not track: queue depth, error count, and uptime.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use serde::Serialize;

use gavel_domain::{Decision, DecisionWindow, WindowStats};

/// Point-in-time view of the monitor
#[derive(Debug, Clone, Serialize)]
pub struct MonitorSnapshot {
    #[serde(flatten)]
    pub stats: WindowStats,
    /// Runs dispatched but not yet settled
    pub queue_depth: usize,
    /// Runs that failed before producing a result
    pub errors: u64,
    pub uptime_secs: u64,
}

/// Shared recorder for governed decisions.
///
/// All methods take `&self`; one instance is shared behind an `Arc` across
/// every concurrent run.
pub struct ThroughputMonitor {
    window: Mutex<DecisionWindow>,
    queue_depth: AtomicUsize,
    errors: AtomicU64,
    started: Instant,
}

impl ThroughputMonitor {
    pub fn new(window_cap: usize) -> Self {
        Self {
            window: Mutex::new(DecisionWindow::new(window_cap)),
            queue_depth: AtomicUsize::new(0),
            errors: AtomicU64::new(0),
            started: Instant::now(),
        }
    }

    /// Record one settled decision
    pub fn record(&self, decision: Decision) {
        self.window.lock().unwrap().push(decision);
    }

    /// A run was dispatched and is now in flight
    pub fn enqueue(&self) {
        self.queue_depth.fetch_add(1, Ordering::SeqCst);
    }

    /// A run left the in-flight set, successfully or not
    pub fn dequeue(&self) {
        let _ = self
            .queue_depth
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |d| d.checked_sub(1));
    }

    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::SeqCst);
    }

    pub fn queue_depth(&self) -> usize {
        self.queue_depth.load(Ordering::SeqCst)
    }

    pub fn error_count(&self) -> u64 {
        self.errors.load(Ordering::SeqCst)
    }

    /// Window statistics, recomputed from the current entries
    pub fn window_stats(&self) -> WindowStats {
        self.window.lock().unwrap().stats()
    }

    pub fn snapshot(&self) -> MonitorSnapshot {
        MonitorSnapshot {
            stats: self.window_stats(),
            queue_depth: self.queue_depth(),
            errors: self.error_count(),
            uptime_secs: self.started.elapsed().as_secs(),
        }
    }
}

impl Default for ThroughputMonitor {
    fn default() -> Self {
        Self::new(DecisionWindow::DEFAULT_CAP)
    }
}
