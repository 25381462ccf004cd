//! Bounded rolling window of decisions with exact percentile math.
//!
//! Percentiles are recomputed from the current window on every read - never
//! an exponentially-decayed approximation - so reported numbers can be
//! audited against the raw entries.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::decision::Decision;

/// Snapshot of window-derived statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowStats {
    /// Decisions currently in the window
    pub count: usize,
    /// Events per second over the window's time span
    pub throughput: f64,
    pub p50_latency_ms: u64,
    pub p95_latency_ms: u64,
    /// CERTIFIED verdicts over total, 0.0-1.0
    pub certified_rate: f64,
}

/// Append/evict-only FIFO of the most recent decisions.
#[derive(Debug, Clone)]
pub struct DecisionWindow {
    cap: usize,
    decisions: VecDeque<Decision>,
}

impl DecisionWindow {
    /// Observed default window size
    pub const DEFAULT_CAP: usize = 100;

    pub fn new(cap: usize) -> Self {
        Self {
            cap: cap.max(1),
            decisions: VecDeque::with_capacity(cap.max(1)),
        }
    }

    /// Append a decision, evicting the oldest entry when full
    pub fn push(&mut self, decision: Decision) {
        if self.decisions.len() == self.cap {
            self.decisions.pop_front();
        }
        self.decisions.push_back(decision);
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Decision> {
        self.decisions.iter()
    }

    /// Exact nearest-rank percentile of latencies in the window.
    /// `p` is in 0-100; returns 0 for an empty window.
    pub fn latency_percentile(&self, p: f64) -> u64 {
        if self.decisions.is_empty() {
            return 0;
        }
        let mut latencies: Vec<u64> = self.decisions.iter().map(|d| d.latency_ms).collect();
        latencies.sort_unstable();

        let n = latencies.len();
        let rank = ((p / 100.0) * n as f64).ceil() as usize;
        latencies[rank.clamp(1, n) - 1]
    }

    /// Fraction of decisions in the window that reached CERTIFIED
    pub fn certified_rate(&self) -> f64 {
        if self.decisions.is_empty() {
            return 0.0;
        }
        let certified = self.decisions.iter().filter(|d| d.is_certified()).count();
        certified as f64 / self.decisions.len() as f64
    }

    /// Events per second over the window's observed time span
    pub fn throughput(&self) -> f64 {
        if self.decisions.len() < 2 {
            return 0.0;
        }
        let first = self.decisions.front().map(|d| d.timestamp).unwrap_or(0);
        let last = self.decisions.back().map(|d| d.timestamp).unwrap_or(0);
        let span_ms = last.saturating_sub(first);
        if span_ms == 0 {
            return 0.0;
        }
        (self.decisions.len() - 1) as f64 * 1000.0 / span_ms as f64
    }

    /// Compute all statistics from the current window contents
    pub fn stats(&self) -> WindowStats {
        WindowStats {
            count: self.len(),
            throughput: self.throughput(),
            p50_latency_ms: self.latency_percentile(50.0),
            p95_latency_ms: self.latency_percentile(95.0),
            certified_rate: self.certified_rate(),
        }
    }
}

impl Default for DecisionWindow {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAP)
    }
}
