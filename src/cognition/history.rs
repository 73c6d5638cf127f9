use std::collections::VecDeque;

use crate::cognition::types::{CognitiveState, LoadTrend};

/// Summary statistics over the retained load history; the recommendation
/// is attached later by the policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadSummary {
    pub current_load: f64,
    pub trend: LoadTrend,
    pub peak: f64,
    pub average: f64,
}

/// Owns the session's load history and the latest cognitive state.
pub struct HistoryTracker {
    capacity: usize,
    trend_window: usize,
    average_window: usize,
    history: VecDeque<f64>,
    state: CognitiveState,
}

impl HistoryTracker {
    pub fn new(capacity: usize, trend_window: usize, average_window: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            trend_window: trend_window.max(2),
            average_window: average_window.max(1),
            history: VecDeque::with_capacity(capacity),
            state: CognitiveState::default(),
        }
    }

    pub fn record(&mut self, load: f64) {
        if self.history.len() >= self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(load.clamp(0.0, 1.0));
    }

    /// Records the state's load and makes it the latest state.
    pub fn record_state(&mut self, state: CognitiveState) {
        self.record(state.cognitive_load);
        self.state = state;
    }

    /// Replaces the latest state without touching the history.
    pub fn replace_state(&mut self, state: CognitiveState) {
        self.state = state;
    }

    pub fn summarize(&self, current: &CognitiveState) -> LoadSummary {
        let current_load = current.cognitive_load;

        let average = if self.history.is_empty() {
            current_load
        } else {
            let n = self.history.len().min(self.average_window);
            self.history.iter().rev().take(n).sum::<f64>() / n as f64
        };

        let peak = self
            .history
            .iter()
            .copied()
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
            .unwrap_or(current_load);

        LoadSummary {
            current_load,
            trend: self.trend(),
            peak,
            average,
        }
    }

    /// Strict monotonicity over the most recent `trend_window` entries.
    pub fn trend(&self) -> LoadTrend {
        if self.history.len() < 2 {
            return LoadTrend::Stable;
        }
        let n = self.history.len().min(self.trend_window);
        let recent: Vec<f64> = self.history.iter().skip(self.history.len() - n).copied().collect();

        if recent.windows(2).all(|w| w[0] < w[1]) {
            LoadTrend::Increasing
        } else if recent.windows(2).all(|w| w[0] > w[1]) {
            LoadTrend::Decreasing
        } else {
            LoadTrend::Stable
        }
    }

    pub fn reset(&mut self, timestamp: i64) {
        self.history.clear();
        self.state = CognitiveState::neutral(timestamp);
    }

    pub fn history(&self) -> &VecDeque<f64> {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn state(&self) -> &CognitiveState {
        &self.state
    }
}

impl Default for HistoryTracker {
    fn default() -> Self {
        Self::new(20, 3, 5)
    }
}
