//! Wall-clock timing of the analysis stages, reported alongside results.
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Timing entry describing a single stage of the analysis.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Aggregated timing trace for one analysis call.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }

    /// Record the time since `start` under `label` and return a fresh mark.
    pub fn lap(&mut self, label: impl Into<String>, start: Instant) -> Instant {
        self.push(label, elapsed_ms(start));
        Instant::now()
    }
}

#[inline]
pub fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laps_are_recorded_in_order() {
        let mut timings = TimingBreakdown::default();
        let mark = timings.lap("first", Instant::now());
        timings.lap("second", mark);
        let labels: Vec<_> = timings.stages.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["first", "second"]);
        assert!(timings.stages.iter().all(|s| s.elapsed_ms >= 0.0));
    }
}
