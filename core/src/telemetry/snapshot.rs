// ## src/telemetry/snapshot.rs

use std::time::Duration;
use serde::{Serialize, Deserialize};

use crate::telemetry::counters::TelemetryCounters;
use crate::telemetry::timers::{TelemetryTimer, StageTimes, Stage};

/// Immutable per-call telemetry: counters, derived ratios and stage timings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub counters: TelemetryCounters,
    /// Ciphertext bytes per payload byte (0 for an empty payload).
    pub expansion_ratio: f64,
    /// Structural frames over total frames.
    pub overhead_ratio: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn from(counters: &TelemetryCounters, timer: &TelemetryTimer) -> Self {
        let expansion_ratio = if counters.bytes_payload > 0 {
            counters.bytes_ciphertext as f64 / counters.bytes_payload as f64
        } else {
            0.0
        };
        let total = counters.total_frames();
        let overhead_ratio = if total > 0 {
            counters.overhead_frames() as f64 / total as f64
        } else {
            0.0
        };

        Self {
            counters: counters.clone(),
            expansion_ratio,
            overhead_ratio,
            elapsed: timer.elapsed(),
            stage_times: timer.stage_times.clone(),
        }
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    pub fn has_all_stages(&self, expected: &[Stage]) -> bool {
        self.stage_times.has_all(expected)
    }

    /// Internal consistency:
    /// - ciphertext is never shorter than the envelope it seals
    /// - stage times never exceed wall time
    /// - overhead ratio within [0, 1]
    pub fn sanity_check(&self) -> bool {
        self.counters.bytes_ciphertext >= self.counters.bytes_envelope
            && (0.0..=1.0).contains(&self.overhead_ratio)
            && self.total_stage_time() <= self.elapsed
    }
}
