// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Prometheus gauges describing the most recent probe.
//!
//! | Metric | Type | Description |
//! |--------|------|-------------|
//! | `slt_state` | Gauge | 1 if the last probe confirmed propagation, 0 otherwise |
//! | `slt_duration` | Gauge | Seconds from mutation start to the end of the last probe |

use crate::constants::metrics::{DURATION, STATE};
use crate::error::{Result, SltError};
use crate::probe::ProbeOutcome;
use prometheus::{Encoder, Gauge, Opts, Registry, TextEncoder};

/// Registry and gauges shared by the scheduler (writer) and the HTTP server (reader).
///
/// Gauge updates are atomic, scrapes never see a torn value.
#[derive(Clone)]
pub struct SltMetrics {
    registry: Registry,
    state: Gauge,
    duration: Gauge,
}

impl SltMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let state = Gauge::with_opts(Opts::new(
            STATE,
            "Outcome of the last service level test: 1 when the tag change reached the registry API, 0 otherwise",
        ))?;
        registry.register(Box::new(state.clone()))?;

        let duration = Gauge::with_opts(Opts::new(
            DURATION,
            "Duration in seconds of the last service level test",
        ))?;
        registry.register(Box::new(duration.clone()))?;

        Ok(Self {
            registry,
            state,
            duration,
        })
    }

    pub fn record(&self, outcome: &ProbeOutcome) {
        self.state.set(outcome.status.as_gauge());
        self.duration.set(outcome.duration.as_secs_f64());
    }

    pub fn state(&self) -> f64 {
        self.state.get()
    }

    pub fn duration(&self) -> f64 {
        self.duration.get()
    }

    /// Render every registered metric in the Prometheus text exposition format
    pub fn encode_text(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| SltError::Internal(format!("metrics output is not UTF-8: {}", e)))
    }

    pub fn content_type(&self) -> &'static str {
        prometheus::TEXT_FORMAT
    }
}
