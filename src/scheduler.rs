// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Runs probes forever and publishes their outcome through the gauges.

use crate::auth::TokenAcquirer;
use crate::constants::probe::STARTUP_DELAY;
use crate::error::Result;
use crate::metrics::SltMetrics;
use crate::probe::{ProbeDriver, ProbeOutcome, ProbeStatus};
use crate::registry::TagVerifier;
use crate::reporter::FatalReporter;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{error, info, instrument};

pub struct Scheduler<V> {
    tokens: TokenAcquirer,
    driver: ProbeDriver<V>,
    metrics: SltMetrics,
    reporter: Arc<dyn FatalReporter>,
    probe_interval: Duration,
    startup_delay: Duration,
}

impl<V: TagVerifier> Scheduler<V> {
    pub fn new(
        tokens: TokenAcquirer,
        driver: ProbeDriver<V>,
        metrics: SltMetrics,
        reporter: Arc<dyn FatalReporter>,
        probe_interval: Duration,
    ) -> Self {
        Self {
            tokens,
            driver,
            metrics,
            reporter,
            probe_interval,
            startup_delay: STARTUP_DELAY,
        }
    }

    pub fn with_startup_delay(mut self, delay: Duration) -> Self {
        self.startup_delay = delay;
        self
    }

    /// Probe until a token cannot be acquired.
    ///
    /// The only way out is an authentication error, which has already been
    /// handed to the fatal reporter when this returns.
    pub async fn run(self) -> Result<()> {
        sleep(self.startup_delay).await;
        info!(
            "Starting service level tests every {}",
            humantime::format_duration(self.probe_interval)
        );

        loop {
            self.run_once().await?;
            sleep(self.probe_interval).await;
        }
    }

    /// Acquire a token, run one probe and record its outcome
    #[instrument(skip(self))]
    pub async fn run_once(&self) -> Result<ProbeOutcome> {
        let token = match self.tokens.acquire().await {
            Ok(token) => token,
            Err(e) => {
                self.reporter
                    .report(&format!("Error getting jwt token: {}", e));
                return Err(e);
            }
        };

        let started = Instant::now();
        let status = match self.driver.run(&token).await {
            Ok(status) => status,
            Err(e) => {
                error!("Service level test failed: {}", e);
                ProbeStatus::Fail
            }
        };
        let outcome = ProbeOutcome {
            status,
            duration: started.elapsed(),
        };

        self.metrics.record(&outcome);
        info!(
            "Service level test finished: state={} duration={:.3}s",
            outcome.status.as_gauge(),
            outcome.duration.as_secs_f64()
        );
        Ok(outcome)
    }
}
