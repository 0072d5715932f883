// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Probe driver: mutate the Cluster resource, then wait for the change to surface in the registry API.

use crate::config::ProbeSettings;
use crate::error::Result;
use crate::kubernetes::ClusterMutator;
use crate::registry::TagVerifier;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, instrument, warn};

/// Verdict of a single probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    Pass,
    Fail,
}

impl ProbeStatus {
    /// Value exported through the `slt_state` gauge
    pub fn as_gauge(self) -> f64 {
        match self {
            ProbeStatus::Pass => 1.0,
            ProbeStatus::Fail => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeOutcome {
    pub status: ProbeStatus,
    pub duration: Duration,
}

pub struct ProbeDriver<V> {
    mutator: ClusterMutator,
    verifier: V,
    settings: ProbeSettings,
}

impl<V: TagVerifier> ProbeDriver<V> {
    pub fn new(mutator: ClusterMutator, verifier: V, settings: ProbeSettings) -> Self {
        Self {
            mutator,
            verifier,
            settings,
        }
    }

    /// Run one probe.
    ///
    /// Mutation errors are returned as errors. Exhausting the verification
    /// attempts is a measured failure and returns `Ok(ProbeStatus::Fail)`.
    #[instrument(skip(self, token))]
    pub async fn run(&self, token: &str) -> Result<ProbeStatus> {
        let mutation = self.mutator.update_crd().await?;

        for attempt in 1..=self.settings.max_tries {
            sleep(self.settings.settle_delay).await;

            match self
                .verifier
                .verify(token, &mutation.cluster_name, &mutation.tag_value)
                .await
            {
                Ok(()) => {
                    info!(
                        "Cluster {} reported {} after {} attempt(s)",
                        mutation.cluster_name, mutation.tag_value, attempt
                    );
                    return Ok(ProbeStatus::Pass);
                }
                Err(e) => {
                    warn!(
                        "Verification attempt {}/{} for cluster {} failed: {}",
                        attempt, self.settings.max_tries, mutation.cluster_name, e
                    );
                }
            }
        }

        warn!(
            "Cluster {} did not report {} after {} attempts",
            mutation.cluster_name, mutation.tag_value, self.settings.max_tries
        );
        Ok(ProbeStatus::Fail)
    }
}
