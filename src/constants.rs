// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;

/// Tag on the Cluster spec that the probe flips on every run
pub const SLT_TAG_KEY: &str = "update-slt";

/// The two values the probe tag alternates between
pub mod tag_values {
    pub const TICK: &str = "Tick";
    pub const TACK: &str = "Tack";
}

/// Environment variable names and their defaults
pub mod env {
    pub const URL: &str = "URL";
    pub const NAMESPACE: &str = "NAMESPACE";
    pub const TIME_BETWEEN_SLT: &str = "TIME_BETWEEN_SLT";
    pub const RESOURCE_ID: &str = "RESOURCE_ID";
    pub const TENANT_ID: &str = "TENANT_ID";
    pub const CLIENT_ID: &str = "CLIENT_ID";
    pub const APP_SECRET: &str = "APP_SECRET";
    pub const LISTEN_ADDR: &str = "LISTEN_ADDR";
    pub const AUTHORITY_HOST: &str = "AUTHORITY_HOST";
    pub const REQUEST_TIMEOUT: &str = "REQUEST_TIMEOUT";
    pub const SLT_MAX_TRIES: &str = "SLT_MAX_TRIES";
    pub const SLT_SETTLE_DELAY: &str = "SLT_SETTLE_DELAY";
    pub const KUBECONFIG: &str = "KUBECONFIG";
    pub const TERMINATION_LOG: &str = "TERMINATION_LOG";

    pub const DEFAULT_URL: &str = "http://localhost:8080";
    pub const DEFAULT_NAMESPACE: &str = "cluster-registry";
    pub const DEFAULT_TIME_BETWEEN_SLT: &str = "5m";
    pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8081";
    pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";
    pub const DEFAULT_REQUEST_TIMEOUT: &str = "30s";
    pub const DEFAULT_SLT_MAX_TRIES: &str = "3";
    pub const DEFAULT_SLT_SETTLE_DELAY: &str = "11s";
    pub const DEFAULT_TERMINATION_LOG: &str = "/dev/termination-log";
}

/// Probe timing
pub mod probe {
    use super::Duration;

    /// Verification attempts per probe
    pub const MAX_TRIES: u32 = 3;
    /// Observed propagation time from the CRD through the queue into the API database
    pub const SETTLE_DELAY: Duration = Duration::from_secs(11);
    /// Deadline for a single outbound request
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
    /// Gives the HTTP server time to bind before the first probe
    pub const STARTUP_DELAY: Duration = Duration::from_secs(1);
}

/// Prometheus gauge names
pub mod metrics {
    pub const STATE: &str = "slt_state";
    pub const DURATION: &str = "slt_duration";
}

/// Upper bound on response body text carried inside error messages
pub const MAX_ERROR_BODY_LEN: usize = 512;
