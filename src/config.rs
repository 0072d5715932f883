// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{env as keys, probe};
use crate::error::{Result, SltError};
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Reads configuration values through a lookup function, enforcing mandatory keys.
///
/// An empty fallback marks the key as mandatory. Empty values are treated as unset.
pub struct EnvBinder<F> {
    lookup: F,
}

impl EnvBinder<fn(&str) -> Option<String>> {
    /// Binder over the process environment
    pub fn process() -> Self {
        fn lookup(key: &str) -> Option<String> {
            std::env::var(key).ok()
        }
        EnvBinder {
            lookup: lookup as fn(&str) -> Option<String>,
        }
    }
}

impl<F> EnvBinder<F>
where
    F: Fn(&str) -> Option<String>,
{
    pub fn new(lookup: F) -> Self {
        Self { lookup }
    }

    pub fn get(&self, key: &str, fallback: &str) -> Result<String> {
        match (self.lookup)(key).filter(|v| !v.is_empty()) {
            Some(value) => Ok(value),
            None if !fallback.is_empty() => Ok(fallback.to_string()),
            None => Err(SltError::Config(format!(
                "{} environment variable not set",
                key
            ))),
        }
    }

    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|v| !v.is_empty())
    }

    fn duration(&self, key: &str, fallback: &str) -> Result<Duration> {
        let raw = self.get(key, fallback)?;
        humantime::parse_duration(&raw)
            .map_err(|e| SltError::Config(format!("{} has invalid duration '{}': {}", key, raw, e)))
    }

    fn url(&self, key: &str, fallback: &str) -> Result<Url> {
        let raw = self.get(key, fallback)?;
        let url = Url::parse(&raw)
            .map_err(|e| SltError::Config(format!("{} has invalid URL '{}': {}", key, raw, e)))?;
        if url.cannot_be_a_base() {
            return Err(SltError::Config(format!(
                "{} must be an absolute http(s) URL, got '{}'",
                key, raw
            )));
        }
        Ok(url)
    }
}

/// Credentials for the OAuth2 client-credentials exchange
#[derive(Clone)]
pub struct OidcCredentials {
    pub resource_id: String,
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for OidcCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OidcCredentials")
            .field("resource_id", &self.resource_id)
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Retry budget for verifying a mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeSettings {
    pub max_tries: u32,
    pub settle_delay: Duration,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            max_tries: probe::MAX_TRIES,
            settle_delay: probe::SETTLE_DELAY,
        }
    }
}

/// Daemon configuration, bound once at startup and read-only afterwards
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the registry API
    pub api_url: Url,
    /// Namespace holding the Cluster resource
    pub namespace: String,
    pub probe_interval: Duration,
    pub oidc: OidcCredentials,
    /// Identity provider base URL, the tenant id is appended to it
    pub authority_host: Url,
    pub listen_addr: SocketAddr,
    /// Deadline for every outbound HTTP request
    pub request_timeout: Duration,
    pub probe: ProbeSettings,
    pub kubeconfig: Option<PathBuf>,
    pub termination_log: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::bind(&EnvBinder::process())
    }

    pub fn bind<F>(env: &EnvBinder<F>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = env.url(keys::URL, keys::DEFAULT_URL)?;
        let namespace = env.get(keys::NAMESPACE, keys::DEFAULT_NAMESPACE)?;
        let probe_interval = env.duration(keys::TIME_BETWEEN_SLT, keys::DEFAULT_TIME_BETWEEN_SLT)?;

        let oidc = OidcCredentials {
            resource_id: env.get(keys::RESOURCE_ID, "")?,
            tenant_id: env.get(keys::TENANT_ID, "")?,
            client_id: env.get(keys::CLIENT_ID, "")?,
            client_secret: env.get(keys::APP_SECRET, "")?,
        };

        let authority_host = env.url(keys::AUTHORITY_HOST, keys::DEFAULT_AUTHORITY_HOST)?;

        let raw_addr = env.get(keys::LISTEN_ADDR, keys::DEFAULT_LISTEN_ADDR)?;
        let listen_addr = raw_addr.parse().map_err(|e| {
            SltError::Config(format!(
                "{} has invalid address '{}': {}",
                keys::LISTEN_ADDR,
                raw_addr,
                e
            ))
        })?;

        let request_timeout = env.duration(keys::REQUEST_TIMEOUT, keys::DEFAULT_REQUEST_TIMEOUT)?;

        let raw_tries = env.get(keys::SLT_MAX_TRIES, keys::DEFAULT_SLT_MAX_TRIES)?;
        let max_tries: u32 = raw_tries.parse().map_err(|e| {
            SltError::Config(format!(
                "{} has invalid value '{}': {}",
                keys::SLT_MAX_TRIES,
                raw_tries,
                e
            ))
        })?;
        if max_tries == 0 {
            return Err(SltError::Config(format!(
                "{} must be at least 1",
                keys::SLT_MAX_TRIES
            )));
        }
        let settle_delay = env.duration(keys::SLT_SETTLE_DELAY, keys::DEFAULT_SLT_SETTLE_DELAY)?;

        let termination_log =
            PathBuf::from(env.get(keys::TERMINATION_LOG, keys::DEFAULT_TERMINATION_LOG)?);

        Ok(Config {
            api_url,
            namespace,
            probe_interval,
            oidc,
            authority_host,
            listen_addr,
            request_timeout,
            probe: ProbeSettings {
                max_tries,
                settle_delay,
            },
            kubeconfig: env.optional(keys::KUBECONFIG).map(PathBuf::from),
            termination_log,
        })
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "url={} namespace={} time_between_slt={} resource_id={} tenant_id={} client_id={} \
             listen_addr={} max_tries={} settle_delay={}",
            self.api_url,
            self.namespace,
            humantime::format_duration(self.probe_interval),
            self.oidc.resource_id,
            self.oidc.tenant_id,
            self.oidc.client_id,
            self.listen_addr,
            self.probe.max_tries,
            humantime::format_duration(self.probe.settle_delay),
        )
    }
}
