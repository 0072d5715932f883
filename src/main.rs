// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use registry_slt::auth::TokenAcquirer;
use registry_slt::config::{Config, EnvBinder};
use registry_slt::constants::env as keys;
use registry_slt::kubernetes::{create_client, ClusterMutator};
use registry_slt::metrics::SltMetrics;
use registry_slt::probe::ProbeDriver;
use registry_slt::registry::RegistryClient;
use registry_slt::reporter::{FatalReporter, TerminationLogReporter};
use registry_slt::scheduler::Scheduler;
use registry_slt::server;

fn fatal(reporter: &dyn FatalReporter, message: String) -> ! {
    reporter.report(&message);
    std::process::exit(1)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting cluster registry service level tests");

    if rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .is_err()
    {
        warn!("A rustls crypto provider was already installed");
    }

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            let path = EnvBinder::process()
                .get(keys::TERMINATION_LOG, keys::DEFAULT_TERMINATION_LOG)
                .unwrap_or_else(|_| keys::DEFAULT_TERMINATION_LOG.to_string());
            fatal(&TerminationLogReporter::new(path), format!("Error loading configuration: {}", e))
        }
    };
    let reporter: Arc<dyn FatalReporter> =
        Arc::new(TerminationLogReporter::new(config.termination_log.clone()));
    info!("Configuration loaded: {}", config);

    // Create Kubernetes client
    let client = match create_client(config.kubeconfig.as_deref(), config.request_timeout).await {
        Ok(client) => client,
        Err(e) => fatal(reporter.as_ref(), format!("Error creating Kubernetes client: {}", e)),
    };
    info!("Connected to Kubernetes cluster");

    let http = match reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
    {
        Ok(http) => http,
        Err(e) => fatal(reporter.as_ref(), format!("Error creating HTTP client: {}", e)),
    };

    let metrics = match SltMetrics::new() {
        Ok(metrics) => metrics,
        Err(e) => fatal(reporter.as_ref(), format!("Error registering metrics: {}", e)),
    };

    let scheduler = Scheduler::new(
        TokenAcquirer::from_config(http.clone(), &config),
        ProbeDriver::new(
            ClusterMutator::new(client, config.namespace.clone())
                .with_request_timeout(config.request_timeout),
            RegistryClient::new(http, config.api_url.clone()),
            config.probe,
        ),
        metrics.clone(),
        reporter.clone(),
        config.probe_interval,
    );

    let metrics_server = async {
        server::serve(config.listen_addr, metrics).await.map_err(|e| {
            reporter.report(&format!("Metrics server failed: {}", e));
            e
        })
    };

    // Serve metrics and run probes concurrently; either only returns on a fatal error
    if let Err(e) = tokio::try_join!(metrics_server, scheduler.run()) {
        warn!("Shutting down: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
