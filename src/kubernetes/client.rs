// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes client creation from the ambient environment or an explicit kubeconfig

use crate::error::{Result, SltError};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::Client;
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};

/// Create a client from `kubeconfig` when given, otherwise from the in-cluster service account.
///
/// Every request made through the client is bounded by `request_timeout`.
#[instrument]
pub async fn create_client(kubeconfig: Option<&Path>, request_timeout: Duration) -> Result<Client> {
    let config = match kubeconfig {
        Some(path) => {
            info!("Creating Kubernetes client from kubeconfig {}", path.display());
            let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
                SltError::Config(format!(
                    "Failed to read kubeconfig {}: {}",
                    path.display(),
                    e
                ))
            })?;
            config_from_kubeconfig(&contents).await?
        }
        None => {
            info!("Creating Kubernetes client from the ambient environment");
            kube::Config::infer()
                .await
                .map_err(|e| SltError::Config(format!("Failed to infer cluster credentials: {}", e)))?
        }
    };

    Client::try_from(with_request_timeout(config, request_timeout))
        .map_err(|e| SltError::kube("creating client", e))
}

/// Build a client configuration from a kubeconfig string
async fn config_from_kubeconfig(kubeconfig: &str) -> Result<kube::Config> {
    let kubeconfig_parsed: Kubeconfig = serde_yaml::from_str(kubeconfig)
        .map_err(|e| SltError::Config(format!("Failed to parse kubeconfig: {}", e)))?;

    kube::Config::from_custom_kubeconfig(kubeconfig_parsed, &KubeConfigOptions::default())
        .await
        .map_err(|e| SltError::Config(format!("Failed to create config: {}", e)))
}

fn with_request_timeout(mut config: kube::Config, timeout: Duration) -> kube::Config {
    config.connect_timeout = Some(timeout);
    config.read_timeout = Some(timeout);
    config.write_timeout = Some(timeout);
    config
}
