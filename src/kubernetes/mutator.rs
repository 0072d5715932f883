// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Flips the probe tag on the registry Cluster resource

use crate::constants::probe::REQUEST_TIMEOUT;
use crate::error::{Result, SltError};
use crate::types::cluster::Cluster;
use std::future::Future;
use std::time::Duration;
use kube::{
    api::{ListParams, Patch, PatchParams},
    Api, Client,
};
use tracing::{info, instrument, warn};

/// Result of a successful mutation: which cluster was patched and the tag value it now carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    pub cluster_name: String,
    pub tag_value: String,
}

#[derive(Clone)]
pub struct ClusterMutator {
    client: Client,
    namespace: String,
    request_timeout: Duration,
}

impl ClusterMutator {
    pub fn new(client: Client, namespace: impl Into<String>) -> Self {
        Self {
            client,
            namespace: namespace.into(),
            request_timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    async fn bounded<T>(
        &self,
        context: String,
        call: impl Future<Output = kube::Result<T>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.request_timeout, call).await {
            Ok(result) => result.map_err(|e| SltError::kube(context, e)),
            Err(_) => Err(SltError::KubeTimeout {
                context,
                after: self.request_timeout,
            }),
        }
    }

    /// Read the namespace's Cluster resource, toggle its probe tag and merge-patch it back.
    #[instrument(skip(self), fields(namespace = %self.namespace))]
    pub async fn update_crd(&self) -> Result<Mutation> {
        let clusters: Api<Cluster> = Api::namespaced(self.client.clone(), &self.namespace);

        let list = self
            .bounded(
                format!("listing clusters in namespace {}", self.namespace),
                clusters.list(&ListParams::default()),
            )
            .await?;

        let count = list.items.len();
        let Some(mut cluster) = list.items.into_iter().next() else {
            return Err(SltError::NoResource(self.namespace.clone()));
        };
        if count > 1 {
            warn!(
                "Expected exactly one Cluster in namespace {}, found {}; using the first",
                self.namespace, count
            );
        }

        let previous = cluster.slt_tag().map(str::to_string);
        let tag_value = cluster.toggle_slt_tag();
        cluster.clear_managed_fields();

        let cluster_name = cluster.spec.name.clone();
        let body = serde_json::to_value(&cluster).map_err(|e| {
            SltError::Internal(format!("encoding cluster {}: {}", cluster_name, e))
        })?;

        self.bounded(
            format!("patching cluster {}", cluster_name),
            clusters.patch(&cluster_name, &PatchParams::default(), &Patch::Merge(&body)),
        )
        .await?;

        info!(
            "Patched cluster {} tag from {:?} to {}",
            cluster_name, previous, tag_value
        );

        Ok(Mutation {
            cluster_name,
            tag_value,
        })
    }
}
