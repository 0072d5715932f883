// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Registry API verifier: confirms a tag change reached the API database

use crate::constants::{MAX_ERROR_BODY_LEN, SLT_TAG_KEY};
use crate::error::{truncate_body, Result, SltError};
use crate::types::cluster::RegistryCluster;
use reqwest::StatusCode;
use std::future::Future;
use tracing::{debug, instrument};
use url::Url;

/// Checks that the registry API reports the expected probe tag for a cluster
pub trait TagVerifier {
    fn verify(
        &self,
        token: &str,
        cluster_name: &str,
        expected_tag_value: &str,
    ) -> impl Future<Output = Result<()>> + Send;
}

#[derive(Clone)]
pub struct RegistryClient {
    http: reqwest::Client,
    api_url: Url,
}

impl RegistryClient {
    pub fn new(http: reqwest::Client, api_url: Url) -> Self {
        Self { http, api_url }
    }

    /// `{api_url}/api/v1/clusters/{cluster_name}`
    pub fn cluster_url(&self, cluster_name: &str) -> Result<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| SltError::Config(format!("API URL {} cannot be a base URL", self.api_url)))?
            .pop_if_empty()
            .extend(["api", "v1", "clusters", cluster_name]);
        Ok(url)
    }
}

impl TagVerifier for RegistryClient {
    #[instrument(skip(self, token))]
    async fn verify(&self, token: &str, cluster_name: &str, expected_tag_value: &str) -> Result<()> {
        let url = self.cluster_url(cluster_name)?;
        let response = self.http.get(url.clone()).bearer_auth(token).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await?;
            return Err(SltError::Api(format!(
                "GET {} returned {}: {}",
                url,
                status,
                truncate_body(&body, MAX_ERROR_BODY_LEN)
            )));
        }

        let body = response.bytes().await?;
        let cluster: RegistryCluster = serde_json::from_slice(&body).map_err(|e| {
            SltError::Internal(format!("decoding cluster {} from {}: {}", cluster_name, url, e))
        })?;

        if cluster.tags.is_none() {
            return Err(SltError::Api(format!(
                "cluster {} has no tags, expected {}={}",
                cluster_name, SLT_TAG_KEY, expected_tag_value
            )));
        }

        match cluster.slt_tag() {
            Some(actual) if actual == expected_tag_value => {
                debug!("Cluster {} carries {}={}", cluster_name, SLT_TAG_KEY, actual);
                Ok(())
            }
            actual => Err(SltError::Api(format!(
                "cluster {} has {}={:?}, expected {}",
                cluster_name, SLT_TAG_KEY, actual, expected_tag_value
            ))),
        }
    }
}
