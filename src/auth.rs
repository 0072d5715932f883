// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! OAuth2 client-credentials token acquisition

use crate::config::{Config, OidcCredentials};
use crate::constants::MAX_ERROR_BODY_LEN;
use crate::error::{truncate_body, Result, SltError};
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Fetches bearer tokens from the tenant's token endpoint.
///
/// Every call performs a fresh exchange, probes run minutes apart.
#[derive(Clone)]
pub struct TokenAcquirer {
    http: reqwest::Client,
    authority_host: Url,
    credentials: OidcCredentials,
}

impl TokenAcquirer {
    pub fn new(http: reqwest::Client, authority_host: Url, credentials: OidcCredentials) -> Self {
        Self {
            http,
            authority_host,
            credentials,
        }
    }

    pub fn from_config(http: reqwest::Client, config: &Config) -> Self {
        Self::new(http, config.authority_host.clone(), config.oidc.clone())
    }

    /// `{authority_host}/{tenant_id}/oauth2/token`
    pub fn token_endpoint(&self) -> Result<Url> {
        let mut url = self.authority_host.clone();
        url.path_segments_mut()
            .map_err(|_| {
                SltError::Config(format!(
                    "authority host {} cannot be a base URL",
                    self.authority_host
                ))
            })?
            .pop_if_empty()
            .extend([self.credentials.tenant_id.as_str(), "oauth2", "token"]);
        Ok(url)
    }

    #[instrument(skip(self), fields(tenant = %self.credentials.tenant_id, client = %self.credentials.client_id))]
    pub async fn acquire(&self) -> Result<String> {
        let endpoint = self.token_endpoint()?;
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("resource", self.credentials.resource_id.as_str()),
        ];

        let response = self
            .http
            .post(endpoint.clone())
            .form(&form)
            .send()
            .await
            .map_err(|e| SltError::Auth(format!("token endpoint {} unreachable: {}", endpoint, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SltError::Auth(format!(
                "token endpoint returned {}: {}",
                status,
                truncate_body(&body, MAX_ERROR_BODY_LEN)
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SltError::Auth(format!("malformed token response: {}", e)))?;

        debug!("Acquired access token");
        Ok(token.access_token)
    }
}
