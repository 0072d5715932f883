// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SltError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Kubernetes API error while {context}: {source}")]
    Kube {
        context: String,
        #[source]
        source: kube::Error,
    },

    #[error("Kubernetes API did not answer within {after:?} while {context}")]
    KubeTimeout {
        context: String,
        after: std::time::Duration,
    },

    #[error("No Cluster resource found in namespace {0}")]
    NoResource(String),

    #[error("Registry API error: {0}")]
    Api(String),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid certificate: {0}")]
    Certificate(String),
}

impl SltError {
    pub fn kube(context: impl Into<String>, source: kube::Error) -> Self {
        SltError::Kube {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SltError>;

/// Shorten a response body so it can be carried in an error message
pub fn truncate_body(body: &str, max_len: usize) -> String {
    if body.len() <= max_len {
        return body.to_string();
    }
    let mut end = max_len;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... ({} bytes total)", &body[..end], body.len())
}
