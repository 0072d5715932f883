// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Sinks for errors that end the process

use std::path::PathBuf;
use tracing::{error, warn};

/// Receives the message of an error the process cannot recover from.
///
/// Reporting does not terminate; the caller decides when to exit.
pub trait FatalReporter: Send + Sync {
    fn report(&self, message: &str);
}

/// Writes fatal messages to the log stream only
#[derive(Debug, Default, Clone)]
pub struct StreamReporter;

impl FatalReporter for StreamReporter {
    fn report(&self, message: &str) {
        error!("{}", message);
    }
}

/// Writes fatal messages to the Kubernetes termination log as well as the log stream
#[derive(Debug, Clone)]
pub struct TerminationLogReporter {
    path: PathBuf,
}

impl TerminationLogReporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FatalReporter for TerminationLogReporter {
    fn report(&self, message: &str) {
        if let Err(e) = std::fs::write(&self.path, message) {
            warn!(
                "Failed to write termination log {}: {}",
                self.path.display(),
                e
            );
        }
        error!("{}", message);
    }
}
