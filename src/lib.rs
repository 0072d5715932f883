// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod auth;
pub mod config;
pub mod constants;
pub mod error;
pub mod jwks;
pub mod kubernetes;
pub mod metrics;
pub mod probe;
pub mod registry;
pub mod reporter;
pub mod scheduler;
pub mod server;
pub mod types;

#[cfg(test)]
pub mod test_utils;
