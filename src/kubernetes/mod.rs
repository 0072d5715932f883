// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes client creation and the Cluster resource mutator.

pub mod client;
pub mod mutator;

pub use client::create_client;
pub use mutator::{ClusterMutator, Mutation};
