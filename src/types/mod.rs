// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resource shapes shared by the Kubernetes mutator and the registry API verifier.

pub mod cluster;

pub use cluster::{next_tag_value, Cluster, ClusterSpec, RegistryCluster};
