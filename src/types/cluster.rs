// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{tag_values, SLT_TAG_KEY};
use kube::CustomResource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "registry.ethos.adobe.com", version = "v1", kind = "Cluster")]
#[kube(namespaced)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSpec {
    /// Unique cluster identifier, also the registry API key
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_server: Option<ApiServer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_provider_region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offering: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub cluster_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiServer {
    pub endpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_authority_data: Option<String>,
}

/// Value the probe tag moves to from its current value.
///
/// Tick and Tack alternate, a missing tag starts at Tick and anything else is left alone.
pub fn next_tag_value(current: Option<&str>) -> String {
    match current {
        None => tag_values::TICK.to_string(),
        Some(tag_values::TICK) => tag_values::TACK.to_string(),
        Some(tag_values::TACK) => tag_values::TICK.to_string(),
        Some(other) => other.to_string(),
    }
}

impl Cluster {
    pub fn slt_tag(&self) -> Option<&str> {
        self.spec
            .tags
            .as_ref()
            .and_then(|t| t.get(SLT_TAG_KEY))
            .map(String::as_str)
    }

    /// Move the probe tag to its next value and return it
    pub fn toggle_slt_tag(&mut self) -> String {
        let next = next_tag_value(self.slt_tag());
        self.spec
            .tags
            .get_or_insert_with(BTreeMap::new)
            .insert(SLT_TAG_KEY.to_string(), next.clone());
        next
    }

    /// Drop server-managed field ownership so the resource can be sent back as a patch
    pub fn clear_managed_fields(&mut self) {
        self.metadata.managed_fields = Some(Vec::new());
    }
}

/// Cluster record as served by the registry API
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegistryCluster {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tags: Option<BTreeMap<String, String>>,
}

impl RegistryCluster {
    pub fn slt_tag(&self) -> Option<&str> {
        self.tags
            .as_ref()
            .and_then(|t| t.get(SLT_TAG_KEY))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ManagedFieldsEntry;
    use kube::api::ObjectMeta;

    fn make_cluster(name: &str, tags: Option<BTreeMap<String, String>>) -> Cluster {
        Cluster {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some("cluster-registry".to_string()),
                ..Default::default()
            },
            spec: ClusterSpec {
                name: name.to_string(),
                tags,
                ..Default::default()
            },
        }
    }

    fn tags(pairs: &[(&str, &str)]) -> Option<BTreeMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_next_tag_value_transitions() {
        assert_eq!(next_tag_value(None), "Tick");
        assert_eq!(next_tag_value(Some("Tick")), "Tack");
        assert_eq!(next_tag_value(Some("Tack")), "Tick");
        assert_eq!(next_tag_value(Some("manual")), "manual");
    }

    #[test]
    fn test_toggle_without_tags_creates_map() {
        let mut cluster = make_cluster("cluster1-va6-prod", None);

        assert_eq!(cluster.toggle_slt_tag(), "Tick");
        assert_eq!(cluster.spec.tags, tags(&[("update-slt", "Tick")]));
    }

    #[test]
    fn test_toggle_tick_to_tack_and_back() {
        let mut cluster = make_cluster("cluster1-va6-prod", tags(&[("update-slt", "Tick")]));

        assert_eq!(cluster.toggle_slt_tag(), "Tack");
        assert_eq!(cluster.slt_tag(), Some("Tack"));
        assert_eq!(cluster.toggle_slt_tag(), "Tick");
        assert_eq!(cluster.slt_tag(), Some("Tick"));
    }

    #[test]
    fn test_toggle_keeps_other_tags() {
        let mut cluster = make_cluster(
            "cluster1-va6-prod",
            tags(&[("onboarding", "on"), ("update-slt", "Tack")]),
        );

        cluster.toggle_slt_tag();

        assert_eq!(
            cluster.spec.tags,
            tags(&[("onboarding", "on"), ("update-slt", "Tick")])
        );
    }

    #[test]
    fn test_toggle_unknown_value_is_unchanged() {
        let mut cluster = make_cluster("cluster1-va6-prod", tags(&[("update-slt", "frozen")]));

        assert_eq!(cluster.toggle_slt_tag(), "frozen");
        assert_eq!(cluster.slt_tag(), Some("frozen"));
    }

    #[test]
    fn test_clear_managed_fields_serializes_empty_list() {
        let mut cluster = make_cluster("cluster1-va6-prod", None);
        cluster.metadata.managed_fields = Some(vec![ManagedFieldsEntry {
            manager: Some("kubectl".to_string()),
            operation: Some("Update".to_string()),
            ..Default::default()
        }]);

        cluster.clear_managed_fields();

        let value = serde_json::to_value(&cluster).unwrap();
        assert_eq!(value["metadata"]["managedFields"], serde_json::json!([]));
    }

    #[test]
    fn test_registry_cluster_decodes_null_tags() {
        let cluster: RegistryCluster =
            serde_json::from_str(r#"{"name":"cluster1-va6-prod","tags":null}"#).unwrap();
        assert_eq!(cluster.slt_tag(), None);

        let cluster: RegistryCluster = serde_json::from_str(
            r#"{"name":"cluster1-va6-prod","region":"va6","tags":{"update-slt":"Tack"}}"#,
        )
        .unwrap();
        assert_eq!(cluster.slt_tag(), Some("Tack"));
    }

    #[test]
    fn test_cluster_spec_round_trips_camel_case_fields() {
        let json = serde_json::json!({
            "apiVersion": "registry.ethos.adobe.com/v1",
            "kind": "Cluster",
            "metadata": {"name": "cluster1-va6-prod", "namespace": "cluster-registry"},
            "spec": {
                "name": "cluster1-va6-prod",
                "shortName": "cluster1va6prod",
                "cloudType": "azure",
                "type": "Dedicated",
                "apiServer": {"endpoint": "https://cluster1.example.com"}
            }
        });

        let cluster: Cluster = serde_json::from_value(json).unwrap();

        assert_eq!(cluster.spec.short_name.as_deref(), Some("cluster1va6prod"));
        assert_eq!(cluster.spec.cluster_type.as_deref(), Some("Dedicated"));
        let back = serde_json::to_value(&cluster).unwrap();
        assert_eq!(back["spec"]["cloudType"], "azure");
        assert!(back["spec"].get("tags").is_none());
    }
}
