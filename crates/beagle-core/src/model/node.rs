// ── Game node domain types ──

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Resource;
use super::common::null_as_default;

/// How the node is provisioned.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NodeType {
    Physical,
    Virtual,
    Container,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Node operational state.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NodeStatus {
    Online,
    Offline,
    Maintenance,
    #[default]
    #[serde(other)]
    Unknown,
}

impl NodeStatus {
    pub fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeNetwork {
    #[serde(deserialize_with = "null_as_default")]
    pub ip: String,
    #[serde(deserialize_with = "null_as_default")]
    pub port: u16,
    #[serde(deserialize_with = "null_as_default")]
    pub protocol: String,
    /// Mbit/s.
    #[serde(deserialize_with = "null_as_default")]
    pub bandwidth: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GpuResource {
    #[serde(deserialize_with = "null_as_default")]
    pub model: String,
    /// MiB.
    #[serde(deserialize_with = "null_as_default")]
    pub memory: u64,
}

/// Provisioned capacity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeResources {
    /// Core count.
    #[serde(deserialize_with = "null_as_default")]
    pub cpu: u32,
    /// MiB.
    #[serde(deserialize_with = "null_as_default")]
    pub memory: u64,
    /// GiB.
    #[serde(deserialize_with = "null_as_default")]
    pub storage: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpu: Option<GpuResource>,
}

/// Utilization snapshot, percentages in `0.0..=100.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeMetrics {
    #[serde(alias = "cpu_usage", deserialize_with = "null_as_default")]
    pub cpu_usage: f64,
    #[serde(alias = "memory_usage", deserialize_with = "null_as_default")]
    pub memory_usage: f64,
    #[serde(alias = "storage_usage", deserialize_with = "null_as_default")]
    pub storage_usage: f64,
    #[serde(alias = "network_usage", deserialize_with = "null_as_default")]
    pub network_usage: f64,
    #[serde(skip_serializing_if = "Option::is_none", alias = "gpu_usage")]
    pub gpu_usage: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub uptime: u64,
    #[serde(alias = "instance_count", deserialize_with = "null_as_default")]
    pub instance_count: u32,
    #[serde(alias = "player_count", deserialize_with = "null_as_default")]
    pub player_count: u32,
}

/// A game node: the device instances are deployed onto.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Node {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub node_type: NodeType,
    #[serde(deserialize_with = "null_as_default")]
    pub status: NodeStatus,
    #[serde(deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(deserialize_with = "null_as_default")]
    pub network: NodeNetwork,
    #[serde(deserialize_with = "null_as_default")]
    pub resources: NodeResources,
    #[serde(deserialize_with = "null_as_default")]
    pub metrics: NodeMetrics,
    #[serde(deserialize_with = "null_as_default")]
    pub labels: BTreeMap<String, String>,
    #[serde(alias = "created_at")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(alias = "updated_at")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Node {
    const KIND: &'static str = "node";
    const PATH: &'static str = "nodes";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "description", "region", "network.ip"];

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_status_does_not_fail() {
        let node: Node = serde_json::from_value(json!({
            "id": "node-9",
            "status": "rebooting",
            "type": "baremetal"
        }))
        .unwrap();
        assert_eq!(node.status, NodeStatus::Unknown);
        assert_eq!(node.node_type, NodeType::Unknown);
    }

    #[test]
    fn snake_case_timestamps_are_accepted() {
        let node: Node = serde_json::from_value(json!({
            "id": "node-1",
            "status": "online",
            "created_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert!(node.status.is_online());
        assert_eq!(
            node.created_at.unwrap().to_rfc3339(),
            "2024-01-01T00:00:00+00:00"
        );
    }

    #[test]
    fn null_fields_read_as_defaults() {
        let node: Node = serde_json::from_value(json!({
            "id": "n1",
            "description": null,
            "labels": null,
            "status": null,
            "resources": { "cpu": null, "gpu": null }
        }))
        .unwrap();
        assert_eq!(node.description, "");
        assert!(node.labels.is_empty());
        assert_eq!(node.status, NodeStatus::Unknown);
        assert_eq!(node.resources.cpu, 0);
        assert!(node.resources.gpu.is_none());
    }

    #[test]
    fn status_displays_lowercase() {
        assert_eq!(NodeStatus::Maintenance.to_string(), "maintenance");
        assert_eq!("offline".parse::<NodeStatus>().unwrap(), NodeStatus::Offline);
    }
}
