// ── Game instance domain types ──

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Resource;
use super::common::null_as_default;

/// Instance lifecycle state.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InstanceStatus {
    Created,
    Starting,
    Running,
    Stopping,
    Stopped,
    Error,
    #[default]
    #[serde(other)]
    Unknown,
}

impl InstanceStatus {
    pub fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    pub fn is_transitional(self) -> bool {
        matches!(self, Self::Starting | Self::Stopping)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstanceConfig {
    #[serde(alias = "max_players", deserialize_with = "null_as_default")]
    pub max_players: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub port: u16,
    /// Game-specific settings (map, difficulty, ...), passed through untouched.
    #[serde(deserialize_with = "null_as_default")]
    pub settings: BTreeMap<String, Value>,
}

/// A card deployed on a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Instance {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(alias = "card_id", alias = "gameCardId", deserialize_with = "null_as_default")]
    pub card_id: String,
    #[serde(alias = "node_id", deserialize_with = "null_as_default")]
    pub node_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: InstanceStatus,
    #[serde(deserialize_with = "null_as_default")]
    pub config: InstanceConfig,
    #[serde(alias = "created_at")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(alias = "updated_at")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(alias = "last_started_at", skip_serializing_if = "Option::is_none")]
    pub last_started_at: Option<DateTime<Utc>>,
    #[serde(alias = "last_stopped_at", skip_serializing_if = "Option::is_none")]
    pub last_stopped_at: Option<DateTime<Utc>>,
}

impl Resource for Instance {
    const KIND: &'static str = "instance";
    const PATH: &'static str = "instances";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "cardId", "nodeId"];

    fn id(&self) -> &str {
        &self.id
    }
}
