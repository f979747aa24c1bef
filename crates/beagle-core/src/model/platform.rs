// ── Game platform domain types ──

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Resource;
use super::common::null_as_default;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlatformStatus {
    Active,
    Maintenance,
    Inactive,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A downloadable artifact the platform image needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformFile {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub file_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

/// An execution environment (Steam, Lutris, an emulator, ...) that game
/// instances run inside.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Platform {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub platform_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub os: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: PlatformStatus,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Container image the platform runs from.
    #[serde(deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bin: String,
    #[serde(deserialize_with = "null_as_default")]
    pub files: Vec<PlatformFile>,
    #[serde(deserialize_with = "null_as_default")]
    pub features: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub config: BTreeMap<String, String>,
    #[serde(alias = "created_at")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(alias = "updated_at")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Platform {
    const KIND: &'static str = "platform";
    const PATH: &'static str = "platforms";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "description", "type", "os"];

    fn id(&self) -> &str {
        &self.id
    }
}
