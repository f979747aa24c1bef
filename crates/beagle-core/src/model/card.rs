// ── Game card (catalog entry) domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Resource;
use super::common::null_as_default;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CardStatus {
    Draft,
    Published,
    Archived,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A catalog entry: one game, bound to the platform it runs on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Card {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(alias = "platform_id", deserialize_with = "null_as_default")]
    pub platform_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(alias = "cover", alias = "cover_image", deserialize_with = "null_as_default")]
    pub cover_image: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub status: CardStatus,
    #[serde(alias = "created_at")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(alias = "updated_at")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Card {
    const KIND: &'static str = "card";
    const PATH: &'static str = "cards";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "description", "platformId"];

    fn id(&self) -> &str {
        &self.id
    }
}
