// ── Node telemetry (ResourceInfo), both schema generations ──
//
// Current generation splits static specs (`hardware`) from live readings
// (`metrics`). The legacy generation mixes both inside one object per
// component and carries network readings at the top level. Every struct
// defaults missing or null fields to zero / empty so decoding never leaves
// a hole. The Go agents emit snake_case keys, accepted as aliases.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::null_as_default;

// ── Current generation ───────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Unix seconds.
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub hardware: HardwareInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub metrics: MetricsInfo,
}

/// Static hardware specification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HardwareInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub cpu: CpuSpec,
    #[serde(deserialize_with = "null_as_default")]
    pub memory: MemorySpec,
    #[serde(deserialize_with = "null_as_default")]
    pub gpu: GpuSpec,
    #[serde(deserialize_with = "null_as_default")]
    pub storage: StorageSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CpuSpec {
    #[serde(deserialize_with = "null_as_default")]
    pub model: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cores: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub threads: u32,
    /// GHz.
    #[serde(deserialize_with = "null_as_default")]
    pub frequency: f64,
    /// MiB.
    #[serde(deserialize_with = "null_as_default")]
    pub cache: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemorySpec {
    #[serde(deserialize_with = "null_as_default")]
    pub total: f64,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub memory_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub frequency: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub channels: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GpuSpec {
    #[serde(deserialize_with = "null_as_default")]
    pub model: String,
    #[serde(alias = "memory_total", deserialize_with = "null_as_default")]
    pub memory_total: f64,
    #[serde(alias = "cuda_cores", deserialize_with = "null_as_default")]
    pub cuda_cores: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageSpec {
    #[serde(deserialize_with = "null_as_default")]
    pub devices: Vec<StorageDevice>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageDevice {
    #[serde(deserialize_with = "null_as_default")]
    pub model: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub device_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub capacity: f64,
}

/// Live readings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetricsInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub cpu: CpuMetrics,
    #[serde(deserialize_with = "null_as_default")]
    pub memory: MemoryMetrics,
    #[serde(deserialize_with = "null_as_default")]
    pub gpu: GpuMetrics,
    #[serde(deserialize_with = "null_as_default")]
    pub storage: StorageMetrics,
    #[serde(deserialize_with = "null_as_default")]
    pub network: NetworkMetrics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CpuMetrics {
    #[serde(deserialize_with = "null_as_default")]
    pub usage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub temperature: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemoryMetrics {
    #[serde(deserialize_with = "null_as_default")]
    pub available: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub used: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub usage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GpuMetrics {
    #[serde(deserialize_with = "null_as_default")]
    pub usage: f64,
    #[serde(alias = "memory_used", deserialize_with = "null_as_default")]
    pub memory_used: f64,
    #[serde(alias = "memory_free", deserialize_with = "null_as_default")]
    pub memory_free: f64,
    #[serde(alias = "memory_usage", deserialize_with = "null_as_default")]
    pub memory_usage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub temperature: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub power: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageMetrics {
    #[serde(deserialize_with = "null_as_default")]
    pub used: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub free: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub usage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkMetrics {
    #[serde(deserialize_with = "null_as_default")]
    pub bandwidth: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub latency: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub connections: u32,
    #[serde(alias = "packet_loss", deserialize_with = "null_as_default")]
    pub packet_loss: f64,
}

// ── Legacy generation ────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyResourceInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub hardware: LegacyHardware,
    #[serde(deserialize_with = "null_as_default")]
    pub network: LegacyNetwork,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyHardware {
    #[serde(deserialize_with = "null_as_default")]
    pub cpu: LegacyCpu,
    #[serde(deserialize_with = "null_as_default")]
    pub memory: LegacyMemory,
    #[serde(deserialize_with = "null_as_default")]
    pub gpu: LegacyGpu,
    /// Legacy payloads describe at most one disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk: Option<LegacyDisk>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyCpu {
    #[serde(deserialize_with = "null_as_default")]
    pub model: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cores: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub threads: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub frequency: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub cache: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub usage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub temperature: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyMemory {
    #[serde(deserialize_with = "null_as_default")]
    pub total: f64,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub memory_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub frequency: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub channels: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub available: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub used: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub usage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyGpu {
    #[serde(deserialize_with = "null_as_default")]
    pub model: String,
    #[serde(alias = "memory_total", deserialize_with = "null_as_default")]
    pub memory_total: f64,
    #[serde(alias = "cuda_cores", deserialize_with = "null_as_default")]
    pub cuda_cores: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub usage: f64,
    #[serde(alias = "memory_used", deserialize_with = "null_as_default")]
    pub memory_used: f64,
    #[serde(alias = "memory_free", deserialize_with = "null_as_default")]
    pub memory_free: f64,
    #[serde(alias = "memory_usage", deserialize_with = "null_as_default")]
    pub memory_usage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub temperature: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub power: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyDisk {
    #[serde(deserialize_with = "null_as_default")]
    pub model: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub disk_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub capacity: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub used: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub free: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub usage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyNetwork {
    #[serde(deserialize_with = "null_as_default")]
    pub bandwidth: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub latency: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub connections: u32,
    #[serde(alias = "packet_loss", deserialize_with = "null_as_default")]
    pub packet_loss: f64,
}

// ── Payload of unknown generation ────────────────────────────────────

/// A telemetry payload, classified by generation.
#[derive(Debug, Clone, PartialEq)]
pub enum Telemetry {
    Legacy(LegacyResourceInfo),
    Current(ResourceInfo),
}

impl Telemetry {
    /// Classify and decode a raw payload.
    ///
    /// A present, non-null `metrics` key marks the current generation; any
    /// legacy readings that ride along under `hardware` are ignored.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let is_current = value.get("metrics").is_some_and(|m| !m.is_null());
        if is_current {
            serde_json::from_value(value).map(Self::Current)
        } else {
            serde_json::from_value(value).map(Self::Legacy)
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy(_))
    }
}

impl From<LegacyResourceInfo> for Telemetry {
    fn from(info: LegacyResourceInfo) -> Self {
        Self::Legacy(info)
    }
}

impl From<ResourceInfo> for Telemetry {
    fn from(info: ResourceInfo) -> Self {
        Self::Current(info)
    }
}
