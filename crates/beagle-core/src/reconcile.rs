// ── Telemetry schema reconciliation ──
//
// Converts node telemetry between the legacy flat layout and the current
// hardware/metrics split. Static attributes (model, cores, capacity, ...)
// live under `hardware`; live readings (usage, temperature, ...) live under
// `metrics`. Every legacy field has exactly one home on the current side,
// so legacy -> current -> legacy is lossless.
//
// When a payload carries `metrics`, it is treated as current and any legacy
// readings riding along under `hardware` are ignored.

use serde_json::Value;

use crate::error::CoreError;
use crate::model::telemetry::{
    CpuMetrics, CpuSpec, GpuMetrics, GpuSpec, HardwareInfo, LegacyCpu, LegacyDisk, LegacyGpu,
    LegacyHardware, LegacyMemory, LegacyNetwork, LegacyResourceInfo, MemoryMetrics, MemorySpec,
    MetricsInfo, NetworkMetrics, ResourceInfo, StorageDevice, StorageMetrics, StorageSpec,
    Telemetry,
};

/// Model and type reported for a disk the current payload never described.
pub const UNKNOWN_DISK: &str = "Unknown";

/// Bring a payload of either generation to the current schema.
///
/// Current input is returned unchanged, so `upgrade` is idempotent.
pub fn upgrade(telemetry: &Telemetry) -> ResourceInfo {
    match telemetry {
        Telemetry::Current(info) => info.clone(),
        Telemetry::Legacy(legacy) => ResourceInfo::from(legacy),
    }
}

/// Express a current payload in the legacy schema.
///
/// The first storage device becomes the legacy `disk`. With no devices a
/// placeholder disk is synthesized so legacy consumers always find one.
pub fn downgrade(info: &ResourceInfo) -> LegacyResourceInfo {
    LegacyResourceInfo::from(info)
}

/// Classify a raw JSON payload and upgrade it.
pub fn upgrade_value(value: &Value) -> Result<ResourceInfo, CoreError> {
    let telemetry =
        Telemetry::from_value(value.clone()).map_err(|e| CoreError::shape("upgrade", e))?;
    Ok(upgrade(&telemetry))
}

/// Classify a raw JSON payload and express it in the legacy schema.
pub fn downgrade_value(value: &Value) -> Result<LegacyResourceInfo, CoreError> {
    let telemetry =
        Telemetry::from_value(value.clone()).map_err(|e| CoreError::shape("downgrade", e))?;
    Ok(downgrade(&upgrade(&telemetry)))
}

// ── Legacy -> current ────────────────────────────────────────────────

impl From<&LegacyResourceInfo> for ResourceInfo {
    fn from(legacy: &LegacyResourceInfo) -> Self {
        let LegacyHardware {
            cpu,
            memory,
            gpu,
            disk,
        } = &legacy.hardware;

        let (devices, storage) = match disk {
            Some(disk) => (
                vec![StorageDevice {
                    model: disk.model.clone(),
                    device_type: disk.disk_type.clone(),
                    capacity: disk.capacity,
                }],
                StorageMetrics {
                    used: disk.used,
                    free: disk.free,
                    usage: disk.usage,
                },
            ),
            None => (Vec::new(), StorageMetrics::default()),
        };

        Self {
            id: legacy.id.clone(),
            timestamp: legacy.timestamp,
            hardware: HardwareInfo {
                cpu: CpuSpec {
                    model: cpu.model.clone(),
                    cores: cpu.cores,
                    threads: cpu.threads,
                    frequency: cpu.frequency,
                    cache: cpu.cache,
                },
                memory: MemorySpec {
                    total: memory.total,
                    memory_type: memory.memory_type.clone(),
                    frequency: memory.frequency,
                    channels: memory.channels,
                },
                gpu: GpuSpec {
                    model: gpu.model.clone(),
                    memory_total: gpu.memory_total,
                    cuda_cores: gpu.cuda_cores,
                },
                storage: StorageSpec { devices },
            },
            metrics: MetricsInfo {
                cpu: CpuMetrics {
                    usage: cpu.usage,
                    temperature: cpu.temperature,
                },
                memory: MemoryMetrics {
                    available: memory.available,
                    used: memory.used,
                    usage: memory.usage,
                },
                gpu: GpuMetrics {
                    usage: gpu.usage,
                    memory_used: gpu.memory_used,
                    memory_free: gpu.memory_free,
                    memory_usage: gpu.memory_usage,
                    temperature: gpu.temperature,
                    power: gpu.power,
                },
                storage,
                network: NetworkMetrics {
                    bandwidth: legacy.network.bandwidth,
                    latency: legacy.network.latency,
                    connections: legacy.network.connections,
                    packet_loss: legacy.network.packet_loss,
                },
            },
        }
    }
}

// ── Current -> legacy ────────────────────────────────────────────────

impl From<&ResourceInfo> for LegacyResourceInfo {
    fn from(info: &ResourceInfo) -> Self {
        let HardwareInfo {
            cpu,
            memory,
            gpu,
            storage,
        } = &info.hardware;
        let metrics = &info.metrics;

        let disk = match storage.devices.first() {
            Some(device) => LegacyDisk {
                model: device.model.clone(),
                disk_type: device.device_type.clone(),
                capacity: device.capacity,
                used: metrics.storage.used,
                free: metrics.storage.free,
                usage: metrics.storage.usage,
            },
            None => LegacyDisk {
                model: UNKNOWN_DISK.into(),
                disk_type: UNKNOWN_DISK.into(),
                capacity: 0.0,
                used: metrics.storage.used,
                free: metrics.storage.free,
                usage: metrics.storage.usage,
            },
        };

        Self {
            id: info.id.clone(),
            timestamp: info.timestamp,
            hardware: LegacyHardware {
                cpu: LegacyCpu {
                    model: cpu.model.clone(),
                    cores: cpu.cores,
                    threads: cpu.threads,
                    frequency: cpu.frequency,
                    cache: cpu.cache,
                    usage: metrics.cpu.usage,
                    temperature: metrics.cpu.temperature,
                },
                memory: LegacyMemory {
                    total: memory.total,
                    memory_type: memory.memory_type.clone(),
                    frequency: memory.frequency,
                    channels: memory.channels,
                    available: metrics.memory.available,
                    used: metrics.memory.used,
                    usage: metrics.memory.usage,
                },
                gpu: LegacyGpu {
                    model: gpu.model.clone(),
                    memory_total: gpu.memory_total,
                    cuda_cores: gpu.cuda_cores,
                    usage: metrics.gpu.usage,
                    memory_used: metrics.gpu.memory_used,
                    memory_free: metrics.gpu.memory_free,
                    memory_usage: metrics.gpu.memory_usage,
                    temperature: metrics.gpu.temperature,
                    power: metrics.gpu.power,
                },
                disk: Some(disk),
            },
            network: LegacyNetwork {
                bandwidth: metrics.network.bandwidth,
                latency: metrics.network.latency,
                connections: metrics.network.connections,
                packet_loss: metrics.network.packet_loss,
            },
        }
    }
}
