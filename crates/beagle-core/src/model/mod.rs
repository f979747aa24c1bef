// ── Domain model ──
//
// Canonical entity types shared by the mock and live paths, plus both
// generations of node telemetry.

pub mod card;
pub mod common;
pub mod instance;
pub mod node;
pub mod platform;
pub mod telemetry;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use card::{Card, CardStatus};
pub use common::{ListPage, ListParams};
pub use instance::{Instance, InstanceConfig, InstanceStatus};
pub use node::{GpuResource, Node, NodeMetrics, NodeNetwork, NodeResources, NodeStatus, NodeType};
pub use platform::{Platform, PlatformFile, PlatformStatus};
pub use telemetry::{LegacyResourceInfo, ResourceInfo, Telemetry};

/// An entity served by a [`ResourceService`](crate::service::ResourceService).
///
/// Carries the REST binding (`PATH`), a short name for logs and synthetic
/// ids (`KIND`), and the serialized field names keyword search looks at.
pub trait Resource: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: &'static str;
    const PATH: &'static str;
    /// camelCase field names; dotted paths reach into nested objects.
    const SEARCH_FIELDS: &'static [&'static str];

    fn id(&self) -> &str;
}
