//! Data-access layer for the beagle-wind admin dashboard.
//!
//! Sits between `beagle-api` (the live HTTP transport) and the consumers
//! (CLI, dashboards):
//!
//! - **[`DataLayer`]**: Facade built once from a [`DataLayerConfig`]. The
//!   source mode (fixtures or live API) is fixed at construction and shared
//!   by every service it hands out.
//!
//! - **[`ResourceService<E>`](service::ResourceService)**: One generic
//!   service per entity ([`Node`], [`Platform`], [`Card`], [`Instance`]) with
//!   list/detail/create/update/delete, plus instance start/stop and platform
//!   access links. Live failures degrade to empty results, except access
//!   links, which return [`CoreError`].
//!
//! - **[`extract`]**: Normalizes the response envelopes the backend has
//!   used over time (`{data, total}`, `{items}`, bare arrays).
//!
//! - **[`mock`]**: Pagination, keyword search, and simulated latency for
//!   the fixture path.
//!
//! - **[`reconcile`]**: Converts node telemetry between the legacy flat
//!   schema and the current hardware/metrics split.

pub mod config;
pub mod data_layer;
pub mod error;
pub mod extract;
pub mod fixtures;
pub mod mock;
pub mod model;
pub mod reconcile;
pub mod service;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ApiConfig, DataLayerConfig, MockLatency, SourceMode, TlsVerification};
pub use data_layer::DataLayer;
pub use error::CoreError;
pub use fixtures::FixtureSet;
pub use service::{CardService, InstanceService, NodeService, PlatformService, ResourceService};

pub use model::{
    Card, CardStatus, Instance, InstanceConfig, InstanceStatus, LegacyResourceInfo, ListPage,
    ListParams, Node, NodeStatus, NodeType, Platform, PlatformStatus, Resource, ResourceInfo,
    Telemetry,
};
