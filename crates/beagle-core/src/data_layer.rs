// ── Data layer facade ──
//
// Resolves the data source once, at construction, and hands out one service
// per entity. Callers never see the transport or the fixture collections.

use std::sync::Arc;

use tracing::info;

use beagle_api::{HttpTransport, Transport};

use crate::config::DataLayerConfig;
use crate::error::CoreError;
use crate::fixtures::FixtureSet;
use crate::service::{CardService, InstanceService, NodeService, PlatformService, ResourceService};

/// Entry point for the dashboard's data access.
#[derive(Debug, Clone)]
pub struct DataLayer {
    config: DataLayerConfig,
    nodes: NodeService,
    platforms: PlatformService,
    cards: CardService,
    instances: InstanceService,
}

impl DataLayer {
    /// Build the HTTP transport and load fixtures as configured.
    ///
    /// The transport is built in both modes so a bad API URL surfaces at
    /// startup rather than on the first live call.
    pub fn new(config: &DataLayerConfig) -> Result<Self, CoreError> {
        let fixtures = match &config.fixtures_dir {
            Some(dir) => FixtureSet::from_dir(dir)?,
            None => FixtureSet::builtin()?,
        };
        let transport = HttpTransport::new(config.api.url.as_str(), &config.api.transport_config())?;
        Ok(Self::with_parts(config.clone(), fixtures, Arc::new(transport)))
    }

    /// Assemble from explicit parts. Tests use this to inject a transport.
    pub fn with_parts(
        config: DataLayerConfig,
        fixtures: FixtureSet,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let mode = config.source;
        let latency = config.latency;
        info!(
            source = %mode,
            api = %config.api.url,
            nodes = fixtures.nodes.len(),
            platforms = fixtures.platforms.len(),
            cards = fixtures.cards.len(),
            instances = fixtures.instances.len(),
            "data layer ready"
        );

        Self {
            nodes: ResourceService::new(mode, latency, fixtures.nodes, Arc::clone(&transport)),
            platforms: ResourceService::new(mode, latency, fixtures.platforms, Arc::clone(&transport)),
            cards: ResourceService::new(mode, latency, fixtures.cards, Arc::clone(&transport)),
            instances: ResourceService::new(mode, latency, fixtures.instances, transport),
            config,
        }
    }

    pub fn config(&self) -> &DataLayerConfig {
        &self.config
    }

    pub fn use_live_source(&self) -> bool {
        self.config.use_live_source()
    }

    pub fn nodes(&self) -> &NodeService {
        &self.nodes
    }

    pub fn platforms(&self) -> &PlatformService {
        &self.platforms
    }

    pub fn cards(&self) -> &CardService {
        &self.cards
    }

    pub fn instances(&self) -> &InstanceService {
        &self.instances
    }
}
