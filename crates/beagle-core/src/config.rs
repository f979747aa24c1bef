// ── Runtime data-layer configuration ──
//
// These types describe *where* data comes from: fixtures or the live API.
// They never touch disk; `beagle-config` builds a `DataLayerConfig` from
// files and environment and hands it in. The source mode is fixed for the
// lifetime of every service built from it.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

use beagle_api::{TlsMode, TransportConfig};

/// Where Resource Services read from.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SourceMode {
    /// Static fixtures with simulated latency.
    Mock,
    /// The remote REST API.
    #[default]
    Live,
}

/// Artificial latency applied on the mock path so the UI sees the same
/// loading states it would against a real server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockLatency {
    /// List, detail, and access-link reads.
    pub read: Duration,
    /// Create, update, delete, start, stop, and access refresh.
    pub write: Duration,
}

impl MockLatency {
    pub const fn none() -> Self {
        Self {
            read: Duration::ZERO,
            write: Duration::ZERO,
        }
    }
}

impl Default for MockLatency {
    fn default() -> Self {
        Self {
            read: Duration::from_millis(300),
            write: Duration::from_millis(500),
        }
    }
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed lab servers).
    DangerAcceptInvalid,
}

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Live API connection settings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server root; `/api/v1/` is appended by the transport.
    pub url: Url,
    pub token: Option<SecretString>,
    pub tls: TlsVerification,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            token: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl ApiConfig {
    pub(crate) fn transport_config(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
            token: self.token.clone(),
        }
    }
}

/// Everything needed to build a [`DataLayer`](crate::DataLayer).
#[derive(Debug, Clone, Default)]
pub struct DataLayerConfig {
    pub source: SourceMode,
    pub api: ApiConfig,
    pub latency: MockLatency,
    /// Directory of `nodes.json`, `platforms.json`, `cards.json` and
    /// `instances.json`. `None` uses the built-in fixtures.
    pub fixtures_dir: Option<PathBuf>,
}

impl DataLayerConfig {
    /// Fixture-backed config with default latency.
    pub fn mock() -> Self {
        Self {
            source: SourceMode::Mock,
            ..Self::default()
        }
    }

    /// Live config pointed at `url`.
    pub fn live(url: Url) -> Self {
        Self {
            source: SourceMode::Live,
            api: ApiConfig {
                url,
                ..ApiConfig::default()
            },
            ..Self::default()
        }
    }

    pub fn with_latency(mut self, latency: MockLatency) -> Self {
        self.latency = latency;
        self
    }

    /// The mode switch every service consults before each operation.
    pub fn use_live_source(&self) -> bool {
        self.source == SourceMode::Live
    }
}
