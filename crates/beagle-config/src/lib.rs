//! Shared configuration for beagle-wind tools.
//!
//! TOML file + `BEAGLE_*` environment overrides, token resolution
//! (env var + keyring + plaintext), and translation to
//! `beagle_core::DataLayerConfig`. Core never reads files or environment
//! itself; it receives a pre-built config from here.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use beagle_core::{ApiConfig, DataLayerConfig, MockLatency, SourceMode, TlsVerification};

/// Keyring service name used for the API token.
pub const KEYRING_SERVICE: &str = "beagle-wind";
/// Keyring entry holding the API token.
pub const KEYRING_TOKEN_KEY: &str = "api-token";
/// Prefix for environment overrides; nested keys split on `__`.
pub const ENV_PREFIX: &str = "BEAGLE_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Serve fixtures instead of calling the live API.
    #[serde(default)]
    pub use_mock: bool,

    #[serde(default)]
    pub api: ApiSection,

    #[serde(default)]
    pub mock: MockSection,
}

/// `[api]`: live backend connection.
#[derive(Debug, Deserialize, Serialize)]
pub struct ApiSection {
    /// Server root (e.g. "http://localhost:8080"); `/api/v1` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token (plaintext -- prefer keyring or env var).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Environment variable name containing the bearer token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_env: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Skip TLS certificate verification.
    #[serde(default)]
    pub insecure: bool,

    /// Path to custom CA certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            token_env: None,
            timeout: default_timeout(),
            insecure: false,
            ca_cert: None,
        }
    }
}

/// `[mock]`: fixture source tuning.
#[derive(Debug, Deserialize, Serialize)]
pub struct MockSection {
    #[serde(default = "default_read_latency")]
    pub read_latency_ms: u64,

    #[serde(default = "default_write_latency")]
    pub write_latency_ms: u64,

    /// Directory of `nodes.json`, `platforms.json`, ... (built-in data if unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixtures_dir: Option<PathBuf>,
}

impl Default for MockSection {
    fn default() -> Self {
        Self {
            read_latency_ms: default_read_latency(),
            write_latency_ms: default_write_latency(),
            fixtures_dir: None,
        }
    }
}

fn default_base_url() -> String {
    beagle_core::config::DEFAULT_API_URL.into()
}
fn default_timeout() -> u64 {
    10
}
fn default_read_latency() -> u64 {
    300
}
fn default_write_latency() -> u64 {
    500
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "beagle-wind", "beagle").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("beagle");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file, still layering `BEAGLE_*` overrides on top.
/// A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the API token. Absence is not an error: the API may be open.
///
/// Order: `token_env` variable, system keyring, plaintext `token`.
pub fn resolve_token(api: &ApiSection) -> Option<SecretString> {
    // 1. Configured env var
    if let Some(ref env_name) = api.token_env {
        if let Ok(val) = std::env::var(env_name) {
            return Some(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, KEYRING_TOKEN_KEY) {
        if let Ok(secret) = entry.get_password() {
            return Some(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    api.token.clone().map(SecretString::from)
}

/// Store the API token in the system keyring.
pub fn store_token(token: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_TOKEN_KEY)?;
    entry.set_password(token)?;
    Ok(())
}

// ── Translation to core config ──────────────────────────────────────

/// Build a `DataLayerConfig` from a loaded config.
pub fn to_data_layer_config(cfg: &Config) -> Result<DataLayerConfig, ConfigError> {
    let url: url::Url = cfg
        .api
        .base_url
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "api.base_url".into(),
            reason: format!("invalid URL: {}", cfg.api.base_url),
        })?;

    if cfg.api.timeout == 0 {
        return Err(ConfigError::Validation {
            field: "api.timeout".into(),
            reason: "must be at least 1 second".into(),
        });
    }

    let tls = if cfg.api.insecure {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = cfg.api.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let source = if cfg.use_mock {
        SourceMode::Mock
    } else {
        SourceMode::Live
    };

    Ok(DataLayerConfig {
        source,
        api: ApiConfig {
            url,
            token: resolve_token(&cfg.api),
            tls,
            timeout: Duration::from_secs(cfg.api.timeout),
        },
        latency: MockLatency {
            read: Duration::from_millis(cfg.mock.read_latency_ms),
            write: Duration::from_millis(cfg.mock.write_latency_ms),
        },
        fixtures_dir: cfg.mock.fixtures_dir.clone(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert!(!cfg.use_mock);
        assert_eq!(cfg.api.base_url, "http://localhost:8080");
        assert_eq!(cfg.api.timeout, 10);
        assert_eq!(cfg.mock.read_latency_ms, 300);
        assert_eq!(cfg.mock.write_latency_ms, 500);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
use_mock = true

[api]
base_url = "https://beagle.example.com"
timeout = 3

[mock]
read_latency_ms = 0
"#,
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert!(cfg.use_mock);
        assert_eq!(cfg.api.base_url, "https://beagle.example.com");
        assert_eq!(cfg.api.timeout, 3);
        assert_eq!(cfg.mock.read_latency_ms, 0);
        assert_eq!(cfg.mock.write_latency_ms, 500);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config {
            use_mock: true,
            mock: MockSection {
                fixtures_dir: Some(PathBuf::from("/srv/fixtures")),
                ..MockSection::default()
            },
            ..Config::default()
        };

        save_config_to(&cfg, &path).unwrap();
        let loaded = load_config_from(&path).unwrap();
        assert!(loaded.use_mock);
        assert_eq!(loaded.mock.fixtures_dir, Some(PathBuf::from("/srv/fixtures")));
    }

    #[test]
    fn translates_to_data_layer_config() {
        let cfg = Config {
            use_mock: true,
            api: ApiSection {
                insecure: true,
                token: Some("plain-token".into()),
                token_env: Some("BEAGLE_TEST_TOKEN_THAT_IS_NEVER_SET".into()),
                ..ApiSection::default()
            },
            mock: MockSection {
                read_latency_ms: 5,
                write_latency_ms: 7,
                fixtures_dir: None,
            },
        };

        let data = to_data_layer_config(&cfg).unwrap();
        assert!(!data.use_live_source());
        assert_eq!(data.api.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(data.latency.read, Duration::from_millis(5));
        assert_eq!(data.latency.write, Duration::from_millis(7));
        // A keyring entry on the host would win over the plaintext token.
        assert!(data.api.token.is_some_and(|t| !t.expose_secret().is_empty()));
    }

    #[test]
    fn rejects_bad_url_and_zero_timeout() {
        let bad_url = Config {
            api: ApiSection {
                base_url: "not a url".into(),
                ..ApiSection::default()
            },
            ..Config::default()
        };
        assert!(matches!(
            to_data_layer_config(&bad_url),
            Err(ConfigError::Validation { .. })
        ));

        let zero_timeout = Config {
            api: ApiSection {
                timeout: 0,
                ..ApiSection::default()
            },
            ..Config::default()
        };
        let err = to_data_layer_config(&zero_timeout).unwrap_err();
        assert!(err.to_string().contains("api.timeout"));
    }

    #[test]
    fn ca_cert_selects_custom_ca() {
        let cfg = Config {
            api: ApiSection {
                ca_cert: Some(PathBuf::from("/etc/beagle/ca.pem")),
                ..ApiSection::default()
            },
            ..Config::default()
        };
        let data = to_data_layer_config(&cfg).unwrap();
        assert_eq!(
            data.api.tls,
            TlsVerification::CustomCa(PathBuf::from("/etc/beagle/ca.pem"))
        );
        assert!(data.use_live_source());
    }
}
