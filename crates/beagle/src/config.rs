//! Glue between the shared config crate and the global CLI flags.
//!
//! File and `BEAGLE_*` environment values are loaded by `beagle-config`;
//! flags given on the command line win over both.

use secrecy::SecretString;

use beagle_config::Config;
use beagle_core::DataLayerConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Load the config file and layer the global flags on top.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = beagle_config::load_config()?;
    apply_overrides(&mut cfg, global);
    Ok(cfg)
}

/// Resolve everything the data layer needs for this invocation.
pub fn data_layer_config(global: &GlobalOpts) -> Result<DataLayerConfig, CliError> {
    let cfg = load(global)?;
    let mut data = beagle_config::to_data_layer_config(&cfg)?;
    if let Some(ref token) = global.token {
        data.api.token = Some(SecretString::from(token.clone()));
    }
    tracing::debug!(source = %data.source, api = %data.api.url, "resolved data layer config");
    Ok(data)
}

fn apply_overrides(cfg: &mut Config, global: &GlobalOpts) {
    if global.mock {
        cfg.use_mock = true;
    }
    if let Some(ref url) = global.api_url {
        cfg.api.base_url.clone_from(url);
    }
    if global.insecure {
        cfg.api.insecure = true;
    }
    if let Some(timeout) = global.timeout {
        cfg.api.timeout = timeout;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn global() -> GlobalOpts {
        GlobalOpts {
            mock: false,
            api_url: None,
            token: None,
            output: OutputFormat::Table,
            verbose: 0,
            quiet: false,
            yes: false,
            insecure: false,
            timeout: None,
        }
    }

    #[test]
    fn flags_override_file_values() {
        let mut cfg = Config::default();
        let global = GlobalOpts {
            mock: true,
            api_url: Some("https://beagle.lab:8443".into()),
            insecure: true,
            timeout: Some(3),
            ..global()
        };
        apply_overrides(&mut cfg, &global);
        assert!(cfg.use_mock);
        assert_eq!(cfg.api.base_url, "https://beagle.lab:8443");
        assert!(cfg.api.insecure);
        assert_eq!(cfg.api.timeout, 3);
    }

    #[test]
    fn absent_flags_leave_config_alone() {
        let mut cfg = Config {
            use_mock: true,
            ..Config::default()
        };
        apply_overrides(&mut cfg, &global());
        assert!(cfg.use_mock);
        assert_eq!(cfg.api.base_url, "http://localhost:8080");
        assert_eq!(cfg.api.timeout, 10);
    }
}
