//! Config subcommand handlers.

use std::fmt::Write as _;

use secrecy::ExposeSecret;

use beagle_config::{Config, resolve_token};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking the token.
fn format_config_redacted(cfg: &Config) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "use_mock = {}", cfg.use_mock);
    let _ = writeln!(out);
    let _ = writeln!(out, "[api]");
    let _ = writeln!(out, "base_url = \"{}\"", cfg.api.base_url);
    if cfg.api.token.is_some() {
        let _ = writeln!(out, "token = \"****\"");
    }
    if let Some(ref env) = cfg.api.token_env {
        let _ = writeln!(out, "token_env = \"{env}\"");
    }
    let _ = writeln!(out, "timeout = {}", cfg.api.timeout);
    let _ = writeln!(out, "insecure = {}", cfg.api.insecure);
    if let Some(ref ca) = cfg.api.ca_cert {
        let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[mock]");
    let _ = writeln!(out, "read_latency_ms = {}", cfg.mock.read_latency_ms);
    let _ = writeln!(out, "write_latency_ms = {}", cfg.mock.write_latency_ms);
    if let Some(ref dir) = cfg.mock.fixtures_dir {
        let _ = writeln!(out, "fixtures_dir = \"{}\"", dir.display());
    }

    out
}

fn token_source(cfg: &Config) -> &'static str {
    match resolve_token(&cfg.api) {
        Some(token) if !token.expose_secret().is_empty() => "configured",
        _ => "none",
    }
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(
                &beagle_config::config_path().display().to_string(),
                global.quiet,
            );
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load(global)?;
            let mut out = format_config_redacted(&cfg);
            let _ = writeln!(out);
            let _ = write!(out, "# token: {}", token_source(&cfg));
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Init => {
            let path = beagle_config::config_path();
            if path.exists() {
                return Err(CliError::Validation {
                    field: "config".into(),
                    reason: format!("{} already exists", path.display()),
                });
            }
            let cfg = Config {
                use_mock: global.mock,
                ..Config::default()
            };
            beagle_config::save_config_to(&cfg, &path)?;
            output::print_status(&format!("wrote {}", path.display()), global.quiet);
            Ok(())
        }

        ConfigCommand::SetToken { value } => {
            let token = match value {
                Some(t) => t,
                None => dialoguer::Password::new()
                    .with_prompt("API token")
                    .interact()
                    .map_err(prompt_err)?,
            };
            if token.is_empty() {
                return Err(CliError::Validation {
                    field: "token".into(),
                    reason: "token cannot be empty".into(),
                });
            }
            beagle_config::store_token(&token)?;
            output::print_status("token stored in system keyring", global.quiet);
            Ok(())
        }
    }
}
