//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use beagle_config::ConfigError;
use beagle_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(unused_assignments)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the beagle-wind API during {operation}")]
    #[diagnostic(
        code(beagle::connection_failed),
        help(
            "Check that the API server is running and api.base_url is correct.\n\
             Try: beagle --api-url http://host:8080 nodes list\n\
             Or work offline with: beagle --mock nodes list"
        )
    )]
    ConnectionFailed {
        operation: String,
        #[source]
        source: beagle_api::Error,
    },

    #[error("Authentication failed")]
    #[diagnostic(
        code(beagle::auth_failed),
        help(
            "Store a token with: beagle config set-token\n\
             Or point api.token_env at a variable holding it."
        )
    )]
    AuthFailed {
        #[source]
        source: beagle_api::Error,
    },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(beagle::not_found),
        help("Run: beagle {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Failed to {operation} {resource_type}")]
    #[diagnostic(
        code(beagle::operation_failed),
        help("The server rejected the request or could not be reached. Re-run with -v for details.")
    )]
    OperationFailed {
        operation: String,
        resource_type: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error during {operation}: {message}")]
    #[diagnostic(code(beagle::api_error))]
    ApiError {
        operation: String,
        status: Option<u16>,
        message: String,
    },

    #[error("Unexpected response during {operation}: {detail}")]
    #[diagnostic(
        code(beagle::unexpected_response),
        help("The server answered with a payload this client does not understand.")
    )]
    UnexpectedResponse { operation: String, detail: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(beagle::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Fixture data could not be loaded: {message}")]
    #[diagnostic(
        code(beagle::fixtures),
        help("Check mock.fixtures_dir, or unset it to use the built-in fixtures.")
    )]
    Fixtures { message: String },

    #[error(transparent)]
    #[diagnostic(
        code(beagle::config),
        help("Inspect the resolved settings with: beagle config show")
    )]
    Config(#[from] ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(beagle::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("YAML rendering failed: {0}")]
    #[diagnostic(code(beagle::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. }
            | Self::ApiError {
                status: Some(404), ..
            } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::Config(ConfigError::Validation { .. }) => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }

    pub fn not_found(resource_type: &str, identifier: &str) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            identifier: identifier.into(),
            list_command: format!("{resource_type}s list"),
        }
    }

    pub fn operation_failed(operation: &str, resource_type: &str) -> Self {
        Self::OperationFailed {
            operation: operation.into(),
            resource_type: resource_type.into(),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Transport { operation, source } => match source {
                beagle_api::Error::Authentication { .. } => CliError::AuthFailed { source },
                source
                    if matches!(source, beagle_api::Error::Transport(_)) || source.is_transient() =>
                {
                    CliError::ConnectionFailed {
                        operation: operation.into(),
                        source,
                    }
                }
                other => CliError::ApiError {
                    operation: operation.into(),
                    status: other.status(),
                    message: other.to_string(),
                },
            },

            CoreError::ShapeMismatch { operation, detail } => CliError::UnexpectedResponse {
                operation: operation.into(),
                detail,
            },

            CoreError::Fixtures { message } => CliError::Fixtures { message },

            CoreError::Config { message } => CliError::Validation {
                field: "api".into(),
                reason: message,
            },
        }
    }
}
