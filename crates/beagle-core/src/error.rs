// ── Core error types ──
//
// Failures the data layer can report. Most service operations never surface
// these: they are logged and degraded to an empty result. Access-link
// operations return them so callers can tell "no link" from "link down".

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Live path ────────────────────────────────────────────────────
    /// Network or HTTP failure while talking to the live API.
    #[error("Transport failure during {operation}: {source}")]
    Transport {
        operation: &'static str,
        source: beagle_api::Error,
    },

    /// A live response matched none of the expected envelope shapes, or
    /// its payload did not decode into the entity type.
    #[error("Unexpected response shape during {operation}: {detail}")]
    ShapeMismatch {
        operation: &'static str,
        detail: String,
    },

    // ── Startup ──────────────────────────────────────────────────────
    #[error("Fixture error: {message}")]
    Fixtures { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    pub(crate) fn transport(operation: &'static str, source: beagle_api::Error) -> Self {
        Self::Transport { operation, source }
    }

    pub(crate) fn shape(operation: &'static str, detail: impl ToString) -> Self {
        Self::ShapeMismatch {
            operation,
            detail: detail.to_string(),
        }
    }

    /// Returns `true` if the failure came from the transport.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// HTTP status of the underlying transport failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { source, .. } => source.status(),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<beagle_api::Error> for CoreError {
    fn from(err: beagle_api::Error) -> Self {
        match err {
            beagle_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            beagle_api::Error::Tls(msg) => CoreError::Config {
                message: format!("TLS setup failed: {msg}"),
            },
            other => CoreError::transport("request", other),
        }
    }
}
