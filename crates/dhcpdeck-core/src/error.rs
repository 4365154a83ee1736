// ── Core error types ──
//
// What the navigation layer and the binary see. Transport and decode
// details from `dhcpdeck-api` are folded into a small set of variants; the
// event loop treats every one of them as fatal.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach control agent at {url}: {reason}")]
    Unreachable { url: String, reason: String },

    // ── Protocol errors ──────────────────────────────────────────────
    #[error("Control agent rejected the request: {message}")]
    Rejected {
        message: String,
        /// Kea result code, when the agent sent one.
        result: Option<i64>,
    },

    #[error("Unexpected response from control agent: {message}")]
    Protocol { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<dhcpdeck_api::Error> for CoreError {
    fn from(err: dhcpdeck_api::Error) -> Self {
        match err {
            dhcpdeck_api::Error::Transport(e) if e.is_connect() || e.is_timeout() => {
                CoreError::Unreachable {
                    url: e
                        .url()
                        .map_or_else(|| "<unknown>".into(), ToString::to_string),
                    reason: e.to_string(),
                }
            }
            dhcpdeck_api::Error::Transport(e) => CoreError::Protocol {
                message: e.to_string(),
            },
            dhcpdeck_api::Error::InvalidUrl(e) => CoreError::Internal(e.to_string()),
            dhcpdeck_api::Error::Status { status, body } => CoreError::Rejected {
                message: format!("HTTP {status}: {body}"),
                result: None,
            },
            dhcpdeck_api::Error::Command {
                command,
                result,
                text,
            } => CoreError::Rejected {
                message: format!("{command}: {text}"),
                result: Some(result),
            },
            other @ (dhcpdeck_api::Error::Deserialization { .. }
            | dhcpdeck_api::Error::MalformedEnvelope(_)
            | dhcpdeck_api::Error::MissingFragment { .. }
            | dhcpdeck_api::Error::Fragment { .. }) => CoreError::Protocol {
                message: other.to_string(),
            },
        }
    }
}
