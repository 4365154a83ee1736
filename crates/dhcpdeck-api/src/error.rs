use thiserror::Error;

/// Top-level error type for the `dhcpdeck-api` crate.
///
/// Covers every failure between "send the command" and "hand back a typed
/// record": transport, HTTP status, envelope shape, and fragment decoding.
/// `dhcpdeck-core` maps these into its own error type.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The control agent answered with a non-success HTTP status.
    #[error("Control agent returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    // ── Envelope ────────────────────────────────────────────────────
    /// The body was not a response envelope at all.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// The envelope decoded but had no usable entry.
    #[error("Malformed response envelope: {0}")]
    MalformedEnvelope(String),

    /// The command failed and the expected payload is absent.
    #[error("`{command}` failed (result {result}): {text}")]
    Command {
        command: &'static str,
        result: i64,
        text: String,
    },

    /// A named fragment the caller needs is missing from `arguments`.
    #[error("Response to `{command}` has no `{key}` fragment")]
    MissingFragment { command: &'static str, key: String },

    /// A fragment was present but did not decode into the expected shape.
    #[error("Fragment `{key}` of `{command}` did not decode: {source}")]
    Fragment {
        command: &'static str,
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Returns `true` if the control agent could not be reached at all.
    pub fn is_unreachable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }

    /// The Kea result code, if this error carries one.
    pub fn result_code(&self) -> Option<i64> {
        match self {
            Self::Command { result, .. } => Some(*result),
            _ => None,
        }
    }
}
