// Kea control agent HTTP client
//
// Wraps `reqwest::Client` with the control agent's request envelope and
// response-array unwrapping. Command-specific methods live in sibling
// modules as inherent impls so this file stays about transport mechanics.

use serde::Deserialize;
use serde::Serialize;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::kea::models::{Command, Request, ResponseEntry};
use crate::transport::TransportConfig;

/// The agent answers with an array, except for some agent-level failures
/// (unknown service, unparsable request) which come back as a bare object.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope {
    Many(Vec<ResponseEntry>),
    One(ResponseEntry),
}

/// Raw HTTP client for the Kea control agent.
///
/// Every command is a single `POST` of a JSON envelope to the agent's base
/// URL. The response body is read in full and decoded into the generic
/// [`ResponseEntry`] array; pulling typed records out of it is left to the
/// per-command methods.
pub struct KeaClient {
    http: reqwest::Client,
    base_url: Url,
}

impl KeaClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the control agent root, e.g. `http://127.0.0.1:8000`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// The control agent base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Send `command` with `arguments` and return the full response array.
    pub async fn execute<A: Serialize + Sync>(
        &self,
        command: Command,
        arguments: &A,
    ) -> Result<Vec<ResponseEntry>, Error> {
        debug!(%command, "POST {}", self.base_url);

        let request = Request::new(command, arguments);
        let resp = self
            .http
            .post(self.base_url.clone())
            .json(&request)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;
        trace!(%command, %status, bytes = body.len(), "response received");

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let envelope: Envelope = serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })?;

        Ok(match envelope {
            Envelope::Many(entries) => entries,
            Envelope::One(entry) => vec![entry],
        })
    }

    /// Send `command` and return the first response entry, the only one
    /// this client ever consults.
    pub async fn execute_first<A: Serialize + Sync>(
        &self,
        command: Command,
        arguments: &A,
    ) -> Result<ResponseEntry, Error> {
        self.execute(command, arguments)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::MalformedEnvelope(format!("empty response to `{command}`")))
    }
}
