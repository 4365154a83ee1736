// ── Runtime connection configuration ──
//
// Where the control agent lives and how to talk to it. Built by the
// binary from its command line; core never reads config files.

use std::net::Ipv6Addr;
use std::time::Duration;

use dhcpdeck_api::{KeaClient, TransportConfig};
use url::Url;

use crate::error::CoreError;

/// Default control agent port.
pub const DEFAULT_PORT: u16 = 8000;

/// Default control agent host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Configuration for connecting to a single control agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Host name or address literal.
    pub host: String,
    pub port: u16,
    /// Request timeout. `None` blocks until the agent answers.
    pub timeout: Option<Duration>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            timeout: None,
        }
    }
}

impl ConnectionConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            timeout: None,
        }
    }

    /// `http://<host>:<port>/`, bracketing IPv6 literals.
    pub fn url(&self) -> Result<Url, CoreError> {
        let host = if self.host.parse::<Ipv6Addr>().is_ok() {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        Url::parse(&format!("http://{host}:{}/", self.port))
            .map_err(|e| CoreError::Internal(format!("invalid control agent address {host}: {e}")))
    }

    /// Build the control agent client. Does not touch the network.
    pub fn connect(&self) -> Result<KeaClient, CoreError> {
        let mut transport = TransportConfig::default();
        if let Some(timeout) = self.timeout {
            transport = transport.with_timeout(timeout);
        }
        Ok(KeaClient::new(self.url()?, &transport)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_points_at_local_agent() {
        let url = ConnectionConfig::default().url().unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/");
    }

    #[test]
    fn host_name_and_port() {
        let url = ConnectionConfig::new("kea.lan", 8080).url().unwrap();
        assert_eq!(url.as_str(), "http://kea.lan:8080/");
    }

    #[test]
    fn ipv6_literal_is_bracketed() {
        let url = ConnectionConfig::new("fd00::1", 8000).url().unwrap();
        assert_eq!(url.host_str(), Some("[fd00::1]"));
    }

    #[test]
    fn garbage_host_is_rejected() {
        let result = ConnectionConfig::new("bad host", 8000).url();
        assert!(matches!(result, Err(CoreError::Internal(_))));
    }

    #[test]
    fn connect_keeps_base_url() {
        let client = ConnectionConfig::new("10.1.2.3", 8000).connect().unwrap();
        assert_eq!(client.base_url().as_str(), "http://10.1.2.3:8000/");
    }
}
