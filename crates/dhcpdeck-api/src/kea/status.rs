// Daemon status
//
// `status-get` returns pid, uptime and reload age of the DHCPv4 daemon.

use tracing::debug;

use crate::error::Error;
use crate::kea::client::KeaClient;
use crate::kea::models::{Command, ServerStatus};

impl KeaClient {
    /// Fetch the DHCPv4 daemon status.
    ///
    /// `status-get` → `arguments`
    pub async fn fetch_status(&self) -> Result<ServerStatus, Error> {
        debug!("fetching server status");
        let entry = self.execute_first(Command::StatusGet, &"").await?;
        entry.arguments_as(Command::StatusGet)
    }
}
