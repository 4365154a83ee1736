// Configuration commands
//
// `config-get` returns the whole running configuration; only the subnet
// list under `Dhcp4.subnet4` is of interest here.

use tracing::debug;

use crate::error::Error;
use crate::kea::client::KeaClient;
use crate::kea::models::{Command, Fragments, Subnet4, decode_fragment};

impl KeaClient {
    /// List the configured DHCPv4 subnets, in configuration order.
    ///
    /// `config-get` → `arguments.Dhcp4.subnet4`
    pub async fn fetch_subnets(&self) -> Result<Vec<Subnet4>, Error> {
        debug!("fetching subnets");
        let entry = self.execute_first(Command::ConfigGet, &"").await?;
        let dhcp4: Fragments = entry.fragment(Command::ConfigGet, "Dhcp4")?;
        let subnet4 = dhcp4.get("subnet4").ok_or_else(|| Error::MissingFragment {
            command: Command::ConfigGet.as_str(),
            key: "Dhcp4.subnet4".into(),
        })?;
        decode_fragment(Command::ConfigGet, "Dhcp4.subnet4", subnet4)
    }
}
