// Lease commands
//
// `lease4-get-all` scoped to one subnet, and `lease4-del` by address.

use serde_json::json;
use tracing::{debug, warn};

use crate::error::Error;
use crate::kea::client::KeaClient;
use crate::kea::models::{Command, CommandOutcome, Lease4, RESULT_EMPTY};

impl KeaClient {
    /// List every lease in one subnet.
    ///
    /// `lease4-get-all` with `{"subnets": [id]}` → `arguments.leases`
    pub async fn fetch_leases(&self, subnet_id: u32) -> Result<Vec<Lease4>, Error> {
        debug!(subnet_id, "fetching leases");
        let entry = self
            .execute_first(Command::Lease4GetAll, &json!({ "subnets": [subnet_id] }))
            .await?;

        // An empty subnet is result 3; some agent versions drop `arguments`.
        if entry.result == RESULT_EMPTY && entry.arguments.is_none() {
            return Ok(Vec::new());
        }
        entry.fragment(Command::Lease4GetAll, "leases")
    }

    /// Delete the lease for `ip_address`.
    ///
    /// `lease4-del` with `{"ip-address": ip}`. A nonzero result (e.g. the
    /// lease is already gone) is an ordinary outcome, returned verbatim.
    pub async fn delete_lease(&self, ip_address: &str) -> Result<CommandOutcome, Error> {
        debug!(ip_address, "deleting lease");
        let entry = self
            .execute_first(Command::Lease4Del, &json!({ "ip-address": ip_address }))
            .await?;

        if !entry.is_success() {
            warn!(ip_address, result = entry.result, text = entry.text(), "lease4-del refused");
        }
        Ok(CommandOutcome {
            result: entry.result,
            text: entry.text().to_owned(),
        })
    }
}
