// ── Lease backend ──
//
// The seam between the navigation state machine and the control agent.
// `KeaClient` is the production implementation; tests drive the state
// machine through in-memory doubles.

use std::future::Future;

use dhcpdeck_api::KeaClient;
use tracing::debug;

use crate::error::CoreError;
use crate::model::{Lease, ServerStatus, Subnet};

/// Result of a lease deletion: the server's code and message, verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub result: i64,
    pub text: String,
}

/// Typed view of the control commands the dashboard issues.
///
/// Every call is one request/response exchange; nothing is cached.
pub trait LeaseBackend {
    /// Configured subnets, in configuration order.
    fn fetch_subnets(&self) -> impl Future<Output = Result<Vec<Subnet>, CoreError>> + Send;

    /// Current leases of one subnet, in server order.
    fn fetch_leases(
        &self,
        subnet_id: u32,
    ) -> impl Future<Output = Result<Vec<Lease>, CoreError>> + Send;

    /// Delete the lease on `ip_address`. A refusal is an `Ok` outcome.
    fn delete_lease(
        &self,
        ip_address: &str,
    ) -> impl Future<Output = Result<DeleteOutcome, CoreError>> + Send;

    fn fetch_status(&self) -> impl Future<Output = Result<ServerStatus, CoreError>> + Send;
}

impl LeaseBackend for KeaClient {
    async fn fetch_subnets(&self) -> Result<Vec<Subnet>, CoreError> {
        let subnets = KeaClient::fetch_subnets(self).await?;
        debug!(count = subnets.len(), "subnets loaded");
        Ok(subnets.into_iter().map(Subnet::from).collect())
    }

    async fn fetch_leases(&self, subnet_id: u32) -> Result<Vec<Lease>, CoreError> {
        let leases = KeaClient::fetch_leases(self, subnet_id).await?;
        debug!(subnet_id, count = leases.len(), "leases loaded");
        Ok(leases.into_iter().map(Lease::from).collect())
    }

    async fn delete_lease(&self, ip_address: &str) -> Result<DeleteOutcome, CoreError> {
        let outcome = KeaClient::delete_lease(self, ip_address).await?;
        Ok(DeleteOutcome {
            result: outcome.result,
            text: outcome.text,
        })
    }

    async fn fetch_status(&self) -> Result<ServerStatus, CoreError> {
        Ok(KeaClient::fetch_status(self).await?.into())
    }
}
