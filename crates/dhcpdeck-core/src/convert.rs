// ── API-to-domain type conversions ──
//
// Bridges raw `dhcpdeck_api` wire records into `crate::model` types: lease
// states become an enum, second counts become `Duration`s, and fields only
// the wire format cares about are dropped.

use std::time::Duration;

use dhcpdeck_api as api;

use crate::model::{Lease, LeaseState, OptionData, Pool, Reservation, ServerStatus, Subnet};

fn secs(value: u32) -> Duration {
    Duration::from_secs(u64::from(value))
}

fn options(raw: Vec<api::OptionData>) -> Vec<OptionData> {
    raw.into_iter().map(OptionData::from).collect()
}

impl From<api::OptionData> for OptionData {
    fn from(raw: api::OptionData) -> Self {
        Self {
            name: raw.name,
            data: raw.data,
            code: raw.code,
            space: raw.space,
            csv_format: raw.csv_format,
            always_send: raw.always_send,
        }
    }
}

impl From<api::Pool> for Pool {
    fn from(raw: api::Pool) -> Self {
        Self {
            pool: raw.pool,
            option_data: options(raw.option_data),
        }
    }
}

impl From<api::Reservation> for Reservation {
    fn from(raw: api::Reservation) -> Self {
        Self {
            ip_address: raw.ip_address,
            hw_address: raw.hw_address,
            hostname: raw.hostname,
            boot_file_name: raw.boot_file_name,
            next_server: raw.next_server,
            server_hostname: raw.server_hostname,
            client_classes: raw.client_classes,
            option_data: options(raw.option_data),
        }
    }
}

impl From<api::Subnet4> for Subnet {
    fn from(raw: api::Subnet4) -> Self {
        Self {
            id: raw.id,
            subnet: raw.subnet,
            reservations: raw.reservations.into_iter().map(Reservation::from).collect(),
            pools: raw.pools.into_iter().map(Pool::from).collect(),
            option_data: options(raw.option_data),
            renew_timer: secs(raw.renew_timer),
            rebind_timer: secs(raw.rebind_timer),
            valid_lifetime: secs(raw.valid_lifetime),
        }
    }
}

impl From<api::Lease4> for Lease {
    fn from(raw: api::Lease4) -> Self {
        Self {
            subnet_id: raw.subnet_id,
            hostname: raw.hostname,
            ip_address: raw.ip_address,
            hw_address: raw.hw_address,
            client_id: raw.client_id,
            state: LeaseState::from_code(raw.state),
            cltt: raw.cltt,
            valid_lifetime: secs(raw.valid_lft),
            fqdn_fwd: raw.fqdn_fwd,
            fqdn_rev: raw.fqdn_rev,
        }
    }
}

impl From<api::ServerStatus> for ServerStatus {
    fn from(raw: api::ServerStatus) -> Self {
        Self {
            pid: raw.pid,
            uptime: Duration::from_secs(raw.uptime),
            since_reload: Duration::from_secs(raw.reload),
            multi_threading: raw.multi_threading_enabled,
        }
    }
}
