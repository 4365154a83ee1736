// ── Subnet domain types ──

use std::net::Ipv4Addr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A DHCP option value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionData {
    pub name: String,
    pub data: String,
    pub code: u16,
    pub space: String,
    pub csv_format: bool,
    pub always_send: bool,
}

/// An address range handed out dynamically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    /// As configured: `"start - end"` or a prefix.
    pub pool: String,
    pub option_data: Vec<OptionData>,
}

impl Pool {
    /// First and (for ranges) last address of the pool.
    pub fn bounds(&self) -> (&str, Option<&str>) {
        match self.pool.split_once('-') {
            Some((start, end)) => (start.trim(), Some(end.trim())),
            None => (self.pool.trim(), None),
        }
    }
}

/// A static, operator-configured address assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub ip_address: String,
    pub hw_address: String,
    pub hostname: String,
    pub boot_file_name: String,
    pub next_server: String,
    pub server_hostname: String,
    pub client_classes: Vec<String>,
    pub option_data: Vec<OptionData>,
}

/// The canonical Subnet type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subnet {
    /// Assigned by the server; unique and stable for the session.
    pub id: u32,
    /// CIDR notation, e.g. `10.0.0.0/24`.
    pub subnet: String,
    pub reservations: Vec<Reservation>,
    pub pools: Vec<Pool>,
    pub option_data: Vec<OptionData>,
    pub renew_timer: Duration,
    pub rebind_timer: Duration,
    pub valid_lifetime: Duration,
}

impl Subnet {
    /// Network address: the part of the CIDR before `/`.
    pub fn network_address(&self) -> Option<Ipv4Addr> {
        let network = self
            .subnet
            .split_once('/')
            .map_or(self.subnet.as_str(), |(addr, _)| addr);
        network.trim().parse().ok()
    }

    /// The reservation holding `ip_address`, if any.
    pub fn reservation_for(&self, ip_address: &str) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.ip_address == ip_address)
    }

    pub fn is_reserved(&self, ip_address: &str) -> bool {
        self.reservation_for(ip_address).is_some()
    }
}

/// Stable sort by numeric network address.
pub fn sort_subnets(subnets: &mut [Subnet]) {
    subnets.sort_by_key(Subnet::network_address);
}
