// ── Lease domain types ──

use std::cmp::Ordering;
use std::net::Ipv4Addr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIter, IntoEnumIterator, IntoStaticStr};

/// Lease state as reported by the DHCP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaseState {
    Default,
    Declined,
    ExpiredReclaimed,
    /// Any code this tool does not know; rendered as empty text.
    Unknown(i32),
}

impl LeaseState {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Default,
            1 => Self::Declined,
            2 => Self::ExpiredReclaimed,
            other => Self::Unknown(other),
        }
    }

    /// Raw wire code; this is what the State column sorts by.
    pub fn code(self) -> i32 {
        match self {
            Self::Default => 0,
            Self::Declined => 1,
            Self::ExpiredReclaimed => 2,
            Self::Unknown(code) => code,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Declined => "declined",
            Self::ExpiredReclaimed => "expired-reclaimed",
            Self::Unknown(_) => "",
        }
    }
}

/// The canonical Lease type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lease {
    pub subnet_id: u32,
    pub hostname: String,
    pub ip_address: String,
    pub hw_address: String,
    pub client_id: String,
    pub state: LeaseState,
    /// Client last transmission time, Unix seconds.
    pub cltt: i64,
    pub valid_lifetime: Duration,
    pub fqdn_fwd: bool,
    pub fqdn_rev: bool,
}

impl Lease {
    /// The leased address, if it parses as IPv4.
    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        self.ip_address.parse().ok()
    }

    /// Order two leases by one column.
    ///
    /// Text columns compare byte-wise. Addresses compare numerically, with
    /// unparseable addresses before every valid one.
    pub fn compare(&self, other: &Self, column: LeaseColumn) -> Ordering {
        match column {
            LeaseColumn::Hostname => self.hostname.as_bytes().cmp(other.hostname.as_bytes()),
            LeaseColumn::IpAddress => self.ipv4().cmp(&other.ipv4()),
            LeaseColumn::HwAddress => self.hw_address.as_bytes().cmp(other.hw_address.as_bytes()),
            LeaseColumn::State => self.state.code().cmp(&other.state.code()),
            LeaseColumn::Timestamp => self.cltt.cmp(&other.cltt),
            LeaseColumn::ClientId => self.client_id.as_bytes().cmp(other.client_id.as_bytes()),
        }
    }
}

/// Columns of the lease table, in display order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumCount,
    IntoStaticStr,
)]
pub enum LeaseColumn {
    #[strum(serialize = "Hostname")]
    Hostname,
    #[strum(serialize = "IP")]
    IpAddress,
    #[strum(serialize = "MAC")]
    HwAddress,
    #[strum(serialize = "State")]
    State,
    #[strum(serialize = "Timestamp")]
    Timestamp,
    #[strum(serialize = "Client ID")]
    ClientId,
}

impl LeaseColumn {
    /// Header text.
    pub fn label(self) -> &'static str {
        self.into()
    }

    /// Column at display position `index`.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }

    /// Display position of this column.
    pub fn index(self) -> usize {
        Self::iter().position(|c| c == self).unwrap_or_default()
    }
}

/// The active `(column, direction)` of the lease table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: LeaseColumn,
    pub ascending: bool,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            column: LeaseColumn::Timestamp,
            ascending: true,
        }
    }
}

impl SortSpec {
    /// Same column flips direction; a new column starts ascending.
    pub fn toggled(self, column: LeaseColumn) -> Self {
        if column == self.column {
            Self {
                column,
                ascending: !self.ascending,
            }
        } else {
            Self {
                column,
                ascending: true,
            }
        }
    }
}

/// Stable sort by `spec`. Rows equal on the sort column fall back to
/// address order; the direction applies to both keys.
pub fn sort_leases(leases: &mut [Lease], spec: SortSpec) {
    leases.sort_by(|a, b| {
        let ord = a
            .compare(b, spec.column)
            .then_with(|| a.compare(b, LeaseColumn::IpAddress));
        if spec.ascending { ord } else { ord.reverse() }
    });
}
