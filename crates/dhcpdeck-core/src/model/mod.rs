// ── Domain model ──
//
// Canonical types the navigation layer works with, converted from the
// `dhcpdeck-api` wire records in `crate::convert`.

pub mod lease;
pub mod status;
pub mod subnet;

pub use lease::{Lease, LeaseColumn, LeaseState, SortSpec, sort_leases};
pub use status::ServerStatus;
pub use subnet::{OptionData, Pool, Reservation, Subnet, sort_subnets};
