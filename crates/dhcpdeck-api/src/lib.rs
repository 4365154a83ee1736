// dhcpdeck-api: Async Rust client for the Kea DHCPv4 control agent

pub mod error;
pub mod kea;
pub mod transport;

pub use error::Error;
pub use kea::KeaClient;
pub use kea::models::{
    Command, CommandOutcome, Fragments, Lease4, OptionData, Pool, Request, Reservation,
    ResponseEntry, ServerStatus, Subnet4,
};
pub use transport::TransportConfig;
