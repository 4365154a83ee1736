// Kea control agent client modules
//
// `client` owns the POST/envelope mechanics; the remaining modules add one
// inherent method per control command they cover.

pub mod client;
pub mod config;
pub mod leases;
pub mod models;
pub mod status;

pub use client::KeaClient;
