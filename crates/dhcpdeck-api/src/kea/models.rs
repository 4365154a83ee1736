// Kea control agent wire types
//
// Requests are `{ arguments, command, service }`; responses are an array of
// `{ result, text?, arguments? }`. `arguments` stays a bag of raw fragments
// until a call site pulls out the one it needs, so every decode step is
// explicit. Record fields use `#[serde(default)]` liberally because Kea omits
// keys that hold their default value.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Service tag every request is addressed to.
pub const DHCP4_SERVICE: &str = "dhcp4";

/// Kea result code: command succeeded.
pub const RESULT_SUCCESS: i64 = 0;
/// Kea result code: command succeeded but found nothing.
pub const RESULT_EMPTY: i64 = 3;

// ── Request Envelope ─────────────────────────────────────────────────

/// The fixed command vocabulary spoken to the control agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    #[serde(rename = "config-get")]
    ConfigGet,
    #[serde(rename = "status-get")]
    StatusGet,
    #[serde(rename = "lease4-get-all")]
    Lease4GetAll,
    #[serde(rename = "lease4-del")]
    Lease4Del,
}

impl Command {
    /// Wire name of the command.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ConfigGet => "config-get",
            Self::StatusGet => "status-get",
            Self::Lease4GetAll => "lease4-get-all",
            Self::Lease4Del => "lease4-del",
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request envelope:
/// ```json
/// { "arguments": ..., "command": "lease4-get-all", "service": ["dhcp4"] }
/// ```
#[derive(Debug, Serialize)]
pub struct Request<'a, A: Serialize> {
    pub arguments: &'a A,
    pub command: Command,
    pub service: [&'static str; 1],
}

impl<'a, A: Serialize> Request<'a, A> {
    pub fn new(command: Command, arguments: &'a A) -> Self {
        Self {
            arguments,
            command,
            service: [DHCP4_SERVICE],
        }
    }
}

// ── Response Envelope ────────────────────────────────────────────────

/// Named raw JSON fragments carried in a response's `arguments`.
pub type Fragments = serde_json::Map<String, serde_json::Value>;

/// One element of the response array.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseEntry {
    pub result: i64,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub arguments: Option<Fragments>,
}

impl ResponseEntry {
    /// Decode the fragment stored under `key` in `arguments`.
    ///
    /// A missing fragment on a failed command is reported with the agent's
    /// own `text`, since that is the more useful diagnosis.
    pub fn fragment<T: DeserializeOwned>(
        &self,
        command: Command,
        key: &str,
    ) -> Result<T, Error> {
        let Some(value) = self.arguments.as_ref().and_then(|args| args.get(key)) else {
            return Err(self.missing(command, key));
        };
        decode_fragment(command, key, value)
    }

    /// Decode the whole `arguments` map as one record.
    pub fn arguments_as<T: DeserializeOwned>(&self, command: Command) -> Result<T, Error> {
        let Some(args) = self.arguments.as_ref() else {
            return Err(self.missing(command, "arguments"));
        };
        serde_json::from_value(serde_json::Value::Object(args.clone())).map_err(|source| {
            Error::Fragment {
                command: command.as_str(),
                key: "arguments".into(),
                source,
            }
        })
    }

    /// Human-readable message, empty when the agent sent none.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    pub fn is_success(&self) -> bool {
        self.result == RESULT_SUCCESS
    }

    fn missing(&self, command: Command, key: &str) -> Error {
        if self.result == RESULT_SUCCESS || self.result == RESULT_EMPTY {
            Error::MissingFragment {
                command: command.as_str(),
                key: key.to_owned(),
            }
        } else {
            Error::Command {
                command: command.as_str(),
                result: self.result,
                text: self.text().to_owned(),
            }
        }
    }
}

/// Decode a nested fragment (e.g. `subnet4` inside `Dhcp4`).
pub fn decode_fragment<T: DeserializeOwned>(
    command: Command,
    key: &str,
    value: &serde_json::Value,
) -> Result<T, Error> {
    T::deserialize(value).map_err(|source| Error::Fragment {
        command: command.as_str(),
        key: key.to_owned(),
        source,
    })
}

/// `(result, text)` of a command whose failure is a normal outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub result: i64,
    pub text: String,
}

impl CommandOutcome {
    pub fn is_success(&self) -> bool {
        self.result == RESULT_SUCCESS
    }
}

// ── Configuration ────────────────────────────────────────────────────

/// A `subnet4` entry from `config-get`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subnet4 {
    pub id: u32,
    pub subnet: String,
    #[serde(default, rename = "4o6-interface")]
    pub four_o_six_interface: String,
    #[serde(default, rename = "4o6-interface-id")]
    pub four_o_six_interface_id: String,
    #[serde(default, rename = "4o6-subnet")]
    pub four_o_six_subnet: String,
    #[serde(default, rename = "calculate-tee-times")]
    pub calculate_tee_times: bool,
    #[serde(default, rename = "option-data")]
    pub option_data: Vec<OptionData>,
    #[serde(default)]
    pub pools: Vec<Pool>,
    #[serde(default, rename = "rebind-timer")]
    pub rebind_timer: u32,
    #[serde(default)]
    pub relay: Option<serde_json::Value>,
    #[serde(default, rename = "renew-timer")]
    pub renew_timer: u32,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
    #[serde(default, rename = "store-extended-info")]
    pub store_extended_info: bool,
    #[serde(default, rename = "t1-percent")]
    pub t1_percent: Option<f32>,
    #[serde(default, rename = "t2-percent")]
    pub t2_percent: Option<f32>,
    #[serde(default, rename = "valid-lifetime")]
    pub valid_lifetime: u32,
}

/// An address pool: `"10.0.0.10 - 10.0.0.200"` or a prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pool {
    pub pool: String,
    #[serde(default, rename = "option-data")]
    pub option_data: Vec<OptionData>,
}

/// A DHCP option value attached to a subnet, pool or reservation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionData {
    #[serde(default, rename = "always-send")]
    pub always_send: bool,
    #[serde(default)]
    pub code: u16,
    #[serde(default, rename = "csv-format")]
    pub csv_format: bool,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub space: String,
}

/// A static host reservation inside a subnet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(default, rename = "boot-file-name")]
    pub boot_file_name: String,
    #[serde(default, rename = "client-classes")]
    pub client_classes: Vec<String>,
    #[serde(default)]
    pub hostname: String,
    #[serde(default, rename = "hw-address")]
    pub hw_address: String,
    #[serde(default, rename = "ip-address")]
    pub ip_address: String,
    #[serde(default, rename = "next-server")]
    pub next_server: String,
    #[serde(default, rename = "option-data")]
    pub option_data: Vec<OptionData>,
    #[serde(default, rename = "server-hostname")]
    pub server_hostname: String,
}

// ── Leases ───────────────────────────────────────────────────────────

/// A lease from `lease4-get-all`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lease4 {
    #[serde(default, rename = "client-id")]
    pub client_id: String,
    /// Client last transmission time, Unix seconds.
    #[serde(default)]
    pub cltt: i64,
    #[serde(default, rename = "fqdn-fwd")]
    pub fqdn_fwd: bool,
    #[serde(default, rename = "fqdn-rev")]
    pub fqdn_rev: bool,
    #[serde(default)]
    pub hostname: String,
    #[serde(default, rename = "hw-address")]
    pub hw_address: String,
    #[serde(rename = "ip-address")]
    pub ip_address: String,
    /// 0=default, 1=declined, 2=expired-reclaimed
    #[serde(default)]
    pub state: i32,
    #[serde(default, rename = "subnet-id")]
    pub subnet_id: u32,
    #[serde(default, rename = "valid-lft")]
    pub valid_lft: u32,
}

// ── Status ───────────────────────────────────────────────────────────

/// Daemon status from `status-get`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerStatus {
    #[serde(default)]
    pub pid: u32,
    /// Seconds since the daemon started.
    #[serde(default)]
    pub uptime: u64,
    /// Seconds since the last configuration reload.
    #[serde(default)]
    pub reload: u64,
    #[serde(default, rename = "multi-threading-enabled")]
    pub multi_threading_enabled: bool,
    #[serde(default, rename = "high-availability")]
    pub high_availability: Option<serde_json::Value>,
}
