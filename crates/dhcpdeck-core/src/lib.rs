// dhcpdeck-core: Domain model, search and navigation state between dhcpdeck-api and the TUI.

pub mod backend;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod navigation;
pub mod search;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use backend::{DeleteOutcome, LeaseBackend};
pub use config::ConnectionConfig;
pub use error::CoreError;
pub use navigation::{Action, Flow, Focus, Navigator};
pub use search::Direction;
pub use view::{Cell, CellTone, DisplayMode, TableView};

// The production backend.
pub use dhcpdeck_api::KeaClient;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Lease, LeaseColumn, LeaseState, OptionData, Pool, Reservation, ServerStatus, SortSpec, Subnet,
};
