// ── Server status ──

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// DHCPv4 daemon status, as shown in the status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStatus {
    pub pid: u32,
    pub uptime: Duration,
    pub since_reload: Duration,
    pub multi_threading: bool,
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pid {}, uptime {}, reload {}",
            self.pid,
            humantime::format_duration(self.uptime),
            humantime::format_duration(self.since_reload),
        )?;
        if self.multi_threading {
            f.write_str(", multi-threaded")?;
        }
        Ok(())
    }
}
