// ── Table view model ──
//
// What the table panel shows for each display mode, as plain text cells
// with a semantic tone. The TUI maps tones to colors; search and delete
// read the same cell text the operator sees.

use chrono::{DateTime, Local};
use strum::IntoEnumIterator;

use crate::model::{Lease, LeaseColumn, LeaseState, OptionData, SortSpec, Subnet};

/// Which view the table panel renders for the selected subnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Leases,
    Reservations,
    SubnetInfo,
}

impl DisplayMode {
    /// Next mode, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::Leases => Self::Reservations,
            Self::Reservations => Self::SubnetInfo,
            Self::SubnetInfo => Self::Leases,
        }
    }

    /// Panel title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Leases => "Leases",
            Self::Reservations => "Reservations",
            Self::SubnetInfo => "Subnet Information",
        }
    }
}

/// Semantic color of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellTone {
    #[default]
    Plain,
    /// Column header or row label.
    Label,
    Good,
    Bad,
    Warn,
}

impl From<LeaseState> for CellTone {
    fn from(state: LeaseState) -> Self {
        match state {
            LeaseState::Default => Self::Good,
            LeaseState::Declined => Self::Bad,
            LeaseState::ExpiredReclaimed => Self::Warn,
            LeaseState::Unknown(_) => Self::Plain,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    pub text: String,
    pub tone: CellTone,
    pub bold: bool,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn label(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: CellTone::Label,
            bold: false,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl AsRef<str> for Cell {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// The table panel's content plus its cursor/scroll state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableView {
    pub mode: DisplayMode,
    /// Header cells; empty for the subnet information view.
    pub header: Vec<Cell>,
    pub rows: Vec<Vec<Cell>>,
    /// Sort in effect, for lease tables.
    pub sort: Option<SortSpec>,
    /// Whether rows can be selected (otherwise the table only scrolls).
    pub selectable: bool,
    /// Selected data row.
    pub selected: Option<usize>,
    /// First visible data row while not selectable.
    pub row_offset: usize,
    /// Number of leading columns scrolled out of view.
    pub column_offset: usize,
}

impl TableView {
    /// An empty table titled for `mode`.
    pub fn empty(mode: DisplayMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Lease table: leases must already be sorted by `sort`.
    pub fn leases(subnet: &Subnet, leases: &[Lease], sort: SortSpec) -> Self {
        let header = LeaseColumn::iter().map(|c| Cell::label(c.label())).collect();
        let rows = leases
            .iter()
            .map(|lease| {
                let reserved = subnet.is_reserved(&lease.ip_address);
                let hostname = if reserved {
                    format!("*{}", lease.hostname)
                } else {
                    lease.hostname.clone()
                };
                LeaseColumn::iter()
                    .map(|column| match column {
                        LeaseColumn::Hostname => Cell {
                            text: hostname.clone(),
                            tone: CellTone::Plain,
                            bold: reserved,
                        },
                        LeaseColumn::IpAddress => Cell::plain(&lease.ip_address),
                        LeaseColumn::HwAddress => Cell::plain(&lease.hw_address),
                        LeaseColumn::State => Cell {
                            text: lease.state.label().to_owned(),
                            tone: lease.state.into(),
                            bold: false,
                        },
                        LeaseColumn::Timestamp => Cell::plain(format_timestamp(lease.cltt)),
                        LeaseColumn::ClientId => Cell::plain(&lease.client_id),
                    })
                    .collect()
            })
            .collect();

        Self {
            mode: DisplayMode::Leases,
            header,
            rows,
            sort: Some(sort),
            ..Self::default()
        }
    }

    /// Reservation table, in configuration order.
    pub fn reservations(subnet: &Subnet) -> Self {
        let header = [
            "IP",
            "MAC",
            "Hostname",
            "Bootfile",
            "Next Server",
            "Server Hostname",
        ]
        .into_iter()
        .map(Cell::label)
        .collect();
        let rows = subnet
            .reservations
            .iter()
            .map(|r| {
                vec![
                    Cell::plain(&r.ip_address),
                    Cell::plain(&r.hw_address),
                    Cell::plain(&r.hostname),
                    Cell::plain(&r.boot_file_name),
                    Cell::plain(&r.next_server),
                    Cell::plain(&r.server_hostname),
                ]
            })
            .collect();

        Self {
            mode: DisplayMode::Reservations,
            header,
            rows,
            ..Self::default()
        }
    }

    /// Key/value sheet of subnet settings, pools and options.
    pub fn subnet_info(subnet: &Subnet) -> Self {
        let mut rows = vec![
            vec![Cell::label("Subnet"), Cell::plain(&subnet.subnet)],
            vec![
                Cell::label("Valid-lifetime"),
                Cell::plain(humantime::format_duration(subnet.valid_lifetime).to_string()),
            ],
            vec![
                Cell::label("Rebind-timer"),
                Cell::plain(humantime::format_duration(subnet.rebind_timer).to_string()),
            ],
            vec![
                Cell::label("Renew-timer"),
                Cell::plain(humantime::format_duration(subnet.renew_timer).to_string()),
            ],
            vec![Cell::label("ID"), Cell::plain(subnet.id.to_string())],
        ];

        for pool in &subnet.pools {
            let (start, end) = pool.bounds();
            rows.push(vec![Cell::label("Pool"), Cell::plain(start)]);
            if let Some(end) = end {
                rows.push(vec![Cell::empty(), Cell::plain(end)]);
            }
        }

        for option in &subnet.option_data {
            rows.extend(option_rows(option));
        }

        Self {
            mode: DisplayMode::SubnetInfo,
            rows,
            ..Self::default()
        }
    }

    pub fn title(&self) -> &'static str {
        self.mode.title()
    }

    /// Widest row, header included.
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or_default()
    }

    /// Text of one cell, empty when out of range.
    pub fn cell_text(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map_or("", |c| c.text.as_str())
    }

    /// Address of the selected lease row, when a row is selected.
    pub fn selected_lease_address(&self) -> Option<&str> {
        if self.mode != DisplayMode::Leases || !self.selectable {
            return None;
        }
        let row = self.selected?;
        self.rows
            .get(row)
            .and_then(|r| r.get(LeaseColumn::IpAddress.index()))
            .map(|c| c.text.as_str())
    }

    /// Move the cursor by `delta` rows: the selection when rows are
    /// selectable, the scroll offset otherwise.
    pub fn move_rows(&mut self, delta: isize) {
        let Some(last) = self.rows.len().checked_sub(1) else {
            return;
        };
        if self.selectable {
            self.selected = Some(match self.selected {
                Some(row) => row.saturating_add_signed(delta).min(last),
                None if delta > 0 => 0,
                None => return,
            });
        } else {
            self.row_offset = self.row_offset.saturating_add_signed(delta).min(last);
        }
    }

    /// Scroll columns horizontally, keeping at least one column in view.
    pub fn scroll_columns(&mut self, delta: isize) {
        let last = self.column_count().saturating_sub(1);
        self.column_offset = self.column_offset.saturating_add_signed(delta).min(last);
    }

    pub fn toggle_selectable(&mut self) {
        self.selectable = !self.selectable;
    }

    /// Select `row`, switching the table into selectable mode.
    pub fn select_row(&mut self, row: usize) {
        self.selectable = true;
        self.selected = Some(row);
        self.column_offset = 0;
    }
}

fn option_rows(option: &OptionData) -> Vec<Vec<Cell>> {
    vec![
        vec![
            Cell::label("Option-data"),
            Cell::label("Name"),
            Cell::plain(&option.name),
        ],
        vec![Cell::empty(), Cell::label("Data"), Cell::plain(&option.data)],
        vec![
            Cell::empty(),
            Cell::label("Code"),
            Cell::plain(option.code.to_string()),
        ],
        vec![Cell::empty(), Cell::label("Space"), Cell::plain(&option.space)],
        vec![
            Cell::empty(),
            Cell::label("CSV-Format"),
            Cell::plain(option.csv_format.to_string()),
        ],
    ]
}

/// Local wall-clock rendering of a Unix timestamp.
pub fn format_timestamp(unix_secs: i64) -> String {
    DateTime::from_timestamp(unix_secs, 0)
        .map(|t| {
            t.with_timezone(&Local)
                .format("%Y-%m-%dT%H:%M:%S")
                .to_string()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Pool, Reservation};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn subnet() -> Subnet {
        Subnet {
            id: 12,
            subnet: "10.0.0.0/24".into(),
            reservations: vec![Reservation {
                ip_address: "10.0.0.5".into(),
                hw_address: "aa:aa:aa:aa:aa:05".into(),
                hostname: "printer".into(),
                boot_file_name: "pxelinux.0".into(),
                ..Reservation::default()
            }],
            pools: vec![Pool {
                pool: "10.0.0.100 - 10.0.0.199".into(),
                option_data: Vec::new(),
            }],
            option_data: vec![OptionData {
                name: "routers".into(),
                data: "10.0.0.1".into(),
                code: 3,
                space: "dhcp4".into(),
                ..OptionData::default()
            }],
            renew_timer: Duration::from_secs(900),
            rebind_timer: Duration::from_secs(1800),
            valid_lifetime: Duration::from_secs(3600),
        }
    }

    fn lease(ip: &str, hostname: &str, state: LeaseState) -> Lease {
        Lease {
            subnet_id: 12,
            hostname: hostname.into(),
            ip_address: ip.into(),
            hw_address: "bb:bb:bb:bb:bb:bb".into(),
            client_id: String::new(),
            state,
            cltt: 0,
            valid_lifetime: Duration::from_secs(3600),
            fqdn_fwd: false,
            fqdn_rev: false,
        }
    }

    #[test]
    fn display_mode_cycles_through_all_three() {
        let mode = DisplayMode::default();
        assert_eq!(mode, DisplayMode::Leases);
        assert_eq!(mode.next(), DisplayMode::Reservations);
        assert_eq!(mode.next().next(), DisplayMode::SubnetInfo);
        assert_eq!(mode.next().next().next(), DisplayMode::Leases);
        assert_eq!(DisplayMode::SubnetInfo.title(), "Subnet Information");
    }

    #[test]
    fn reserved_lease_is_flagged() {
        let leases = [
            lease("10.0.0.5", "printer", LeaseState::Default),
            lease("10.0.0.6", "laptop", LeaseState::Declined),
        ];
        let view = TableView::leases(&subnet(), &leases, SortSpec::default());

        assert_eq!(view.rows[0][0].text, "*printer");
        assert!(view.rows[0][0].bold);
        assert_eq!(view.rows[1][0].text, "laptop");
        assert!(!view.rows[1][0].bold);
        assert_eq!(view.rows[1][3].text, "declined");
        assert_eq!(view.rows[1][3].tone, CellTone::Bad);
    }

    #[test]
    fn lease_header_follows_column_order() {
        let view = TableView::leases(&subnet(), &[], SortSpec::default());
        let header: Vec<&str> = view.header.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(
            header,
            vec!["Hostname", "IP", "MAC", "State", "Timestamp", "Client ID"]
        );
        assert_eq!(view.title(), "Leases");
    }

    #[test]
    fn reservations_view_lists_configured_hosts() {
        let view = TableView::reservations(&subnet());
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.cell_text(0, 0), "10.0.0.5");
        assert_eq!(view.cell_text(0, 3), "pxelinux.0");
        assert_eq!(view.title(), "Reservations");
    }

    #[test]
    fn subnet_info_sheet() {
        let view = TableView::subnet_info(&subnet());
        assert!(view.header.is_empty());
        assert_eq!(view.cell_text(1, 1), "1h");
        assert_eq!(view.cell_text(2, 1), "30m");
        assert_eq!(view.cell_text(3, 1), "15m");
        assert_eq!(view.cell_text(4, 1), "12");
        assert_eq!(view.cell_text(5, 0), "Pool");
        assert_eq!(view.cell_text(5, 1), "10.0.0.100");
        assert_eq!(view.cell_text(6, 1), "10.0.0.199");
        assert_eq!(view.cell_text(7, 2), "routers");
        assert_eq!(view.cell_text(9, 2), "3");
        assert_eq!(view.cell_text(11, 2), "false");
        assert_eq!(view.column_count(), 3);
    }

    #[test]
    fn selected_address_requires_selectable_lease_row() {
        let leases = [lease("10.0.0.9", "pc", LeaseState::Default)];
        let mut view = TableView::leases(&subnet(), &leases, SortSpec::default());
        assert_eq!(view.selected_lease_address(), None);

        view.move_rows(1);
        assert_eq!(view.selected, None);

        view.toggle_selectable();
        view.move_rows(1);
        assert_eq!(view.selected_lease_address(), Some("10.0.0.9"));
    }

    #[test]
    fn row_movement_is_bounded() {
        let leases = [
            lease("10.0.0.1", "a", LeaseState::Default),
            lease("10.0.0.2", "b", LeaseState::Default),
        ];
        let mut view = TableView::leases(&subnet(), &leases, SortSpec::default());
        view.move_rows(5);
        assert_eq!(view.row_offset, 1);
        view.move_rows(-9);
        assert_eq!(view.row_offset, 0);

        view.select_row(0);
        view.move_rows(-1);
        assert_eq!(view.selected, Some(0));
        view.move_rows(3);
        assert_eq!(view.selected, Some(1));
    }

    #[test]
    fn column_scroll_is_bounded() {
        let mut view = TableView::reservations(&subnet());
        view.scroll_columns(-1);
        assert_eq!(view.column_offset, 0);
        view.scroll_columns(10);
        assert_eq!(view.column_offset, 5);
    }
}
