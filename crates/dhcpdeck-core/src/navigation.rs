// ── Navigation state machine ──
//
// One explicit state object owned by the event loop. Every user action is
// handled to completion, remote calls included, before the next one is
// read. Errors from the backend are returned to the caller, which treats
// them as fatal; a refused lease deletion is not an error and only
// changes the status line.

use tracing::{debug, info, warn};

use crate::backend::LeaseBackend;
use crate::error::CoreError;
use crate::model::{LeaseColumn, SortSpec, Subnet, sort_leases, sort_subnets};
use crate::search::{self, Direction};
use crate::view::{DisplayMode, TableView};

/// Which element receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Subnets,
    Table,
    SearchInput,
}

/// All user commands the state machine understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Open the subnet under the list cursor.
    SelectSubnet,
    /// Move the list cursor to `index` and open that subnet.
    ClickSubnet(usize),
    MoveUp,
    MoveDown,
    /// Left / `h`: scroll the table left, or leave it at column 0.
    MoveLeft,
    /// Right / `l`: enter the table, or scroll it right.
    MoveRight,
    /// Tab: switch between the subnet list and the table.
    SwitchPanel,
    CycleDisplayMode,
    ToggleSort(LeaseColumn),
    ToggleRowSelection,
    BeginSearch,
    CommitSearch(String),
    CancelSearch,
    SearchNext,
    SearchPrevious,
    DeleteSelectedLease,
    ShowServerStatus,
    Quit,
}

/// What the event loop should do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The dashboard's complete interactive state.
pub struct Navigator<B> {
    backend: B,
    subnets: Vec<Subnet>,
    /// Highlighted entry of the subnet list.
    cursor: usize,
    /// Subnet the table was last built for.
    shown: Option<usize>,
    focus: Focus,
    /// Panel a pending search applies to, and where focus returns.
    search_target: Focus,
    display_mode: DisplayMode,
    sort: SortSpec,
    table: TableView,
    last_query: String,
    status: String,
}

impl<B: LeaseBackend> Navigator<B> {
    /// Fetch the subnet list and build the initial state.
    pub async fn load(backend: B, status: impl Into<String>) -> Result<Self, CoreError> {
        let subnets = backend.fetch_subnets().await?;
        info!(count = subnets.len(), "subnets fetched");
        Ok(Self::new(backend, subnets, status))
    }

    /// Build the initial state from an already fetched subnet list.
    pub fn new(backend: B, mut subnets: Vec<Subnet>, status: impl Into<String>) -> Self {
        sort_subnets(&mut subnets);
        Self {
            backend,
            subnets,
            cursor: 0,
            shown: None,
            focus: Focus::Subnets,
            search_target: Focus::Subnets,
            display_mode: DisplayMode::Leases,
            sort: SortSpec::default(),
            table: TableView::empty(DisplayMode::Leases),
            last_query: String::new(),
            status: status.into(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────

    pub fn subnets(&self) -> &[Subnet] {
        &self.subnets
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn table(&self) -> &TableView {
        &self.table
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn last_query(&self) -> &str {
        &self.last_query
    }

    /// Subnet the table currently shows.
    pub fn shown_subnet(&self) -> Option<&Subnet> {
        self.shown.and_then(|index| self.subnets.get(index))
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ── Dispatch ──────────────────────────────────────────────────────

    /// Apply one action. Actions that make no sense in the current state
    /// are ignored.
    pub async fn handle(&mut self, action: Action) -> Result<Flow, CoreError> {
        debug!(?action, focus = ?self.focus, "handling action");
        match action {
            Action::Quit => {
                if self.focus != Focus::SearchInput {
                    return Ok(Flow::Quit);
                }
            }
            Action::SelectSubnet => self.rebuild(self.cursor).await?,
            Action::ClickSubnet(index) => {
                if index < self.subnets.len() && self.focus != Focus::SearchInput {
                    self.cursor = index;
                    self.focus = Focus::Subnets;
                    self.rebuild(index).await?;
                }
            }
            Action::MoveUp => self.move_vertical(-1),
            Action::MoveDown => self.move_vertical(1),
            Action::MoveLeft => self.move_left(),
            Action::MoveRight => self.move_right(),
            Action::SwitchPanel => {
                self.focus = match self.focus {
                    Focus::Subnets => Focus::Table,
                    Focus::Table => Focus::Subnets,
                    Focus::SearchInput => Focus::SearchInput,
                };
            }
            Action::CycleDisplayMode => self.cycle_display_mode().await?,
            Action::ToggleSort(column) => self.toggle_sort(column).await?,
            Action::ToggleRowSelection => {
                if self.focus == Focus::Table {
                    self.table.toggle_selectable();
                }
            }
            Action::BeginSearch => {
                if self.focus != Focus::SearchInput {
                    self.search_target = self.focus;
                    self.focus = Focus::SearchInput;
                }
            }
            Action::CommitSearch(query) => {
                if self.focus == Focus::SearchInput {
                    self.focus = self.search_target;
                    self.last_query = query;
                    self.search(Direction::Forward);
                }
            }
            Action::CancelSearch => {
                if self.focus == Focus::SearchInput {
                    self.focus = self.search_target;
                }
            }
            Action::SearchNext => self.search(Direction::Forward),
            Action::SearchPrevious => self.search(Direction::Backward),
            Action::DeleteSelectedLease => self.delete_selected_lease().await?,
            Action::ShowServerStatus => {
                if self.focus != Focus::SearchInput {
                    let status = self.backend.fetch_status().await?;
                    self.status = status.to_string();
                }
            }
        }
        Ok(Flow::Continue)
    }

    // ── Table construction ────────────────────────────────────────────

    /// Rebuild the table for the current display mode against subnet
    /// `index`, fetching leases afresh in lease mode.
    async fn rebuild(&mut self, index: usize) -> Result<(), CoreError> {
        let Some(subnet) = self.subnets.get(index) else {
            return Ok(());
        };

        let table = match self.display_mode {
            DisplayMode::Leases => {
                let mut leases = self.backend.fetch_leases(subnet.id).await?;
                sort_leases(&mut leases, self.sort);
                TableView::leases(subnet, &leases, self.sort)
            }
            DisplayMode::Reservations => TableView::reservations(subnet),
            DisplayMode::SubnetInfo => TableView::subnet_info(subnet),
        };
        debug!(
            subnet = %subnet.subnet,
            mode = ?self.display_mode,
            rows = table.rows.len(),
            "table rebuilt"
        );

        let selectable = self.table.selectable;
        self.table = TableView {
            selectable,
            ..table
        };
        self.shown = Some(index);
        Ok(())
    }

    async fn cycle_display_mode(&mut self) -> Result<(), CoreError> {
        if self.subnets.is_empty() {
            return Ok(());
        }
        self.display_mode = self.display_mode.next();
        self.rebuild(self.cursor).await
    }

    async fn toggle_sort(&mut self, column: LeaseColumn) -> Result<(), CoreError> {
        if self.display_mode != DisplayMode::Leases {
            return Ok(());
        }
        let Some(index) = self.shown else {
            return Ok(());
        };
        self.sort = self.sort.toggled(column);
        debug!(sort = ?self.sort, "lease sort changed");
        self.rebuild(index).await
    }

    // ── Cursor movement ───────────────────────────────────────────────

    fn move_vertical(&mut self, delta: isize) {
        match self.focus {
            Focus::Subnets => {
                let last = self.subnets.len().saturating_sub(1);
                self.cursor = self.cursor.saturating_add_signed(delta).min(last);
            }
            Focus::Table => self.table.move_rows(delta),
            Focus::SearchInput => {}
        }
    }

    fn move_left(&mut self) {
        if self.focus != Focus::Table {
            return;
        }
        if self.table.column_offset == 0 {
            self.focus = Focus::Subnets;
        } else {
            self.table.scroll_columns(-1);
        }
    }

    fn move_right(&mut self) {
        match self.focus {
            Focus::Subnets => self.focus = Focus::Table,
            Focus::Table => self.table.scroll_columns(1),
            Focus::SearchInput => {}
        }
    }

    // ── Search ────────────────────────────────────────────────────────

    /// Search the focused panel for the last committed query.
    fn search(&mut self, direction: Direction) {
        let query = self.last_query.as_str();
        let found = match self.focus {
            Focus::Subnets => {
                let names: Vec<&str> = self.subnets.iter().map(|s| s.subnet.as_str()).collect();
                search::find_in_list(&names, self.cursor, query, direction)
                    .map(|index| self.cursor = index)
                    .is_some()
            }
            Focus::Table => {
                search::find_in_grid(&self.table.rows, self.table.selected, query, direction)
                    .map(|row| self.table.select_row(row))
                    .is_some()
            }
            Focus::SearchInput => return,
        };
        self.status = search::status_message(query, direction, found);
    }

    // ── Remote mutations ──────────────────────────────────────────────

    /// Delete the lease on the selected row. The table is left as is.
    async fn delete_selected_lease(&mut self) -> Result<(), CoreError> {
        if self.focus != Focus::Table {
            return Ok(());
        }
        let Some(address) = self.table.selected_lease_address().map(str::to_owned) else {
            return Ok(());
        };

        let outcome = self.backend.delete_lease(&address).await?;
        if outcome.result == 0 {
            info!(%address, "lease deleted");
        } else {
            warn!(%address, result = outcome.result, text = %outcome.text, "lease not deleted");
        }
        self.status = outcome.text;
        Ok(())
    }
}
