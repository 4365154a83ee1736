//! Application core: event loop, key and mouse dispatch, frame rendering.
//!
//! The navigator owns all dashboard state; this module only translates
//! terminal events into navigator actions and draws what it holds.

use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Cell as TableCell, List, ListItem, ListState, Paragraph, Row,
        Table, TableState,
    },
};
use tracing::{error, info};
use tui_input::Input;

use dhcpdeck_core::{
    Action, DisplayMode, Flow, Focus, LeaseBackend, LeaseColumn, Navigator, TableView,
};

use crate::event::{Event, EventReader};
use crate::keymap::{self, KeyIntent};
use crate::theme;
use crate::tui::Tui;

const RENDER_RATE: Duration = Duration::from_millis(33);

/// Gap between table columns.
const COLUMN_SPACING: u16 = 1;

/// Inner areas of the last drawn frame, for mouse hit-testing.
#[derive(Debug, Clone, Copy, Default)]
struct Areas {
    subnets: Rect,
    table: Rect,
}

/// Top-level application state and event loop.
pub struct App<B> {
    navigator: Navigator<B>,
    /// Search line editor, live while focus is on the search input.
    search: Input,
    areas: Areas,
    running: bool,
}

impl<B: LeaseBackend> App<B> {
    pub fn new(navigator: Navigator<B>) -> Self {
        Self {
            navigator,
            search: Input::default(),
            areas: Areas::default(),
            running: true,
        }
    }

    /// Run the main event loop until the operator quits or a control agent
    /// call fails.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::enter()?;

        let mut events = EventReader::new(RENDER_RATE);
        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => self.handle_key_event(key).await?,
                Event::Mouse(mouse) => self.handle_mouse_event(mouse).await?,
                Event::Resize(..) | Event::Render => tui.draw(|frame| self.render(frame))?,
            }
        }

        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    async fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        let Some(intent) = keymap::map_key(self.navigator.focus(), key) else {
            return Ok(());
        };

        match intent {
            KeyIntent::Exit => self.running = false,
            KeyIntent::Edit(request) => {
                self.search.handle(request);
            }
            KeyIntent::SubmitSearch => {
                let query = self.search.value().to_owned();
                self.search.reset();
                self.dispatch(Action::CommitSearch(query)).await?;
            }
            KeyIntent::Navigate(action) => {
                if matches!(action, Action::BeginSearch | Action::CancelSearch) {
                    self.search.reset();
                }
                self.dispatch(action).await?;
            }
        }
        Ok(())
    }

    async fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<()> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(());
        }
        if let Some(action) = self.mouse_action(mouse.column, mouse.row) {
            self.dispatch(action).await?;
        }
        Ok(())
    }

    /// Action for a left click at terminal cell (`x`, `y`).
    fn mouse_action(&self, x: u16, y: u16) -> Option<Action> {
        if self.navigator.focus() == Focus::SearchInput {
            return None;
        }
        let position = Position { x, y };

        let subnets = self.areas.subnets;
        if subnets.contains(position) {
            let height = usize::from(subnets.height);
            let index =
                list_offset(self.navigator.cursor(), height) + usize::from(y - subnets.y);
            return (index < self.navigator.subnets().len()).then_some(Action::ClickSubnet(index));
        }

        let table = self.areas.table;
        let view = self.navigator.table();
        if table.contains(position)
            && y == table.y
            && view.mode == DisplayMode::Leases
            && !view.header.is_empty()
        {
            let widths = column_widths(view);
            return column_at(&widths, view.column_offset, x - table.x)
                .and_then(LeaseColumn::from_index)
                .map(Action::ToggleSort);
        }
        None
    }

    async fn dispatch(&mut self, action: Action) -> Result<()> {
        let flow = self
            .navigator
            .handle(action)
            .await
            .inspect_err(|err| error!(%err, "control agent call failed"))?;
        if flow == Flow::Quit {
            self.running = false;
        }
        Ok(())
    }

    // ── Rendering ─────────────────────────────────────────────────────

    fn render(&mut self, frame: &mut Frame) {
        let [main, status] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

        let list_width = self
            .navigator
            .subnets()
            .iter()
            .map(|s| s.subnet.len())
            .max()
            .unwrap_or_default()
            .saturating_add(4)
            .max(12);
        let list_width = u16::try_from(list_width)
            .unwrap_or(u16::MAX)
            .min(main.width / 3);
        let [subnets, table] =
            Layout::horizontal([Constraint::Length(list_width), Constraint::Min(1)]).areas(main);

        self.render_subnets(frame, subnets);
        self.render_table(frame, table);
        self.render_status_line(frame, status);
    }

    fn render_subnets(&mut self, frame: &mut Frame, area: Rect) {
        let block = panel_block("Subnets", self.navigator.focus() == Focus::Subnets);
        let inner = block.inner(area);
        self.areas.subnets = inner;

        let items: Vec<ListItem> = self
            .navigator
            .subnets()
            .iter()
            .map(|s| ListItem::new(s.subnet.as_str()).style(theme::status_bar()))
            .collect();
        let cursor = self.navigator.cursor();
        let mut state = ListState::default()
            .with_offset(list_offset(cursor, usize::from(inner.height)))
            .with_selected((!items.is_empty()).then_some(cursor));

        let list = List::new(items)
            .block(block)
            .highlight_style(theme::table_selected());
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect) {
        let view = self.navigator.table();
        let block = panel_block(view.title(), self.navigator.focus() == Focus::Table);
        let inner = block.inner(area);
        self.areas.table = inner;

        let offset = view.column_offset;
        let widths = column_widths(view);
        let constraints: Vec<Constraint> = widths
            .iter()
            .skip(offset)
            .map(|w| Constraint::Length(*w))
            .collect();

        let rows = view.rows.iter().map(|row| {
            Row::new(
                row.iter()
                    .skip(offset)
                    .map(|cell| TableCell::from(cell.text.as_str()).style(theme::cell_style(cell))),
            )
        });

        let mut table = Table::new(rows, constraints)
            .block(block)
            .column_spacing(COLUMN_SPACING)
            .row_highlight_style(theme::table_selected());

        let mut body_height = usize::from(inner.height);
        if !view.header.is_empty() {
            let header = (0..view.header.len())
                .skip(offset)
                .map(|index| TableCell::from(header_label(view, index)));
            table = table.header(Row::new(header).style(theme::table_header()));
            body_height = body_height.saturating_sub(1);
        }

        let mut state = if view.selectable {
            let first = view
                .selected
                .map_or(0, |row| row.saturating_sub(body_height.saturating_sub(1)));
            TableState::new()
                .with_offset(first)
                .with_selected(view.selected)
        } else {
            TableState::new().with_offset(view.row_offset)
        };
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect) {
        if self.navigator.focus() != Focus::SearchInput {
            let line = Line::from(Span::styled(self.navigator.status(), theme::status_bar()));
            frame.render_widget(Paragraph::new(line), area);
            return;
        }

        let [prompt, input] =
            Layout::horizontal([Constraint::Length(1), Constraint::Min(1)]).areas(area);
        frame.render_widget(Paragraph::new(Span::styled("/", theme::search_prompt())), prompt);

        let width = usize::from(input.width.max(1) - 1);
        let scroll = self.search.visual_scroll(width);
        let paragraph = Paragraph::new(self.search.value())
            .style(theme::status_bar())
            .scroll((0, u16::try_from(scroll).unwrap_or(u16::MAX)));
        frame.render_widget(paragraph, input);

        let cursor = self.search.visual_cursor().max(scroll) - scroll;
        frame.set_cursor_position(Position {
            x: input.x + u16::try_from(cursor).unwrap_or(u16::MAX),
            y: input.y,
        });
    }
}

fn panel_block(title: &str, focused: bool) -> Block<'static> {
    let border = if focused {
        theme::border_focused()
    } else {
        theme::border_default()
    };
    Block::default()
        .title(format!(" {title} "))
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
}

/// Header text, marked with the sort direction on the sorted column.
fn header_label(view: &TableView, index: usize) -> String {
    let text = view.header.get(index).map_or("", |c| c.text.as_str());
    match view.sort {
        Some(sort) if sort.column.index() == index => {
            let arrow = if sort.ascending { '▲' } else { '▼' };
            format!("{text} {arrow}")
        }
        _ => text.to_owned(),
    }
}

/// Display width of every column: the widest of its header and cells.
fn column_widths(view: &TableView) -> Vec<u16> {
    (0..view.column_count())
        .map(|column| {
            let header = header_label(view, column).chars().count();
            let widest = (0..view.rows.len())
                .map(|row| view.cell_text(row, column).chars().count())
                .max()
                .unwrap_or_default()
                .max(header);
            u16::try_from(widest).unwrap_or(u16::MAX)
        })
        .collect()
}

/// Column under horizontal position `x`, relative to the table's inner area,
/// with the first `offset` columns scrolled out of view.
fn column_at(widths: &[u16], offset: usize, x: u16) -> Option<usize> {
    let mut start = 0u16;
    for (index, width) in widths.iter().enumerate().skip(offset) {
        let end = start.saturating_add(*width);
        if x < end {
            return Some(index);
        }
        start = end.saturating_add(COLUMN_SPACING);
        if x < start {
            return None;
        }
    }
    None
}

/// First visible list entry that keeps `cursor` on screen.
fn list_offset(cursor: usize, height: usize) -> usize {
    cursor.saturating_sub(height.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dhcpdeck_core::{Cell, SortSpec};
    use pretty_assertions::assert_eq;

    fn lease_view() -> TableView {
        TableView {
            mode: DisplayMode::Leases,
            header: ["Hostname", "IP", "MAC"].into_iter().map(Cell::label).collect(),
            rows: vec![vec![
                Cell::plain("printer-on-the-third-floor"),
                Cell::plain("10.0.0.5"),
                Cell::plain("aa:aa:aa:aa:aa:05"),
            ]],
            sort: Some(SortSpec {
                column: LeaseColumn::IpAddress,
                ascending: false,
            }),
            ..TableView::default()
        }
    }

    #[test]
    fn sorted_header_carries_direction() {
        let view = lease_view();
        assert_eq!(header_label(&view, 0), "Hostname");
        assert_eq!(header_label(&view, 1), "IP ▼");
    }

    #[test]
    fn widths_cover_header_and_cells() {
        assert_eq!(column_widths(&lease_view()), vec![26, 8, 17]);
    }

    #[test]
    fn click_maps_to_column() {
        let widths = [4, 2, 3];
        assert_eq!(column_at(&widths, 0, 0), Some(0));
        assert_eq!(column_at(&widths, 0, 3), Some(0));
        assert_eq!(column_at(&widths, 0, 4), None);
        assert_eq!(column_at(&widths, 0, 5), Some(1));
        assert_eq!(column_at(&widths, 0, 8), Some(2));
        assert_eq!(column_at(&widths, 0, 11), None);
    }

    #[test]
    fn click_respects_column_offset() {
        let widths = [4, 2, 3];
        assert_eq!(column_at(&widths, 1, 0), Some(1));
        assert_eq!(column_at(&widths, 1, 3), Some(2));
    }

    #[test]
    fn list_scrolls_to_keep_cursor_visible() {
        assert_eq!(list_offset(0, 10), 0);
        assert_eq!(list_offset(9, 10), 0);
        assert_eq!(list_offset(12, 10), 3);
        assert_eq!(list_offset(5, 0), 5);
    }
}
