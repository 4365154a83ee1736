//! Neon palette and semantic styling for the dashboard.

use ratatui::style::{Color, Modifier, Style};

use dhcpdeck_core::{Cell, CellTone};

// ── Palette ───────────────────────────────────────────────────────────

pub const ELECTRIC_PURPLE: Color = Color::Rgb(225, 53, 255); // #e135ff
pub const NEON_CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const ELECTRIC_YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const SUCCESS_GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const ERROR_RED: Color = Color::Rgb(255, 99, 99); // #ff6363
pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_HIGHLIGHT: Color = Color::Rgb(40, 42, 54); // #282a36

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for panels.
pub fn title_style() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

/// Border for the panel holding key focus.
pub fn border_focused() -> Style {
    Style::default().fg(ELECTRIC_PURPLE)
}

pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Table header row.
pub fn table_header() -> Style {
    Style::default()
        .fg(ELECTRIC_YELLOW)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Selected table row or subnet list entry.
pub fn table_selected() -> Style {
    Style::default()
        .fg(ELECTRIC_PURPLE)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Status line text.
pub fn status_bar() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Search prompt character.
pub fn search_prompt() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

/// Style of one table cell.
pub fn cell_style(cell: &Cell) -> Style {
    let style = match cell.tone {
        CellTone::Plain => Style::default().fg(DIM_WHITE),
        CellTone::Label | CellTone::Warn => Style::default().fg(ELECTRIC_YELLOW),
        CellTone::Good => Style::default().fg(SUCCESS_GREEN),
        CellTone::Bad => Style::default().fg(ERROR_RED),
    };
    if cell.bold {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}
