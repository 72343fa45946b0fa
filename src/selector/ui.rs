//! Selector panels UI rendering.

use super::{SelectorPanel, SelectorState};
use crate::ui::formatters::truncate;
use crate::ui::ThemeColors;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Draw all selector panels side by side.
pub fn draw_selectors(f: &mut Frame<'_>, area: Rect, state: &mut SelectorState, colors: &ThemeColors) {
    let count = state.panels.len().max(1) as u32;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
        .split(area);

    let focus = state.focus;
    for (idx, (panel, chunk)) in state.panels.iter_mut().zip(chunks.iter()).enumerate() {
        draw_panel(f, *chunk, panel, idx == focus, colors);
    }
}

fn draw_panel(f: &mut Frame<'_>, area: Rect, panel: &mut SelectorPanel, focused: bool, colors: &ThemeColors) {
    // Subtract 2 for borders
    let viewport_height = area.height.saturating_sub(2) as usize;
    panel.adjust_scroll(viewport_height);
    // Borders and the check mark
    let name_width = area.width.saturating_sub(6) as usize;

    let items: Vec<ListItem<'_>> = panel
        .entries
        .iter()
        .zip(&panel.checked)
        .enumerate()
        .skip(panel.scroll)
        .take(viewport_height)
        .map(|(idx, (name, &checked))| {
            let mark = if checked { "[x] " } else { "[ ] " };
            let style = if focused && idx == panel.cursor {
                Style::default()
                    .fg(colors.bg0)
                    .bg(colors.yellow)
                    .add_modifier(Modifier::BOLD)
            } else if checked {
                Style::default().fg(colors.orange)
            } else {
                Style::default().fg(colors.fg0)
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, style),
                Span::styled(truncate(name, name_width), style),
            ]))
        })
        .collect();

    let border = if focused { colors.yellow } else { colors.bg2 };
    let list = List::new(items).block(
        Block::default()
            .title(format!(" {} ", panel.axis))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.bg0)),
    );

    f.render_widget(list, area);
}
