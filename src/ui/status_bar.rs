//! Status bar UI component.

use crate::ui::ThemeColors;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Draw the status bar.
pub fn draw_status(f: &mut Frame<'_>, area: Rect, status: &str, is_error: bool, colors: &ThemeColors) {
    let fg = if is_error { colors.red } else { colors.fg0 };
    let paragraph = Paragraph::new(status.to_string()).style(Style::default().fg(fg).bg(colors.bg1));

    f.render_widget(paragraph, area);
}
