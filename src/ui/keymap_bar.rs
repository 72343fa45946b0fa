//! Keymap help bar UI component.

use crate::ui::ThemeColors;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Key bindings shown in the help bar.
pub const KEYMAP: &str = "q:quit | h/l:panel | j/k:nav | Space:toggle | Enter:only | x:x-axis | r:ratio | u:unit | m:spatial | M:model mean | d:dense | e:stdev | c:copy | C:palette | T:theme";

/// Draw the keymap help bar.
pub fn draw_keymap(f: &mut Frame<'_>, area: Rect, colors: &ThemeColors) {
    let paragraph = Paragraph::new(KEYMAP).style(Style::default().fg(colors.gray).bg(colors.bg0));

    f.render_widget(paragraph, area);
}
