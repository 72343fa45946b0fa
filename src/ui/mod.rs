//! User interface rendering.

pub mod formatters;
mod keymap_bar;
mod options_bar;
mod status_bar;
mod theme;

use crate::app::App;
use crate::chart::ui::{draw_chart, ChartStyle};
use crate::selector::ui::draw_selectors;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Frame,
};

pub use keymap_bar::{draw_keymap, KEYMAP};
pub use options_bar::draw_options;
pub use status_bar::draw_status;
pub use theme::ThemeColors;

/// Height of the selector panels, borders included.
const SELECTOR_HEIGHT: u16 = 10;

/// Draw the UI.
pub fn draw(f: &mut Frame<'_>, app: &mut App) {
    let colors = ThemeColors::from_theme(&app.theme);
    f.render_widget(Block::default().style(Style::default().bg(colors.bg0)), f.area());

    // Selectors, options, chart, status bar and key map bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(SELECTOR_HEIGHT),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_selectors(f, chunks[0], &mut app.selectors, &colors);
    draw_options(f, chunks[1], app, &colors);

    let style = ChartStyle {
        palette: app.palette,
        show_stdev: app.show_stdev,
        config: &app.layout,
    };
    draw_chart(f, chunks[2], app.plot.as_ref(), style, &colors);

    draw_status(f, chunks[3], &app.status, app.status_is_error, &colors);
    draw_keymap(f, chunks[4], &colors);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::demo::demo_dataset;
    use crate::pipeline::PlotRequest;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn draws_demo_without_panicking() {
        let mut app = App::new(demo_dataset().unwrap(), "demo", PlotRequest::default());
        let mut terminal = Terminal::new(TestBackend::new(160, 48)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        app.show_stdev = true;
        app.toggle_y_axis();
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("models"));
        assert!(text.contains("Legend"));
    }
}
