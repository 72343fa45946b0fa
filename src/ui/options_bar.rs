//! Chart options bar UI component.

use crate::app::App;
use crate::pipeline::GatherPolicy;
use crate::ui::ThemeColors;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Draw the current chart options as `label: value` pairs.
pub fn draw_options(f: &mut Frame<'_>, area: Rect, app: &App, colors: &ThemeColors) {
    let request = &app.request;
    let policy = match request.policy {
        GatherPolicy::Sparse => "sparse",
        GatherPolicy::Dense => "dense",
    };
    let pairs = [
        ("x", request.x_axis.name()),
        ("y", request.y_axis.label()),
        ("unit", request.y_unit.name()),
        ("spatial mean", request.spatial_mean.name()),
        ("model mean", if request.model_mean { "on" } else { "off" }),
        ("gather", policy),
        ("palette", app.palette.name()),
    ];

    let mut spans = vec![Span::styled(
        format!(" {} ", app.source),
        Style::default().fg(colors.yellow),
    )];
    for (label, value) in pairs {
        spans.push(Span::styled(format!("| {}: ", label), Style::default().fg(colors.green)));
        spans.push(Span::styled(format!("{} ", value), Style::default().fg(colors.aqua)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(colors.bg0));
    f.render_widget(paragraph, area);
}
