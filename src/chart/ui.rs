//! Grouped bar chart UI rendering.

use super::{tick_slots, BarLayout, ChartLayoutConfig, ColorPalette};
use crate::pipeline::PlotResult;
use crate::ui::formatters::{format_axis_label, format_stat_value, truncate};
use crate::ui::ThemeColors;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, List, ListItem, Paragraph},
    Frame,
};

/// Everything the chart needs besides the plot itself.
#[derive(Debug, Clone, Copy)]
pub struct ChartStyle<'a> {
    /// Bar colors.
    pub palette: ColorPalette,
    /// Draw stdev whiskers.
    pub show_stdev: bool,
    /// Geometry constants.
    pub config: &'a ChartLayoutConfig,
}

/// Draw the chart, its title lines and the legend.
pub fn draw_chart(
    f: &mut Frame<'_>,
    area: Rect,
    plot: Option<&PlotResult>,
    style: ChartStyle<'_>,
    colors: &ThemeColors,
) {
    let Some(plot) = plot else {
        let para = Paragraph::new("No data to display")
            .style(Style::default().fg(colors.fg0))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(colors.bg2)));
        f.render_widget(para, area);
        return;
    };

    let title_lines: Vec<Line<'_>> = plot
        .title
        .lines()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.yellow))))
        .collect();
    let title_height = (title_lines.len() as u16).min(area.height / 3);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(title_height), Constraint::Min(3)])
        .split(area);
    f.render_widget(
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .style(Style::default().bg(colors.bg0)),
        rows[0],
    );

    let chart_area = match &plot.bar_labels {
        Some(labels) => {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(10), Constraint::Length(style.config.legend_width)])
                .split(rows[1]);
            draw_legend(f, cols[1], labels, style, colors);
            cols[0]
        },
        None => rows[1],
    };

    draw_bars(f, chart_area, plot, style, colors);
}

fn draw_bars(f: &mut Frame<'_>, area: Rect, plot: &PlotResult, style: ChartStyle<'_>, colors: &ThemeColors) {
    let layout = BarLayout::compute(plot, style.config);
    let bars = plot.num_bars();

    let Some([y_min, y_max]) = layout.y_bounds else {
        let para = Paragraph::new("No valid data to display")
            .style(Style::default().fg(colors.fg0))
            .alignment(Alignment::Center);
        f.render_widget(para, area);
        return;
    };

    // Bar tops, one series per bar group
    let series: Vec<Vec<(f64, f64)>> = (0..bars)
        .map(|bar| {
            (0..plot.num_groups())
                .filter_map(|x| Some((layout.location(bar, x)?, plot.value(bar, x)?)))
                .collect()
        })
        .collect();

    // Whisker ends at value +- stdev
    let whiskers: Vec<Vec<(f64, f64)>> = if style.show_stdev {
        (0..bars)
            .map(|bar| {
                (0..plot.num_groups())
                    .filter_map(|x| {
                        let loc = layout.location(bar, x)?;
                        let v = plot.value(bar, x)?;
                        let sd = plot.stdev(bar, x)?;
                        Some([(loc, v - sd), (loc, v + sd)])
                    })
                    .flatten()
                    .collect()
            })
            .collect()
    } else {
        Vec::new()
    };

    let mut datasets: Vec<Dataset<'_>> = series
        .iter()
        .enumerate()
        .map(|(bar, data)| {
            Dataset::default()
                .marker(Marker::HalfBlock)
                .graph_type(GraphType::Bar)
                .style(Style::default().fg(style.palette.bar_color(bar, bars)))
                .data(data)
        })
        .collect();
    datasets.extend(whiskers.iter().map(|data| {
        Dataset::default()
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(colors.fg1))
            .data(data)
    }));

    let x_axis = Axis::default()
        .title(plot.x_axis.name())
        .style(Style::default().fg(colors.fg0))
        .bounds(layout.x_bounds)
        .labels(tick_slots(&plot.x_labels));

    let y_axis = Axis::default()
        .title(format!("[{}]", plot.y_unit))
        .style(Style::default().fg(colors.fg0))
        .bounds([y_min, y_max])
        .labels(vec![
            format_axis_label(y_min),
            format_axis_label((y_min + y_max) / 2.0),
            format_axis_label(y_max),
        ]);

    let (lo, hi) = series
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, v)| (lo.min(v), hi.max(v)));
    let readout = format!(" min {} | max {} ", format_stat_value(lo), format_stat_value(hi));

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.bg2))
                .title(readout)
                .title_style(Style::default().fg(colors.yellow)),
        )
        .x_axis(x_axis)
        .y_axis(y_axis);

    f.render_widget(chart, area);
}

fn draw_legend(f: &mut Frame<'_>, area: Rect, labels: &[String], style: ChartStyle<'_>, colors: &ThemeColors) {
    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem<'_>> = labels
        .iter()
        .enumerate()
        .map(|(bar, label)| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    "■ ",
                    Style::default()
                        .fg(style.palette.bar_color(bar, labels.len()))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(truncate(label, width), Style::default().fg(colors.fg0)),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Legend ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.bg2))
            .style(Style::default().bg(colors.bg0)),
    );
    f.render_widget(list, area);
}
