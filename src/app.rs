//! Application state and logic.

use crate::chart::{ChartLayoutConfig, ColorPalette};
use crate::clipboard;
use crate::data::StatsDataset;
use crate::pipeline::{compute_plot, GatherPolicy, PlotRequest, PlotResult};
use crate::selector::SelectorState;

/// Application theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Gruvbox dark theme.
    GruvboxDark,
    /// Gruvbox light theme.
    GruvboxLight,
}

impl Theme {
    /// Get the next theme in the cycle.
    pub fn next(self) -> Self {
        match self {
            Theme::GruvboxDark => Theme::GruvboxLight,
            Theme::GruvboxLight => Theme::GruvboxDark,
        }
    }

    /// Get the theme name.
    pub fn name(self) -> &'static str {
        match self {
            Theme::GruvboxDark => "Gruvbox Dark",
            Theme::GruvboxLight => "Gruvbox Light",
        }
    }
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Loaded dataset, read-only for the whole session.
    pub dataset: StatsDataset,
    /// Where the dataset came from, for the title bar.
    pub source: String,
    /// Axis selectors.
    pub selectors: SelectorState,
    /// Chart options; its selections mirror the selectors after each redraw.
    pub request: PlotRequest,
    /// Last successfully computed plot.
    pub plot: Option<PlotResult>,
    /// Status message.
    pub status: String,
    /// Whether the status message reports a rejected request.
    pub status_is_error: bool,
    /// Current theme.
    pub theme: Theme,
    /// Bar color palette.
    pub palette: ColorPalette,
    /// Draw stdev whiskers.
    pub show_stdev: bool,
    /// Chart geometry constants.
    pub layout: ChartLayoutConfig,
}

impl App {
    /// Create the application and draw the first chart.
    pub fn new(dataset: StatsDataset, source: impl Into<String>, request: PlotRequest) -> Self {
        let selectors = SelectorState::new(&dataset.catalog, &request.selections);
        let mut app = Self {
            dataset,
            source: source.into(),
            selectors,
            request,
            plot: None,
            status: "Ready".to_string(),
            status_is_error: false,
            theme: Theme::GruvboxDark,
            palette: ColorPalette::default(),
            show_stdev: false,
            layout: ChartLayoutConfig::default(),
        };
        app.redraw();
        app
    }

    /// Run the pipeline for the current selectors and options.
    ///
    /// On a rejected request the previous plot stays and the status bar
    /// explains why.
    pub fn redraw(&mut self) {
        self.request.selections = self.selectors.selections();
        match compute_plot(&self.dataset, &self.request) {
            Ok(plot) => {
                tracing::info!(
                    "Redraw: {} bar groups x {} positions",
                    plot.num_bars(),
                    plot.num_groups()
                );
                self.status = format!(
                    "{} bar groups x {} {}",
                    plot.num_bars(),
                    plot.num_groups(),
                    plot.x_axis
                );
                self.status_is_error = false;
                self.plot = Some(plot);
            },
            Err(e) => {
                if e.is_user_facing() {
                    tracing::warn!("Selection rejected: {}", e);
                } else {
                    tracing::error!("Redraw failed: {}", e);
                }
                self.status = e.to_string();
                self.status_is_error = true;
            },
        }
    }

    /// Toggle the entry under the cursor of the focused selector.
    pub fn toggle_entry(&mut self) {
        self.selectors.focused_mut().toggle_current();
        self.redraw();
    }

    /// Check only the entry under the cursor of the focused selector.
    pub fn select_only_entry(&mut self) {
        self.selectors.focused_mut().select_only_current();
        self.redraw();
    }

    /// Show the next axis along x.
    pub fn cycle_x_axis(&mut self) {
        self.request.x_axis = self.request.x_axis.next();
        self.redraw();
    }

    /// Switch between values and ratio to historical.
    pub fn toggle_y_axis(&mut self) {
        self.request.y_axis = self.request.y_axis.next();
        self.redraw();
    }

    /// Cycle the rate unit.
    pub fn cycle_unit(&mut self) {
        self.request.y_unit = self.request.y_unit.next();
        self.redraw();
    }

    /// Cycle the spatial mean mode.
    pub fn cycle_spatial_mean(&mut self) {
        self.request.spatial_mean = self.request.spatial_mean.next();
        self.redraw();
    }

    /// Toggle averaging over models.
    pub fn toggle_model_mean(&mut self) {
        self.request.model_mean = !self.request.model_mean;
        self.redraw();
    }

    /// Switch between sparse and dense gathering.
    pub fn toggle_policy(&mut self) {
        self.request.policy = match self.request.policy {
            GatherPolicy::Sparse => GatherPolicy::Dense,
            GatherPolicy::Dense => GatherPolicy::Sparse,
        };
        self.redraw();
    }

    /// Toggle stdev whiskers.
    pub fn toggle_stdev(&mut self) {
        self.show_stdev = !self.show_stdev;
        self.status = format!("Stdev: {}", if self.show_stdev { "ON" } else { "OFF" });
        self.status_is_error = false;
    }

    /// Cycle to the next theme.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.status = format!("Theme: {}", self.theme.name());
        self.status_is_error = false;
    }

    /// Cycle to the next bar palette.
    pub fn cycle_palette(&mut self) {
        self.palette = self.palette.next();
        self.status = format!("Palette: {}", self.palette.name());
        self.status_is_error = false;
    }

    /// Copy the current plot to the clipboard as TSV.
    pub fn copy_plot(&mut self) {
        let Some(plot) = &self.plot else {
            self.status = "Nothing to copy".to_string();
            return;
        };
        match clipboard::copy_plot(plot) {
            Ok(()) => {
                self.status = "Plot copied!".to_string();
                self.status_is_error = false;
            },
            Err(e) => {
                self.status = format!("Copy failed: {}", e);
                self.status_is_error = true;
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::demo::demo_dataset;
    use crate::data::AxisKind;
    use crate::pipeline::YAxisMode;

    fn app() -> App {
        App::new(demo_dataset().unwrap(), "demo", PlotRequest::default())
    }

    #[test]
    fn starts_with_a_plot() {
        let app = app();
        assert!(app.plot.is_some());
        assert!(!app.status_is_error);
    }

    #[test]
    fn rejected_selection_keeps_previous_plot() {
        let mut app = app();
        let before = app.plot.clone();

        // Uncheck "all" on the model panel: nothing selected.
        app.toggle_entry();
        assert!(app.status_is_error);
        assert!(app.status.starts_with("Invalid selection"));
        assert_eq!(app.plot, before);

        // Checking a single model recovers.
        app.selectors.focused_mut().cursor_down();
        app.toggle_entry();
        assert!(!app.status_is_error);
        assert_ne!(app.plot, before);
    }

    #[test]
    fn options_trigger_redraw() {
        let mut app = app();
        app.cycle_x_axis();
        assert_eq!(app.request.x_axis, AxisKind::Latitude);
        assert_eq!(app.plot.as_ref().unwrap().x_axis, AxisKind::Latitude);

        app.toggle_y_axis();
        assert_eq!(app.request.y_axis, YAxisMode::Ratio);
        assert_eq!(app.plot.as_ref().unwrap().y_unit, "future/historical");
    }

    #[test]
    fn ratio_with_only_historical_is_rejected() {
        let mut app = app();
        app.toggle_y_axis();
        let before = app.plot.clone();

        app.selectors.focus_next();
        let scenarios = app.selectors.focused_mut();
        scenarios.cursor = 1;
        app.select_only_entry();
        assert!(app.status.starts_with("Empty selection"));
        assert_eq!(app.plot, before);
    }
}
