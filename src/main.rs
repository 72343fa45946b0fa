//! Climstats - a terminal viewer for collected climate statistics.

use anyhow::{bail, Context, Result};
use clap::Parser;
use climstats::app::App;
use climstats::data::{demo, AxisKind, StatsDataset, ALL, ALL_SEASONS};
use climstats::pipeline::{
    compute_plot, GatherPolicy, PlotRequest, Selection, Selections, SpatialMean, YAxisMode, YUnit,
};
use climstats::ui;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "climstats")]
#[command(about = "Grouped bar charts of collected climate statistics", long_about = None)]
struct Args {
    /// Path to the collected-stats NetCDF file
    file: Option<PathBuf>,

    /// Use the built-in demo dataset instead of a file
    #[arg(long, conflicts_with = "file")]
    demo: bool,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,

    /// Print the plot table as TSV instead of starting the viewer
    #[arg(long)]
    print: bool,

    /// Models: "all" or a comma-separated list
    #[arg(long, default_value = ALL)]
    models: String,

    /// Scenarios: "all" or a comma-separated list
    #[arg(long, default_value = ALL)]
    scenarios: String,

    /// Year ranges: "all" or a comma-separated list
    #[arg(long, default_value = ALL)]
    years: String,

    /// Seasons or months: "all seasons", "all months" or a comma-separated list
    #[arg(long, default_value = ALL_SEASONS)]
    clims: String,

    /// Latitude bands: "all" or a comma-separated list
    #[arg(long, default_value = ALL)]
    lats: String,

    /// Longitude bands: "all" or a comma-separated list
    #[arg(long, default_value = ALL)]
    lons: String,

    /// Axis shown along x
    #[arg(long, value_enum, default_value_t = AxisKind::Clim)]
    x_axis: AxisKind,

    /// Plot values or the ratio to the historical baseline
    #[arg(long, value_enum, default_value_t)]
    y_axis: YAxisMode,

    /// Rate unit for values
    #[arg(long, value_enum, default_value_t)]
    units: YUnit,

    /// Average over latitude and/or longitude bands
    #[arg(long, value_enum, default_value_t)]
    spatial_mean: SpatialMean,

    /// Average over the selected models
    #[arg(long)]
    model_mean: bool,

    /// Gather the full Cartesian product instead of skipping empty runs
    #[arg(long)]
    dense: bool,
}

impl Args {
    fn request(&self) -> PlotRequest {
        PlotRequest {
            selections: Selections {
                models: Selection::parse(&self.models),
                scenarios: Selection::parse(&self.scenarios),
                year_ranges: Selection::parse(&self.years),
                clims: Selection::parse(&self.clims),
                latitudes: Selection::parse(&self.lats),
                longitudes: Selection::parse(&self.lons),
            },
            x_axis: self.x_axis,
            y_axis: self.y_axis,
            y_unit: self.units,
            spatial_mean: self.spatial_mean,
            model_mean: self.model_mean,
            policy: if self.dense {
                GatherPolicy::Dense
            } else {
                GatherPolicy::Sparse
            },
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        let log_file = std::fs::File::create(log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_writer(Mutex::new(log_file))
            .with_ansi(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting Climstats");
    }

    // Validate path if provided
    if let Some(ref path) = args.file {
        if !path.exists() {
            eprintln!("Error: Path not found: {}", path.display());
            std::process::exit(1);
        }
    }

    let (dataset, source) = load(&args)?;
    let request = args.request();

    if args.print {
        match compute_plot(&dataset, &request) {
            Ok(plot) => print!("{}", plot.to_tsv()),
            Err(e) if e.is_user_facing() => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            },
            Err(e) => return Err(e.into()),
        }
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let app = App::new(dataset, source, request);
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    if args.log.is_some() {
        tracing::info!("Climstats exited");
    }

    Ok(())
}

fn load(args: &Args) -> Result<(StatsDataset, String)> {
    if args.demo {
        let dataset = demo::demo_dataset().context("Failed to build demo dataset")?;
        return Ok((dataset, "demo".to_string()));
    }
    match &args.file {
        Some(path) => Ok((read_file(path)?, display_name(path))),
        None => bail!("No input: pass a collected-stats FILE or --demo"),
    }
}

#[cfg(feature = "netcdf")]
fn read_file(path: &Path) -> Result<StatsDataset> {
    climstats::data::DataReader::read_file(path)
        .with_context(|| format!("Failed to load {}", path.display()))
}

#[cfg(not(feature = "netcdf"))]
fn read_file(path: &Path) -> Result<StatsDataset> {
    bail!(
        "Cannot read {}: built without the \"netcdf\" feature",
        path.display()
    )
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        if !event::poll(std::time::Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };

        match (key.modifiers, key.code) {
            // Quit
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(()),

            // Panel focus
            (KeyModifiers::NONE, KeyCode::Tab)
            | (KeyModifiers::NONE, KeyCode::Right)
            | (KeyModifiers::NONE, KeyCode::Char('l')) => {
                app.selectors.focus_next();
            },
            (_, KeyCode::BackTab)
            | (KeyModifiers::NONE, KeyCode::Left)
            | (KeyModifiers::NONE, KeyCode::Char('h')) => {
                app.selectors.focus_prev();
            },

            // Entry navigation
            (KeyModifiers::NONE, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => {
                app.selectors.focused_mut().cursor_up();
            },
            (KeyModifiers::NONE, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => {
                app.selectors.focused_mut().cursor_down();
            },

            // Selection changes redraw
            (KeyModifiers::NONE, KeyCode::Char(' ')) => app.toggle_entry(),
            (KeyModifiers::NONE, KeyCode::Enter) => app.select_only_entry(),

            // Chart options
            (KeyModifiers::NONE, KeyCode::Char('x')) => app.cycle_x_axis(),
            (KeyModifiers::NONE, KeyCode::Char('r')) => app.toggle_y_axis(),
            (KeyModifiers::NONE, KeyCode::Char('u')) => app.cycle_unit(),
            (KeyModifiers::NONE, KeyCode::Char('m')) => app.cycle_spatial_mean(),
            (KeyModifiers::SHIFT, KeyCode::Char('M')) => app.toggle_model_mean(),
            (KeyModifiers::NONE, KeyCode::Char('d')) => app.toggle_policy(),
            (KeyModifiers::NONE, KeyCode::Char('e')) => app.toggle_stdev(),

            // Appearance
            (KeyModifiers::SHIFT, KeyCode::Char('C')) => app.cycle_palette(),
            (KeyModifiers::SHIFT, KeyCode::Char('T')) => app.cycle_theme(),
            (KeyModifiers::SHIFT, KeyCode::Char('?')) | (KeyModifiers::NONE, KeyCode::Char('?')) => {
                app.status = ui::KEYMAP.to_string();
                app.status_is_error = false;
            },

            // Clipboard
            (KeyModifiers::NONE, KeyCode::Char('c')) => app.copy_plot(),

            _ => {},
        }
    }
}
