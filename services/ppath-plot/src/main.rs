//! Propagation path plotter.
//!
//! Reads path records from JSON files and draws them as a figure. A single
//! record is drawn in full; several records are merged per the selection
//! (end points by default) and drawn together.

mod config;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use config::{load_records, Overrides, PlotConfig};
use renderer::{polar_ppath, polar_ppath_list, Figure};

#[derive(Parser, Debug)]
#[command(name = "ppath-plot")]
#[command(about = "Plot propagation paths in polar and map panels")]
struct Args {
    /// Configuration file path (YAML)
    #[arg(short, long, env = "PPATH_PLOT_CONFIG")]
    config: Option<PathBuf>,

    /// Samples to plot: all, start, end or low
    #[arg(long)]
    select: Option<String>,

    /// Panels to draw, comma separated: pos, los, no_map
    #[arg(long)]
    show: Option<String>,

    /// Planetary radius in metres (0 plots altitude)
    #[arg(long)]
    planetary_radius: Option<f64>,

    /// Radius divisor (1000 plots kilometres)
    #[arg(long)]
    rscale: Option<f64>,

    /// Output resolution
    #[arg(long)]
    dpi: Option<f64>,

    /// Output file (.svg or .png)
    #[arg(short, long)]
    output: PathBuf,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Path record files (JSON object or array of objects)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match &args.config {
        Some(path) => PlotConfig::load(path)?,
        None => PlotConfig::default(),
    };
    config.apply(&Overrides {
        select: args.select.clone(),
        show: args.show.clone(),
        planetary_radius: args.planetary_radius,
        rscale: args.rscale,
        dpi: args.dpi,
    })?;

    let records = load_records(&args.inputs)?;
    if records.is_empty() {
        bail!("No path records found in {} input file(s)", args.inputs.len());
    }

    let single = records.len() == 1;
    let options = config.plot_options(!single)?;
    info!(
        records = records.len(),
        select = %options.select,
        lat_lon = options.panels.lat_lon,
        map = options.panels.map,
        za_aa = options.panels.za_aa,
        "Plotting propagation paths"
    );

    let mut figure = Figure::new(config.figure);
    if single {
        polar_ppath(&records[0], &options, &mut figure, None)?;
    } else {
        polar_ppath_list(&records, &options, &mut figure, None)?;
    }

    figure
        .save(&args.output)
        .with_context(|| format!("Failed to write figure to {}", args.output.display()))?;

    info!(output = %args.output.display(), "Done");
    Ok(())
}
