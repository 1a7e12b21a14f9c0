//! Antipode map renderer.
//!
//! Loads an antipode classification grid and renders Robinson and/or
//! nearside-perspective maps, either one map from command-line options or
//! a whole batch described in YAML.

mod batch;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use antipode_common::geo::{DEFAULT_LATITUDE, DEFAULT_LONGITUDE};
use antipode_common::ClassificationGrid;
use netcdf_parser::{load_antipode_grid, DatasetLayout};
use renderer::{Coastlines, FigureConfig, MapRenderer, RenderOptions, TextRenderer};

use batch::{MapBatch, MapLayout};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ProjectionChoice {
    Robinson,
    Perspective,
    Both,
}

impl ProjectionChoice {
    fn layouts(self) -> Vec<MapLayout> {
        match self {
            ProjectionChoice::Robinson => vec![MapLayout::Robinson],
            ProjectionChoice::Perspective => vec![MapLayout::Perspective],
            ProjectionChoice::Both => vec![MapLayout::Robinson, MapLayout::Perspective],
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "antipode-maps")]
#[command(about = "Render maps of antipodal lithosphere type")]
struct Args {
    /// NetCDF classification grid
    #[arg(short, long, env = "ANTIPODE_GRID")]
    grid: Option<PathBuf>,

    /// Map layout
    #[arg(short, long, value_enum, default_value = "robinson")]
    projection: ProjectionChoice,

    /// Color oceanic cells instead of masking them
    #[arg(long)]
    show_oceans: bool,

    /// Do not mark the point and its antipode
    #[arg(long)]
    no_point: bool,

    /// Latitude of the marked point
    #[arg(long, default_value_t = DEFAULT_LATITUDE, allow_negative_numbers = true)]
    lat: f64,

    /// Longitude of the marked point
    #[arg(long, default_value_t = DEFAULT_LONGITUDE, allow_negative_numbers = true)]
    lon: f64,

    /// Center the Robinson map between the point and its antipode
    #[arg(long)]
    recenter: bool,

    /// Output PNG; with `--projection both` the layout name is appended
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output resolution
    #[arg(long, default_value_t = 800.0)]
    dpi: f64,

    /// TrueType font for titles and legends
    #[arg(long, env = "ANTIPODE_FONT")]
    font: Option<PathBuf>,

    /// GeoJSON coastlines
    #[arg(long, env = "ANTIPODE_COASTLINES")]
    coastlines: Option<PathBuf>,

    /// YAML batch of maps to render instead of a single map
    #[arg(long)]
    batch: Option<PathBuf>,

    /// Output directory for batch maps (overrides the batch file)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
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

    info!("Starting antipode map renderer");

    let text = TextRenderer::load(args.font.as_deref());
    let coastlines = match &args.coastlines {
        Some(path) => Some(
            Coastlines::from_file(path)
                .with_context(|| format!("Failed to load coastlines from {}", path.display()))?,
        ),
        None => {
            warn!("No coastline file configured; maps are drawn without coastlines");
            None
        }
    };
    let renderer = MapRenderer::new(FigureConfig::default().with_dpi(args.dpi), text, coastlines);

    match &args.batch {
        Some(batch_path) => run_batch(&args, &renderer, batch_path),
        None => run_single(&args, &renderer),
    }
}

fn load_grid(path: &Path) -> Result<ClassificationGrid> {
    let grid = load_antipode_grid(path, &DatasetLayout::default())
        .with_context(|| format!("Failed to load antipode grid {}", path.display()))?;

    let counts = grid.category_counts();
    info!(
        path = %path.display(),
        width = grid.width(),
        height = grid.height(),
        continent_to_ocean = counts.continent_to_ocean,
        continent_to_continent = counts.continent_to_continent,
        ocean_to_continent = counts.ocean_to_continent,
        ocean_to_ocean = counts.ocean_to_ocean,
        other = counts.other,
        "Loaded classification grid"
    );
    Ok(grid)
}

fn render(renderer: &MapRenderer, grid: &ClassificationGrid, layout: MapLayout, options: &RenderOptions) -> Result<()> {
    let figure = match layout {
        MapLayout::Robinson => renderer.render_robinson(grid, options),
        MapLayout::Perspective => renderer.render_perspective(grid, options),
    }
    .with_context(|| format!("Failed to render {} map", layout.suffix()))?;

    if options.output_path.is_none() {
        info!(
            layout = layout.suffix(),
            width = figure.width(),
            height = figure.height(),
            "Rendered map without an output path; nothing written"
        );
    }
    Ok(())
}

/// `output` as given for one layout, otherwise `output` with the layout name
/// appended to its stem.
fn output_for(output: &Path, layout: MapLayout, several: bool) -> PathBuf {
    if !several {
        return output.to_path_buf();
    }
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "antipode_map".to_string());
    output.with_file_name(format!("{}_{}.png", stem, layout.suffix()))
}

fn run_single(args: &Args, renderer: &MapRenderer) -> Result<()> {
    let grid_path = args
        .grid
        .clone()
        .unwrap_or_else(|| PathBuf::from("antipode_grid.nc"));
    let grid = load_grid(&grid_path)?;

    let layouts = args.projection.layouts();
    for &layout in &layouts {
        if layout == MapLayout::Perspective && args.recenter {
            warn!("--recenter only applies to Robinson maps");
        }
        let options = RenderOptions {
            show_oceans: args.show_oceans,
            show_point: !args.no_point,
            point_latitude: args.lat,
            point_longitude: args.lon,
            recenter: args.recenter,
            output_path: args
                .output
                .as_deref()
                .map(|p| output_for(p, layout, layouts.len() > 1)),
        };
        render(renderer, &grid, layout, &options)?;
    }
    Ok(())
}

fn run_batch(args: &Args, renderer: &MapRenderer, batch_path: &Path) -> Result<()> {
    let batch = MapBatch::from_file(batch_path)?;
    let grid_path = args
        .grid
        .clone()
        .or_else(|| batch.grid.clone())
        .unwrap_or_else(|| PathBuf::from("antipode_grid.nc"));
    let grid = load_grid(&grid_path)?;

    let jobs = batch.resolved_jobs(args.output_dir.as_deref());
    info!(batch = %batch_path.display(), maps = jobs.len(), "Rendering map batch");

    for (i, job) in jobs.iter().enumerate() {
        info!(
            index = i + 1,
            total = jobs.len(),
            layout = job.layout.suffix(),
            file = %job.file.display(),
            "Rendering map"
        );
        render(renderer, &grid, job.layout, &job.options)?;
    }

    info!(maps = jobs.len(), "Batch complete");
    Ok(())
}
