//! Radioactive decay simulator.
//!
//! Runs one or more populations of unstable units for a number of steps,
//! optionally repeated, and writes the parent/daughter series as JSON and
//! the per-step frames as PNG.

mod frames;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use decay_model::{decay_probability, DecayExperiment, PopulationSpec, RunSeries};
use renderer::{DecayChartRenderer, DecayChartStyle, TextRenderer};

#[derive(Parser, Debug)]
#[command(name = "decay-sim")]
#[command(about = "Monte Carlo simulation of radioactive decay")]
struct Args {
    /// Units per population
    #[arg(short = 'n', long, default_value_t = 1000)]
    population: usize,

    /// Half-life in steps; repeat for side-by-side populations
    #[arg(long = "half-life", default_values_t = [1.0])]
    half_life: Vec<f64>,

    /// Steps after formation
    #[arg(short, long, default_value_t = 12)]
    steps: usize,

    /// Number of repeated runs
    #[arg(short, long, default_value_t = 1)]
    runs: usize,

    /// Base random seed (random when omitted)
    #[arg(long, env = "DECAY_SEED")]
    seed: Option<u64>,

    /// Write every series as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write PNG frames, one per step, into this directory
    #[arg(long)]
    frames_dir: Option<PathBuf>,

    /// TrueType font for frame text
    #[arg(long, env = "ANTIPODE_FONT")]
    font: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn experiment(&self, seed: u64) -> DecayExperiment {
        let populations = self
            .half_life
            .iter()
            .enumerate()
            .map(|(i, &hl)| PopulationSpec::new(format!("half-life {} #{}", hl, i + 1), hl))
            .collect();
        DecayExperiment {
            population: self.population,
            steps: self.steps,
            runs: self.runs,
            seed,
            populations,
        }
    }
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

    let seed = args.seed.unwrap_or_else(rand::random);
    let experiment = args.experiment(seed);
    experiment.validate()?;

    for spec in &experiment.populations {
        info!(
            label = %spec.label,
            half_life = spec.half_life,
            probability = decay_probability(spec.half_life)?,
            "Population configured"
        );
    }
    info!(
        population = experiment.population,
        steps = experiment.steps,
        runs = experiment.runs,
        seed = seed,
        "Starting decay simulation"
    );

    let results = match &args.frames_dir {
        Some(dir) => {
            let text = TextRenderer::load(args.font.as_deref());
            let chart = DecayChartRenderer::new(DecayChartStyle::default(), text);
            frames::run_with_frames(&experiment, &chart, dir)?
        }
        None => experiment.run_all()?,
    };

    for series in &results {
        if let Some(last) = series.last() {
            info!(
                run = series.run,
                label = %series.label,
                parents = last.parents,
                daughters = last.daughters,
                elapsed_half_lives = last.elapsed_half_lives,
                "Final state"
            );
        }
    }

    if let Some(path) = &args.json {
        write_json(path, &results)?;
    }

    Ok(())
}

fn write_json(path: &Path, results: &[RunSeries]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, results)?;
    writer.flush()?;
    info!(path = %path.display(), series = results.len(), "Wrote decay series");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::try_parse_from(["decay-sim"]).unwrap();
        assert_eq!(args.population, 1000);
        assert_eq!(args.half_life, vec![1.0]);
        assert_eq!(args.steps, 12);
        assert_eq!(args.runs, 1);
    }

    #[test]
    fn test_dual_half_lives() {
        let args = Args::try_parse_from(["decay-sim", "--half-life", "1", "--half-life", "4", "--steps", "16"]).unwrap();
        let experiment = args.experiment(5);
        assert_eq!(experiment.populations.len(), 2);
        assert_eq!(experiment.populations[1].half_life, 4.0);
        assert_eq!(experiment.config_for(1).unwrap().max_elapsed(), 4.0);
    }

    #[test]
    fn test_json_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("series.json");
        let results = DecayExperiment::default().run_all().unwrap();
        write_json(&path, &results).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["steps"].as_array().unwrap().len(), 13);
    }
}
