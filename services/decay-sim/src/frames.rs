//! Running an experiment step by step and writing a frame per step.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use decay_model::{DecayExperiment, DecayStep, RunSeries};
use renderer::decay_chart::population_colors;
use renderer::{DecayChartRenderer, PopulationPanel, SeriesPoint};

pub fn to_series_point(step: &DecayStep) -> SeriesPoint {
    SeriesPoint {
        elapsed: step.elapsed_half_lives,
        parents: step.parents,
        daughters: step.daughters,
    }
}

/// `Decay{run}-{step:02}.png` for one population, `DualDecay-{step}.png`
/// for several (with the run number added when there is more than one).
pub fn frame_name(run: usize, step: usize, populations: usize, runs: usize) -> String {
    if populations <= 1 {
        format!("Decay{}-{:02}.png", run, step)
    } else if runs <= 1 {
        format!("DualDecay-{}.png", step)
    } else {
        format!("DualDecay{}-{}.png", run, step)
    }
}

/// Run `experiment`, saving one frame per step into `dir`.
///
/// Earlier runs of each population appear as trails in later frames.
pub fn run_with_frames(
    experiment: &DecayExperiment,
    chart: &DecayChartRenderer,
    dir: &Path,
) -> Result<Vec<RunSeries>> {
    experiment.validate()?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create frame directory {}", dir.display()))?;

    let count = experiment.populations.len();
    let max_elapsed: Vec<f64> = (0..count)
        .map(|i| experiment.config_for(i).map(|c| c.max_elapsed()))
        .collect::<Result<_, _>>()?;

    let mut trails: Vec<Vec<Vec<SeriesPoint>>> = vec![Vec::new(); count];
    let mut results = Vec::with_capacity(experiment.runs * count);
    let mut written = 0usize;

    for run in 1..=experiment.runs {
        let mut sims = experiment.simulations(run)?;
        let mut steps: Vec<Vec<DecayStep>> = vec![Vec::new(); count];
        let mut history: Vec<Vec<SeriesPoint>> = vec![Vec::new(); count];

        for step in 0..=experiment.steps {
            for (i, sim) in sims.iter_mut().enumerate() {
                if let Some(s) = sim.next() {
                    history[i].push(to_series_point(&s));
                    steps[i].push(s);
                }
            }

            let panels: Vec<PopulationPanel<'_>> = sims
                .iter()
                .enumerate()
                .map(|(i, sim)| {
                    let (parent_color, daughter_color) = population_colors(i, count);
                    PopulationPanel {
                        decayed: sim.decayed(),
                        history: &history[i],
                        trails: &trails[i],
                        parent_color,
                        daughter_color,
                        max_elapsed: max_elapsed[i],
                    }
                })
                .collect();

            let path: PathBuf = dir.join(frame_name(run, step, count, experiment.runs));
            chart
                .render_frame(&panels)
                .and_then(|figure| figure.save_png(&path))
                .with_context(|| format!("Failed to write frame {}", path.display()))?;
            written += 1;
            debug!(run = run, step = step, path = %path.display(), "Frame written");
        }

        for (i, spec) in experiment.populations.iter().enumerate() {
            trails[i].push(std::mem::take(&mut history[i]));
            results.push(RunSeries {
                run,
                label: spec.label.clone(),
                half_life: spec.half_life,
                steps: std::mem::take(&mut steps[i]),
            });
        }
    }

    info!(frames = written, dir = %dir.display(), "Decay frames written");
    Ok(results)
}
