//! Repeated runs over one or more populations.
//!
//! An experiment runs every population side by side for the same number
//! of steps, and repeats that `runs` times. Each simulation is seeded from
//! the experiment's base seed, so a given configuration always produces the
//! same series.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{DecayError, DecayResult};
use crate::simulation::{DecayConfig, DecaySimulation, DecayStep};

/// One population within an experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationSpec {
    pub label: String,
    /// Half-life in steps
    pub half_life: f64,
}

impl PopulationSpec {
    pub fn new(label: impl Into<String>, half_life: f64) -> Self {
        Self {
            label: label.into(),
            half_life,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayExperiment {
    pub population: usize,
    pub steps: usize,
    pub runs: usize,
    pub seed: u64,
    pub populations: Vec<PopulationSpec>,
}

impl Default for DecayExperiment {
    fn default() -> Self {
        Self {
            population: 1000,
            steps: 12,
            runs: 1,
            seed: 0,
            populations: vec![PopulationSpec::new("parent", 1.0)],
        }
    }
}

/// Complete series of one population in one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSeries {
    /// 1-based run number
    pub run: usize,
    pub label: String,
    pub half_life: f64,
    pub steps: Vec<DecayStep>,
}

impl RunSeries {
    pub fn last(&self) -> Option<&DecayStep> {
        self.steps.last()
    }
}

impl DecayExperiment {
    /// Half-lives in steps, one population each.
    pub fn with_half_lives(population: usize, steps: usize, half_lives: &[f64]) -> Self {
        let populations = half_lives
            .iter()
            .enumerate()
            .map(|(i, &hl)| PopulationSpec::new(format!("population {}", i + 1), hl))
            .collect();
        Self {
            population,
            steps,
            populations,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> DecayResult<()> {
        if self.populations.is_empty() {
            return Err(DecayError::InvalidExperiment("no populations".to_string()));
        }
        if self.runs == 0 {
            return Err(DecayError::InvalidExperiment("runs must be at least 1".to_string()));
        }
        for index in 0..self.populations.len() {
            self.config_for(index)?.validate()?;
        }
        Ok(())
    }

    pub fn config_for(&self, index: usize) -> DecayResult<DecayConfig> {
        let spec = self
            .populations
            .get(index)
            .ok_or_else(|| DecayError::InvalidExperiment(format!("no population at index {}", index)))?;
        Ok(DecayConfig {
            population: self.population,
            half_life: spec.half_life,
            steps: self.steps,
        })
    }

    /// Seed for population `index` of 1-based `run`.
    pub fn seed_for(&self, run: usize, index: usize) -> u64 {
        self.seed
            .wrapping_add((run as u64) << 16)
            .wrapping_add(index as u64)
    }

    /// Fresh simulations for every population of `run`.
    pub fn simulations(&self, run: usize) -> DecayResult<Vec<DecaySimulation<StdRng>>> {
        (0..self.populations.len())
            .map(|index| {
                let rng = StdRng::seed_from_u64(self.seed_for(run, index));
                DecaySimulation::new(self.config_for(index)?, rng)
            })
            .collect()
    }

    /// Run everything to completion, runs in order.
    pub fn run_all(&self) -> DecayResult<Vec<RunSeries>> {
        self.validate()?;
        let mut results = Vec::with_capacity(self.runs * self.populations.len());

        for run in 1..=self.runs {
            for (spec, sim) in self.populations.iter().zip(self.simulations(run)?) {
                let steps: Vec<DecayStep> = sim.collect();
                if let Some(last) = steps.last() {
                    debug!(
                        run = run,
                        label = %spec.label,
                        half_life = spec.half_life,
                        parents = last.parents,
                        daughters = last.daughters,
                        "Run complete"
                    );
                }
                results.push(RunSeries {
                    run,
                    label: spec.label.clone(),
                    half_life: spec.half_life,
                    steps,
                });
            }
        }

        info!(
            runs = self.runs,
            populations = self.populations.len(),
            population = self.population,
            steps = self.steps,
            "Decay experiment finished"
        );
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_experiment_valid() {
        let experiment = DecayExperiment::default();
        assert!(experiment.validate().is_ok());
        assert_eq!(experiment.config_for(0).unwrap(), DecayConfig::default());
    }

    #[test]
    fn test_validation_errors() {
        let empty = DecayExperiment {
            populations: Vec::new(),
            ..Default::default()
        };
        assert!(empty.validate().is_err());

        let no_runs = DecayExperiment {
            runs: 0,
            ..Default::default()
        };
        assert!(no_runs.validate().is_err());

        let bad = DecayExperiment::with_half_lives(1000, 12, &[1.0, 0.0]);
        assert!(matches!(bad.validate(), Err(DecayError::InvalidHalfLife(_))));
    }

    #[test]
    fn test_seeds_differ_per_run_and_population() {
        let experiment = DecayExperiment::default();
        assert_ne!(experiment.seed_for(1, 0), experiment.seed_for(2, 0));
        assert_ne!(experiment.seed_for(1, 0), experiment.seed_for(1, 1));
    }
}
