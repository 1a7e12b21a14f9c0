//! Lazy step-by-step decay of a single population.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{DecayError, DecayResult};

/// Per-step decay probability for a half-life measured in steps.
///
/// `half_life = 1` gives exactly one half; `half_life = 4` gives about
/// 0.1591.
pub fn decay_probability(half_life: f64) -> DecayResult<f64> {
    if !half_life.is_finite() || half_life <= 0.0 {
        return Err(DecayError::InvalidHalfLife(half_life));
    }
    Ok(1.0 - (-std::f64::consts::LN_2 / half_life).exp())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// Number of units, all parents at step 0
    pub population: usize,
    /// Half-life in steps
    pub half_life: f64,
    /// Steps after formation
    pub steps: usize,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            population: 1000,
            half_life: 1.0,
            steps: 12,
        }
    }
}

impl DecayConfig {
    pub fn validate(&self) -> DecayResult<()> {
        if self.population == 0 {
            return Err(DecayError::InvalidPopulation(self.population));
        }
        decay_probability(self.half_life).map(|_| ())
    }

    /// Elapsed time, in half-lives, after `step` steps.
    pub fn elapsed_half_lives(&self, step: usize) -> f64 {
        step as f64 / self.half_life
    }

    /// Elapsed half-lives at the final step.
    pub fn max_elapsed(&self) -> f64 {
        self.elapsed_half_lives(self.steps)
    }
}

/// Population counts after a step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayStep {
    pub step: usize,
    pub elapsed_half_lives: f64,
    pub parents: usize,
    pub daughters: usize,
}

/// A running simulation.
///
/// The first item yielded is the state on formation (step 0); every later
/// item applies one round of trials. Iteration ends after `config.steps`.
#[derive(Debug, Clone)]
pub struct DecaySimulation<R> {
    config: DecayConfig,
    probability: f64,
    decayed: Vec<bool>,
    parents: usize,
    next_step: usize,
    rng: R,
}

impl<R: Rng> DecaySimulation<R> {
    pub fn new(config: DecayConfig, rng: R) -> DecayResult<Self> {
        config.validate()?;
        let probability = decay_probability(config.half_life)?;
        Ok(Self {
            config,
            probability,
            decayed: vec![false; config.population],
            parents: config.population,
            next_step: 0,
            rng,
        })
    }

    pub fn config(&self) -> &DecayConfig {
        &self.config
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Per-unit state as of the last yielded step, `true` once decayed.
    pub fn decayed(&self) -> &[bool] {
        &self.decayed
    }

    pub fn parents(&self) -> usize {
        self.parents
    }

    pub fn daughters(&self) -> usize {
        self.config.population - self.parents
    }

    fn apply_trials(&mut self) {
        let p = self.probability;
        let mut decays = 0;
        for unit in self.decayed.iter_mut().filter(|d| !**d) {
            if self.rng.gen_bool(p) {
                *unit = true;
                decays += 1;
            }
        }
        self.parents -= decays;
    }
}

impl<R: Rng> Iterator for DecaySimulation<R> {
    type Item = DecayStep;

    fn next(&mut self) -> Option<DecayStep> {
        if self.next_step > self.config.steps {
            return None;
        }
        let step = self.next_step;
        if step > 0 {
            self.apply_trials();
        }
        self.next_step += 1;

        Some(DecayStep {
            step,
            elapsed_half_lives: self.config.elapsed_half_lives(step),
            parents: self.parents,
            daughters: self.daughters(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.config.steps + 1).saturating_sub(self.next_step);
        (remaining, Some(remaining))
    }
}

impl<R: Rng> ExactSizeIterator for DecaySimulation<R> {}
