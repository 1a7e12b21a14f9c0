//! Radioactive decay as independent per-unit Bernoulli trials.
//!
//! A population of `N` parent units is stepped forward in time. At each
//! step every unit that is still a parent decays with probability
//! `p = 1 - exp(-ln 2 / half_life)`, and decayed units stay decayed. The
//! simulation is an [`Iterator`] over [`DecayStep`]s so callers decide
//! what to do with each state (print, chart, collect).

pub mod error;
pub mod experiment;
pub mod simulation;

pub use error::{DecayError, DecayResult};
pub use experiment::{DecayExperiment, PopulationSpec, RunSeries};
pub use simulation::{decay_probability, DecayConfig, DecaySimulation, DecayStep};
