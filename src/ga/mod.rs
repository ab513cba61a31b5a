//! Binary genetic algorithm for MAX-SAT.
//!
//! Individuals are bit strings, one bit per variable. Each generation
//! ranks the population with stochastic ranking, breeds consecutive
//! pairs with one-point crossover and bit-flip mutation, and keeps the
//! best parents through elitist survivor selection, until a generation
//! cap or a wall-clock budget is reached.
//!
//! # Key Types
//!
//! - [`BgaConfig`]: Algorithm parameters (sizes, rates, budget, policies)
//! - [`Ranking`]: Classic or Lagrangian stochastic ranking
//! - [`BgaSession`]: One run's mutable state, stepped a generation at a time
//! - [`BgaRunner`]: Drives a session to completion
//! - [`BgaResult`]: Best-ever and final-population champions with statistics
//!
//! # Submodules
//!
//! - [`operators`]: One-point crossover and bit-flip mutation
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Runarsson & Yao (2000), "Stochastic Ranking for Constrained Evolutionary Optimization"

mod config;
mod init;
pub mod operators;
mod ranking;
mod runner;
mod survivor;
mod types;

pub use config::{BgaConfig, OddParentPolicy, ShortfallPolicy};
pub use init::{heuristic_individual, initialize_population};
pub use ranking::{
    classic_probability, stochastic_ranking_classic, stochastic_ranking_lagrangian,
    LagrangeMultiplier, RankOutcome, Ranking,
};
pub use runner::{BgaResult, BgaRunner, BgaSession, RunState, Termination};
pub use survivor::select_survivors;
pub use types::{Individual, Population};
