//! Evolutionary search for Weighted MAX-SAT.
//!
//! Given clauses over `N` boolean variables, finds an assignment that
//! satisfies as many clauses as possible within a generation cap and a
//! wall-clock budget. This is a bounded-time approximate search: it
//! returns the best assignment found, with no proof of optimality.
//!
//! - **Clause model** ([`clause`]): validated clause sets, the fitness
//!   oracle (satisfied count, penalty, weighted satisfaction, per-clause
//!   reports) and in-memory WCNF ingestion.
//! - **Binary GA** ([`ga`]): heuristic seeding, classic and Lagrangian
//!   stochastic ranking, one-point crossover, bit-flip mutation, elitist
//!   survivor selection and the generational driver.
//!
//! # Example
//!
//! ```
//! use u_maxsat::clause::{parse_wcnf, FitnessOracle};
//! use u_maxsat::ga::{BgaConfig, BgaRunner, Ranking};
//!
//! let text = "p wcnf 3 3\n1 1 2 0\n1 -1 2 0\n1 -2 3 0\n";
//! let oracle = FitnessOracle::new(parse_wcnf(text, false).unwrap());
//! let config = BgaConfig::default()
//!     .with_population_size(12)
//!     .with_ranking(Ranking::lagrangian())
//!     .with_mutation_rate(0.1)
//!     .with_seed(42);
//!
//! let result = BgaRunner::solve(&oracle, &config).unwrap();
//! assert!(result.best_fitness <= oracle.num_clauses());
//! println!("{} satisfies {} clauses", result.best, result.best_fitness);
//! ```

pub mod clause;
pub mod error;
pub mod ga;
pub mod random;

pub use error::{MaxSatError, Result};
