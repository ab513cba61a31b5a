//! Stochastic ranking of the population.
//!
//! Two interchangeable strategies order the population before breeding:
//!
//! - [`Ranking::Classic`]: stochastic bubble ranking (Runarsson & Yao,
//!   2000). Adjacent pairs are compared on penalty with probability `p`
//!   and fall back to fitness on equal penalty. `p` decays linearly over
//!   the run, shifting pressure from feasibility to objective.
//! - [`Ranking::Lagrangian`]: sorts by the relaxed score
//!   `fitness - λ·penalty` and adapts `λ` from the observed share of
//!   individuals that leave some clause unsatisfied.
//!
//! # References
//!
//! - Runarsson & Yao (2000), "Stochastic Ranking for Constrained
//!   Evolutionary Optimization"
//! - Fisher (1981), "The Lagrangian Relaxation Method for Solving Integer
//!   Programming Problems"

use super::types::{Individual, Population};
use crate::clause::FitnessOracle;
use crate::error::{MaxSatError, Result};
use rand::Rng;

/// Ranking strategy, selected by configuration.
///
/// # Examples
///
/// ```
/// use u_maxsat::ga::Ranking;
///
/// let classic = Ranking::classic();
/// assert_eq!(classic, Ranking::Classic { p_init: 0.65, p_final: 0.35 });
///
/// let lagrangian = Ranking::lagrangian();
/// assert_eq!(lagrangian, Ranking::Lagrangian { alpha: 0.05, beta: 0.2 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ranking {
    /// Stochastic bubble ranking with a linearly decaying comparison probability.
    Classic {
        /// Penalty-comparison probability at generation 0.
        p_init: f64,
        /// Penalty-comparison probability at the generation cap.
        p_final: f64,
    },

    /// Lagrangian-relaxation ranking with an adaptive multiplier.
    Lagrangian {
        /// Adaptation rate of the multiplier.
        alpha: f64,
        /// Target share of individuals with unsatisfied clauses.
        beta: f64,
    },
}

impl Default for Ranking {
    fn default() -> Self {
        Self::classic()
    }
}

/// Output of one ranking pass.
#[derive(Debug, Clone)]
pub struct RankOutcome {
    /// The population reordered best-first.
    pub ranked: Population,

    /// The adapted multiplier, for [`Ranking::Lagrangian`] only.
    pub multiplier: Option<LagrangeMultiplier>,
}

impl Ranking {
    /// Classic ranking with `p_init = 0.65`, `p_final = 0.35`.
    pub fn classic() -> Self {
        Ranking::Classic {
            p_init: 0.65,
            p_final: 0.35,
        }
    }

    /// Lagrangian ranking with `alpha = 0.05`, `beta = 0.2`.
    pub fn lagrangian() -> Self {
        Ranking::Lagrangian {
            alpha: 0.05,
            beta: 0.2,
        }
    }

    /// Ranks `population` for the given generation.
    ///
    /// `multiplier` is only read by the Lagrangian strategy; the caller
    /// must store the returned value and pass it to the next generation.
    ///
    /// # Errors
    /// [`MaxSatError::EmptyPopulation`] for an empty population and any
    /// evaluation error from the oracle.
    pub fn rank<R: Rng>(
        &self,
        oracle: &FitnessOracle,
        population: &[Individual],
        generation: usize,
        max_generations: usize,
        multiplier: LagrangeMultiplier,
        rng: &mut R,
    ) -> Result<RankOutcome> {
        match *self {
            Ranking::Classic { p_init, p_final } => {
                let p = classic_probability(generation, max_generations, p_init, p_final);
                let ranked = stochastic_ranking_classic(oracle, population, p, rng)?;
                Ok(RankOutcome {
                    ranked,
                    multiplier: None,
                })
            }
            Ranking::Lagrangian { alpha, beta } => {
                let (ranked, updated) =
                    stochastic_ranking_lagrangian(oracle, population, multiplier, alpha, beta)?;
                Ok(RankOutcome {
                    ranked,
                    multiplier: Some(updated),
                })
            }
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match *self {
            Ranking::Classic { p_init, p_final } => {
                for (name, p) in [("p_init", p_init), ("p_final", p_final)] {
                    if !(0.0..=1.0).contains(&p) {
                        return Err(MaxSatError::InvalidConfig(format!(
                            "{name} must lie in [0, 1], got {p}"
                        )));
                    }
                }
            }
            Ranking::Lagrangian { alpha, beta } => {
                if !alpha.is_finite() || alpha < 0.0 {
                    return Err(MaxSatError::InvalidConfig(format!(
                        "alpha must be finite and non-negative, got {alpha}"
                    )));
                }
                if !(0.0..=1.0).contains(&beta) {
                    return Err(MaxSatError::InvalidConfig(format!(
                        "beta must lie in [0, 1], got {beta}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Penalty-comparison probability for `generation`:
/// `p_init - (p_init - p_final) * generation / max_generations`.
///
/// A zero generation cap is treated as generation 0.
pub fn classic_probability(
    generation: usize,
    max_generations: usize,
    p_init: f64,
    p_final: f64,
) -> f64 {
    if max_generations == 0 {
        return p_init;
    }
    let progress = generation as f64 / max_generations as f64;
    p_init - (p_init - p_final) * progress
}

struct Scored {
    individual: Individual,
    fitness: usize,
    penalty: usize,
}

fn score_population(oracle: &FitnessOracle, population: &[Individual]) -> Result<Vec<Scored>> {
    if population.is_empty() {
        return Err(MaxSatError::EmptyPopulation);
    }
    let scores = oracle.score_batch(population)?;
    Ok(population
        .iter()
        .zip(scores)
        .map(|(individual, (fitness, penalty))| Scored {
            individual: individual.clone(),
            fitness,
            penalty,
        })
        .collect())
}

/// Classic stochastic ranking with penalty-comparison probability `p`.
///
/// Performs `n` bubble passes over adjacent pairs. A pair is swapped when
/// the left individual has the larger penalty and a fresh draw falls
/// below `p`, or when penalties tie and the left has strictly lower
/// fitness. With `p = 1` this is a deterministic penalty-then-fitness sort.
///
/// Scores are computed once per individual, not per comparison.
///
/// # Complexity
/// O(n²) comparisons, O(n · m) evaluation for `m` clauses
pub fn stochastic_ranking_classic<R: Rng>(
    oracle: &FitnessOracle,
    population: &[Individual],
    p: f64,
    rng: &mut R,
) -> Result<Population> {
    let mut ranked = score_population(oracle, population)?;
    let n = ranked.len();

    for _ in 0..n {
        for i in 0..n - 1 {
            let (left, right) = (&ranked[i], &ranked[i + 1]);
            let swap = (left.penalty > right.penalty && rng.random::<f64>() < p)
                || (left.penalty == right.penalty && left.fitness < right.fitness);
            if swap {
                ranked.swap(i, i + 1);
            }
        }
    }

    Ok(ranked.into_iter().map(|s| s.individual).collect())
}

/// Lagrangian-relaxation ranking.
///
/// Sorts by `fitness - λ·penalty` descending (stable, so ties keep their
/// input order) and returns the multiplier adapted as
/// `λ · (1 + alpha · (violation_ratio - beta))`, floored at
/// [`LagrangeMultiplier::FLOOR`].
pub fn stochastic_ranking_lagrangian(
    oracle: &FitnessOracle,
    population: &[Individual],
    multiplier: LagrangeMultiplier,
    alpha: f64,
    beta: f64,
) -> Result<(Population, LagrangeMultiplier)> {
    let scored = score_population(oracle, population)?;
    let lambda = multiplier.value();
    let violated = scored.iter().filter(|s| s.penalty > 0).count();

    let mut relaxed: Vec<(f64, Individual)> = scored
        .into_iter()
        .map(|s| (s.fitness as f64 - lambda * s.penalty as f64, s.individual))
        .collect();
    relaxed.sort_by(|a, b| b.0.total_cmp(&a.0));

    let violation_ratio = violated as f64 / population.len() as f64;
    let mut updated = multiplier;
    updated.update(violation_ratio, alpha, beta);

    Ok((relaxed.into_iter().map(|(_, ind)| ind).collect(), updated))
}

/// The Lagrangian multiplier `λ`, kept strictly positive.
///
/// This is the only state carried from one generation to the next besides
/// the population itself.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LagrangeMultiplier(f64);

impl LagrangeMultiplier {
    /// Lower bound applied after every update.
    pub const FLOOR: f64 = 1e-5;

    /// Creates a multiplier, raising `value` to [`Self::FLOOR`] if needed.
    pub fn new(value: f64) -> Self {
        Self(value.max(Self::FLOOR))
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Applies one adaptation step and returns the new value.
    ///
    /// The multiplier grows when more than `beta` of the population
    /// violates some clause and shrinks otherwise. A non-finite result
    /// collapses to the floor.
    pub fn update(&mut self, violation_ratio: f64, alpha: f64, beta: f64) -> f64 {
        let next = self.0 * (1.0 + alpha * (violation_ratio - beta));
        self.0 = if next.is_finite() {
            next.max(Self::FLOOR)
        } else {
            Self::FLOOR
        };
        self.0
    }
}

impl Default for LagrangeMultiplier {
    fn default() -> Self {
        Self(1.0)
    }
}
