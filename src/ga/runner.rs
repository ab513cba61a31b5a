//! Generational loop execution.
//!
//! [`BgaSession`] owns all mutable run state (population, generation
//! counter, Lagrangian multiplier, best-fitness tracking) and advances one
//! generation per [`step`](BgaSession::step):
//! time check → ranking → crossover + mutation → survivor selection →
//! re-evaluation. [`BgaRunner`] drives a session to completion.
//!
//! ```text
//! Init ──step──▶ Running ──step──▶ … ──▶ TimeExpired | GenerationCapReached ──finish──▶ Done
//! ```

use super::config::{BgaConfig, OddParentPolicy};
use super::init::initialize_population;
use super::operators::{bit_flip_mutation, one_point_crossover, Offspring};
use super::ranking::LagrangeMultiplier;
use super::survivor::select_survivors;
use super::types::{Individual, Population};
use crate::clause::FitnessOracle;
use crate::error::{MaxSatError, Result};
use crate::random::rng_from_option;
use rand::Rng;
use std::borrow::Cow;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Lifecycle state of a [`BgaSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Created, no generation executed yet.
    Init,
    /// At least one generation executed, no stop condition hit.
    Running,
    /// The wall-clock budget was exhausted at a generation boundary.
    TimeExpired,
    /// `generation == max_generations`.
    GenerationCapReached,
    /// Result extracted.
    Done,
}

impl RunState {
    /// Whether no further generation will run.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RunState::TimeExpired | RunState::GenerationCapReached | RunState::Done
        )
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    GenerationCap,
    TimeBudget,
    /// The caller finished the session before a stop condition.
    Interrupted,
}

/// Result of an evolutionary run.
#[derive(Debug, Clone)]
pub struct BgaResult {
    /// The fittest individual seen in any generation, initial one included.
    pub best: Individual,

    /// Fitness (satisfied clauses) of `best`.
    pub best_fitness: usize,

    /// The fittest individual of the final population.
    ///
    /// May be worse than `best`: elitism only protects rank among the
    /// immediate parents.
    pub final_best: Individual,

    /// Fitness of `final_best`.
    pub final_best_fitness: usize,

    /// Number of generations executed.
    pub generations: usize,

    pub termination: Termination,

    /// Final Lagrangian multiplier (stays at 1.0 under classic ranking).
    pub multiplier: f64,

    /// Wall-clock time from session start to result extraction.
    pub elapsed: Duration,

    /// Best fitness of the current population: initial population first,
    /// then one entry per executed generation.
    pub fitness_history: Vec<usize>,

    /// Individuals produced by the generational loop: the sum of the
    /// population sizes after each executed generation.
    pub evaluations: usize,
}

/// Mutable state of one evolutionary run.
///
/// Sessions are independent: nothing is shared between two sessions, so
/// runs are reproducible in isolation given the same seed.
#[derive(Debug)]
pub struct BgaSession<'a> {
    oracle: Cow<'a, FitnessOracle>,
    config: &'a BgaConfig,
    population: Population,
    generation: usize,
    evaluations: usize,
    multiplier: LagrangeMultiplier,
    best_fitness: Option<usize>,
    champion: Individual,
    champion_fitness: usize,
    fitness_history: Vec<usize>,
    started: Instant,
    state: RunState,
}

impl<'a> BgaSession<'a> {
    /// Starts a session from a caller-supplied initial population.
    ///
    /// The wall-clock budget starts counting here. When
    /// [`BgaConfig::parallel`] is set and `oracle` scores sequentially, the
    /// session scores with a parallel copy of it.
    ///
    /// # Errors
    /// [`MaxSatError::InvalidConfig`] for an invalid configuration,
    /// [`MaxSatError::EmptyPopulation`] for an empty population, and
    /// [`MaxSatError::AssignmentLengthMismatch`] when an individual does
    /// not have exactly `num_variables` bits.
    pub fn new(
        oracle: &'a FitnessOracle,
        config: &'a BgaConfig,
        initial_population: Population,
    ) -> Result<Self> {
        config.validate()?;
        if initial_population.is_empty() {
            return Err(MaxSatError::EmptyPopulation);
        }
        let n = oracle.num_variables();
        if let Some(bad) = initial_population.iter().find(|ind| ind.len() != n) {
            return Err(MaxSatError::AssignmentLengthMismatch {
                expected: n,
                actual: bad.len(),
            });
        }

        let (idx, fitness) = find_best(oracle, &initial_population)?;
        let champion = initial_population[idx].clone();

        info!(
            population = initial_population.len(),
            variables = n,
            clauses = oracle.num_clauses(),
            initial_best = fitness,
            "starting evolutionary run"
        );

        let oracle = if config.parallel && !oracle.is_parallel() {
            Cow::Owned(oracle.clone().with_parallel(true))
        } else {
            Cow::Borrowed(oracle)
        };

        Ok(Self {
            oracle,
            config,
            population: initial_population,
            generation: 0,
            evaluations: 0,
            multiplier: LagrangeMultiplier::default(),
            best_fitness: None,
            champion,
            champion_fitness: fitness,
            fitness_history: vec![fitness],
            started: Instant::now(),
            state: RunState::Init,
        })
    }

    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[inline]
    pub fn generation(&self) -> usize {
        self.generation
    }

    #[inline]
    pub fn multiplier(&self) -> f64 {
        self.multiplier.value()
    }

    #[inline]
    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    /// Best fitness observed over executed generations, `None` before the first.
    #[inline]
    pub fn best_fitness(&self) -> Option<usize> {
        self.best_fitness
    }

    /// Executes one generation, or records why none can run.
    ///
    /// Returns the state after the step. Once terminal, further calls do
    /// nothing and return the same state.
    ///
    /// # Errors
    /// Evaluation and operator errors are fatal to the run and propagated.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> Result<RunState> {
        if self.state.is_terminal() {
            return Ok(self.state);
        }

        if self.generation >= self.config.max_generations {
            self.state = RunState::GenerationCapReached;
            return Ok(self.state);
        }
        if let Some(budget) = self.config.time_budget {
            if self.started.elapsed() >= budget {
                info!(generation = self.generation, "time budget reached");
                self.state = RunState::TimeExpired;
                return Ok(self.state);
            }
        }

        let outcome = self.config.ranking.rank(
            &self.oracle,
            &self.population,
            self.generation,
            self.config.max_generations,
            self.multiplier,
            rng,
        )?;
        if let Some(updated) = outcome.multiplier {
            self.multiplier = updated;
        }
        let selected = outcome.ranked;

        let offspring = breed(&selected, self.config, rng)?;
        let next = select_survivors(
            &self.oracle,
            &selected,
            offspring,
            self.config.elite_size,
            self.config.shortfall_policy,
        )?;
        if next.is_empty() {
            return Err(MaxSatError::EmptyPopulation);
        }
        self.evaluations += next.len();
        self.population = next;

        let (idx, fitness) = find_best(&self.oracle, &self.population)?;
        self.fitness_history.push(fitness);
        if self.best_fitness.map_or(true, |best| fitness > best) {
            self.best_fitness = Some(fitness);
            info!(generation = self.generation, fitness, "new best fitness");
        }
        if fitness > self.champion_fitness {
            self.champion = self.population[idx].clone();
            self.champion_fitness = fitness;
        }

        debug!(
            generation = self.generation,
            best = fitness,
            population = self.population.len(),
            multiplier = self.multiplier.value(),
            "generation complete"
        );

        self.generation += 1;
        self.state = RunState::Running;
        Ok(self.state)
    }

    /// Ends the session and extracts the result.
    pub fn finish(mut self) -> Result<BgaResult> {
        let termination = match self.state {
            RunState::GenerationCapReached => Termination::GenerationCap,
            RunState::TimeExpired => Termination::TimeBudget,
            _ => Termination::Interrupted,
        };
        self.state = RunState::Done;

        let (idx, final_best_fitness) = find_best(&self.oracle, &self.population)?;
        let elapsed = self.started.elapsed();

        info!(
            generations = self.generation,
            best = self.champion_fitness,
            final_best = final_best_fitness,
            ?termination,
            ?elapsed,
            "evolutionary run finished"
        );

        Ok(BgaResult {
            final_best: self.population[idx].clone(),
            final_best_fitness,
            best: self.champion,
            best_fitness: self.champion_fitness,
            generations: self.generation,
            termination,
            multiplier: self.multiplier.value(),
            elapsed,
            fitness_history: self.fitness_history,
            evaluations: self.evaluations,
        })
    }
}

/// Executes the evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_maxsat::clause::{ClauseSet, FitnessOracle};
/// use u_maxsat::ga::{BgaConfig, BgaRunner};
///
/// let clauses = ClauseSet::from_literals(3, vec![vec![1, -2], vec![2, 3], vec![-1, -3]]).unwrap();
/// let oracle = FitnessOracle::new(clauses);
/// let config = BgaConfig::default()
///     .with_population_size(10)
///     .with_mutation_rate(0.1)
///     .with_seed(42);
///
/// let result = BgaRunner::solve(&oracle, &config).unwrap();
/// assert_eq!(result.best_fitness, 3);
/// ```
pub struct BgaRunner;

impl BgaRunner {
    /// Seeds a population with the heuristic initializer and runs to completion.
    pub fn solve(oracle: &FitnessOracle, config: &BgaConfig) -> Result<BgaResult> {
        let mut rng = rng_from_option(config.seed);
        Self::solve_with_rng(oracle, config, &mut rng)
    }

    /// Like [`solve`](Self::solve), drawing all randomness from `rng`.
    pub fn solve_with_rng<R: Rng>(
        oracle: &FitnessOracle,
        config: &BgaConfig,
        rng: &mut R,
    ) -> Result<BgaResult> {
        config.validate()?;
        let initial = initialize_population(oracle.clause_set(), config.population_size, rng);
        Self::run_with_rng(oracle, config, initial, rng)
    }

    /// Runs from a caller-supplied initial population.
    pub fn run(
        oracle: &FitnessOracle,
        config: &BgaConfig,
        initial_population: Population,
    ) -> Result<BgaResult> {
        let mut rng = rng_from_option(config.seed);
        Self::run_with_rng(oracle, config, initial_population, &mut rng)
    }

    /// Like [`run`](Self::run), drawing all randomness from `rng`.
    pub fn run_with_rng<R: Rng>(
        oracle: &FitnessOracle,
        config: &BgaConfig,
        initial_population: Population,
        rng: &mut R,
    ) -> Result<BgaResult> {
        let mut session = BgaSession::new(oracle, config, initial_population)?;
        while !session.step(rng)?.is_terminal() {}
        session.finish()
    }
}

/// Pairs consecutive selected individuals and applies crossover + mutation.
fn breed<R: Rng>(selected: &[Individual], config: &BgaConfig, rng: &mut R) -> Result<Population> {
    let mut offspring = Vec::with_capacity(selected.len());
    let mut pairs = selected.chunks_exact(2);

    for pair in &mut pairs {
        let Offspring { first, second, .. } =
            one_point_crossover(&pair[0], &pair[1], config.crossover_rate, rng)?;
        offspring.push(bit_flip_mutation(&first, config.mutation_rate, rng)?);
        offspring.push(bit_flip_mutation(&second, config.mutation_rate, rng)?);
    }

    if let [leftover] = pairs.remainder() {
        match config.odd_parent_policy {
            OddParentPolicy::CarryOver => offspring.push(leftover.clone()),
            OddParentPolicy::Drop => {}
        }
    }

    Ok(offspring)
}

/// Index and fitness of the first fittest individual.
fn find_best(oracle: &FitnessOracle, population: &[Individual]) -> Result<(usize, usize)> {
    let scores = oracle.score_batch(population)?;
    let mut best: Option<(usize, usize)> = None;
    for (i, (fitness, _)) in scores.into_iter().enumerate() {
        if best.map_or(true, |(_, f)| fitness > f) {
            best = Some((i, fitness));
        }
    }
    best.ok_or(MaxSatError::EmptyPopulation)
}

// ============================================================================
// Tests
// ============================================================================
