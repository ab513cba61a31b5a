//! Evolutionary run configuration.
//!
//! [`BgaConfig`] holds every parameter that controls the generational loop.

use super::ranking::Ranking;
use crate::error::{MaxSatError, Result};
use std::time::Duration;

/// What to do with the last selected individual when the count is odd.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OddParentPolicy {
    /// Copy the unpaired individual into the offspring unchanged.
    #[default]
    CarryOver,

    /// Leave the unpaired individual out, producing one child fewer.
    Drop,
}

/// What survivor selection does when offspring cannot fill the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShortfallPolicy {
    /// Fill the gap with the best non-elite parents.
    #[default]
    PadWithParents,

    /// Accept a smaller population for the next generation.
    Shrink,

    /// Fail the run with [`MaxSatError::DegenerateSizing`].
    Reject,
}

/// Configuration for the binary genetic algorithm.
///
/// # Defaults
///
/// ```
/// use u_maxsat::ga::{BgaConfig, Ranking};
///
/// let config = BgaConfig::default();
/// assert_eq!(config.population_size, 38);
/// assert_eq!(config.max_generations, 50);
/// assert_eq!(config.ranking, Ranking::classic());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_maxsat::ga::{BgaConfig, Ranking};
///
/// let config = BgaConfig::default()
///     .with_population_size(60)
///     .with_ranking(Ranking::lagrangian())
///     .with_elite_size(4)
///     .with_time_budget_secs(2.5)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BgaConfig {
    /// Number of individuals created by the heuristic initializer.
    ///
    /// Runs started from a caller-supplied population use that
    /// population's length instead.
    pub population_size: usize,

    /// Generation cap. Zero returns the initial population's best.
    pub max_generations: usize,

    /// Probability of applying one-point crossover to a pair (0.0–1.0).
    pub crossover_rate: f64,

    /// Per-bit flip probability (0.0–1.0).
    pub mutation_rate: f64,

    /// Number of parents that survive unconditionally.
    pub elite_size: usize,

    /// Wall-clock budget, checked at the start of every generation.
    ///
    /// A zero budget expires before the first generation. `None` disables
    /// time-based termination.
    pub time_budget: Option<Duration>,

    /// Ranking strategy applied before breeding.
    pub ranking: Ranking,

    pub odd_parent_policy: OddParentPolicy,

    pub shortfall_policy: ShortfallPolicy,

    /// Score populations on the rayon thread pool.
    ///
    /// Only effective with the `parallel` feature. Randomness stays on the
    /// driver thread, so results do not depend on this flag.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for BgaConfig {
    fn default() -> Self {
        Self {
            population_size: 38,
            max_generations: 50,
            crossover_rate: 0.8,
            mutation_rate: 0.01,
            elite_size: 2,
            time_budget: Some(Duration::from_secs(10)),
            ranking: Ranking::default(),
            odd_parent_policy: OddParentPolicy::default(),
            shortfall_policy: ShortfallPolicy::default(),
            parallel: false,
            seed: None,
        }
    }
}

impl BgaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the generation cap.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the per-bit mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the number of elites.
    pub fn with_elite_size(mut self, n: usize) -> Self {
        self.elite_size = n;
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Sets the wall-clock budget in (fractional) seconds.
    ///
    /// Negative or NaN values are treated as zero. Values too large for a
    /// [`Duration`], infinity included, saturate to [`Duration::MAX`].
    pub fn with_time_budget_secs(self, secs: f64) -> Self {
        let budget = if secs.is_nan() || secs <= 0.0 {
            Duration::ZERO
        } else {
            Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
        };
        self.with_time_budget(budget)
    }

    /// Removes the wall-clock budget.
    pub fn without_time_budget(mut self) -> Self {
        self.time_budget = None;
        self
    }

    /// Sets the ranking strategy.
    pub fn with_ranking(mut self, ranking: Ranking) -> Self {
        self.ranking = ranking;
        self
    }

    pub fn with_odd_parent_policy(mut self, policy: OddParentPolicy) -> Self {
        self.odd_parent_policy = policy;
        self
    }

    pub fn with_shortfall_policy(mut self, policy: ShortfallPolicy) -> Self {
        self.shortfall_policy = policy;
        self
    }

    /// Enables or disables parallel population scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset matching the classroom experiment driver.
    ///
    /// - Population: 38, Generations: 20, Time budget: 25s
    /// - Crossover: 0.88, Mutation: 0.04, Elites: 4
    pub fn experiment() -> Self {
        Self {
            population_size: 38,
            max_generations: 20,
            crossover_rate: 0.88,
            mutation_rate: 0.04,
            elite_size: 4,
            time_budget: Some(Duration::from_secs(25)),
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`MaxSatError::InvalidConfig`] describing the first bad parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(MaxSatError::InvalidConfig(
                "population_size must be at least 2".into(),
            ));
        }
        if self.elite_size > self.population_size {
            return Err(MaxSatError::InvalidConfig(format!(
                "elite_size {} exceeds population_size {}",
                self.elite_size, self.population_size
            )));
        }
        for (name, rate) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(MaxSatError::InvalidConfig(format!(
                    "{name} must lie in [0, 1], got {rate}"
                )));
            }
        }
        self.ranking.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BgaConfig::default();
        assert_eq!(config.population_size, 38);
        assert_eq!(config.max_generations, 50);
        assert!((config.crossover_rate - 0.8).abs() < 1e-10);
        assert!((config.mutation_rate - 0.01).abs() < 1e-10);
        assert_eq!(config.elite_size, 2);
        assert_eq!(config.time_budget, Some(Duration::from_secs(10)));
        assert_eq!(config.ranking, Ranking::classic());
        assert_eq!(config.odd_parent_policy, OddParentPolicy::CarryOver);
        assert_eq!(config.shortfall_policy, ShortfallPolicy::PadWithParents);
        assert!(!config.parallel);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = BgaConfig::default()
            .with_population_size(100)
            .with_max_generations(300)
            .with_crossover_rate(0.7)
            .with_mutation_rate(0.05)
            .with_elite_size(6)
            .with_ranking(Ranking::lagrangian())
            .with_odd_parent_policy(OddParentPolicy::Drop)
            .with_shortfall_policy(ShortfallPolicy::Reject)
            .with_parallel(true)
            .with_seed(42);

        assert_eq!(config.population_size, 100);
        assert_eq!(config.max_generations, 300);
        assert!((config.crossover_rate - 0.7).abs() < 1e-10);
        assert!((config.mutation_rate - 0.05).abs() < 1e-10);
        assert_eq!(config.elite_size, 6);
        assert_eq!(config.ranking, Ranking::lagrangian());
        assert_eq!(config.odd_parent_policy, OddParentPolicy::Drop);
        assert_eq!(config.shortfall_policy, ShortfallPolicy::Reject);
        assert!(config.parallel);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_clamp_rates() {
        let config = BgaConfig::default()
            .with_crossover_rate(-0.5)
            .with_mutation_rate(2.0);
        assert!((config.crossover_rate - 0.0).abs() < 1e-10);
        assert!((config.mutation_rate - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_time_budget_builders() {
        let config = BgaConfig::default().with_time_budget_secs(1.5);
        assert_eq!(config.time_budget, Some(Duration::from_millis(1500)));

        let config = BgaConfig::default().with_time_budget_secs(-3.0);
        assert_eq!(config.time_budget, Some(Duration::ZERO));

        let config = BgaConfig::default().without_time_budget();
        assert!(config.time_budget.is_none());
    }

    #[test]
    fn test_time_budget_secs_saturates() {
        let config = BgaConfig::default().with_time_budget_secs(1e30);
        assert_eq!(config.time_budget, Some(Duration::MAX));

        let config = BgaConfig::default().with_time_budget_secs(f64::INFINITY);
        assert_eq!(config.time_budget, Some(Duration::MAX));

        let config = BgaConfig::default().with_time_budget_secs(f64::NAN);
        assert_eq!(config.time_budget, Some(Duration::ZERO));
    }

    #[test]
    fn test_validate_ok() {
        assert!(BgaConfig::default().validate().is_ok());
        assert!(BgaConfig::default().with_max_generations(0).validate().is_ok());
        assert!(BgaConfig::default()
            .with_time_budget(Duration::ZERO)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_population_too_small() {
        let config = BgaConfig::default().with_population_size(1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_elite_too_large() {
        let config = BgaConfig::default()
            .with_population_size(4)
            .with_elite_size(5);
        assert!(matches!(
            config.validate(),
            Err(MaxSatError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_raw_rate_out_of_range() {
        let config = BgaConfig {
            mutation_rate: 1.5,
            ..BgaConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_ranking_parameters() {
        let config = BgaConfig::default().with_ranking(Ranking::Lagrangian {
            alpha: 0.05,
            beta: 2.0,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_preset_experiment() {
        let config = BgaConfig::experiment();
        assert_eq!(config.population_size, 38);
        assert_eq!(config.max_generations, 20);
        assert!((config.crossover_rate - 0.88).abs() < 1e-15);
        assert!((config.mutation_rate - 0.04).abs() < 1e-15);
        assert_eq!(config.elite_size, 4);
        assert_eq!(config.time_budget, Some(Duration::from_secs(25)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_preset_chainable() {
        let config = BgaConfig::experiment()
            .with_ranking(Ranking::lagrangian())
            .with_seed(42);
        assert_eq!(config.max_generations, 20);
        assert_eq!(config.seed, Some(42));
    }
}
