//! GA configuration.
//!
//! [`GaConfig`] holds every parameter that controls the generational loop.

use crate::error::{AssignError, AssignResult};

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use volunteer_assign::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 200);
/// assert_eq!(config.tournament_size, 5);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use volunteer_assign::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(50)
///     .with_max_generations(100)
///     .with_seed(42);
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GaConfig {
    /// Number of individuals in the population.
    ///
    /// An odd size is allowed; the last offspring pair of a generation then
    /// contributes a single individual.
    pub population_size: usize,

    /// Number of generations. The loop always runs all of them.
    pub max_generations: usize,

    /// Contenders drawn (with replacement) per tournament.
    pub tournament_size: usize,

    /// Probability of applying crossover to a parent pair (0.0–1.0).
    ///
    /// When crossover does not fire, the offspring are copies of the parents.
    pub crossover_rate: f64,

    /// Probability of resetting each gene of each offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Whether to evaluate individuals in parallel.
    ///
    /// Only takes effect with the `parallel` feature. Evaluation never
    /// draws random numbers, so the result is the same either way.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a fresh seed for every run.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 200,
            tournament_size: 5,
            crossover_rate: 0.7,
            mutation_rate: 0.1,
            parallel: false,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the per-gene mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AssignResult<()> {
        if self.population_size < 2 {
            return Err(AssignError::InvalidConfig(
                "population_size must be at least 2".into(),
            ));
        }
        if self.max_generations == 0 {
            return Err(AssignError::InvalidConfig(
                "max_generations must be at least 1".into(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(AssignError::InvalidConfig(
                "tournament_size must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) || !(0.0..=1.0).contains(&self.mutation_rate)
        {
            return Err(AssignError::InvalidConfig(
                "rates must lie in [0, 1]".into(),
            ));
        }
        Ok(())
    }
}
