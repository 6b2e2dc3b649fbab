//! Core trait definitions for the GA engine.
//!
//! [`Individual`] and [`GaProblem`] form the contract between the
//! generational loop in [`GaRunner`](super::GaRunner) and a concrete
//! problem such as volunteer assignment.

use rand::Rng;

/// Marker trait for fitness values.
///
/// Lower fitness is better (minimization). Fitness must be comparable and
/// cheaply copyable.
pub trait Fitness: PartialOrd + Copy + Send + Sync + std::fmt::Debug + 'static {
    /// Value carried by individuals that have not been evaluated yet.
    fn worst() -> Self;

    /// Converts the fitness to `f64` for logging and history.
    fn to_f64(self) -> f64;
}

impl Fitness for f64 {
    fn worst() -> Self {
        f64::INFINITY
    }

    fn to_f64(self) -> f64 {
        self
    }
}

/// A candidate solution in the GA population.
///
/// Individuals carry their own fitness. The runner calls
/// [`GaProblem::evaluate`] and stores the value with
/// [`set_fitness`](Individual::set_fitness).
pub trait Individual: Clone + Send + Sync {
    /// The fitness type.
    type Fitness: Fitness;

    /// Returns the current fitness of this individual.
    fn fitness(&self) -> Self::Fitness;

    /// Sets the fitness of this individual.
    fn set_fitness(&mut self, fitness: Self::Fitness);
}

/// Defines a GA optimization problem.
///
/// 1. **Initialization**: create a random individual
/// 2. **Evaluation**: compute its fitness
/// 3. **Crossover**: recombine two parents into two offspring
/// 4. **Mutation**: perturb genes of an offspring at a per-gene rate
///
/// `evaluate` must be free of side effects: the runner may call it from
/// several threads at once when parallel evaluation is enabled.
pub trait GaProblem: Send + Sync {
    /// The individual (solution) type for this problem.
    type Individual: Individual;

    /// Creates a random individual.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Evaluates an individual. Lower is better.
    fn evaluate(&self, individual: &Self::Individual) -> <Self::Individual as Individual>::Fitness;

    /// Recombines two parents into an offspring pair.
    ///
    /// Called only when crossover fires for the pair. The default
    /// implementation returns copies of both parents.
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        parent2: &Self::Individual,
        _rng: &mut R,
    ) -> (Self::Individual, Self::Individual) {
        (parent1.clone(), parent2.clone())
    }

    /// Mutates an individual in place, each gene independently with
    /// probability `rate`.
    ///
    /// The default implementation is a no-op.
    fn mutate<R: Rng>(&self, _individual: &mut Self::Individual, _rate: f64, _rng: &mut R) {}

    /// Called at the end of each generation with that generation's best
    /// fitness. The default implementation is a no-op.
    fn on_generation(
        &self,
        _generation: usize,
        _best_fitness: <Self::Individual as Individual>::Fitness,
    ) {
    }
}
