//! GA generational loop.
//!
//! [`GaRunner`] drives the complete evolutionary process:
//! initialization → evaluation → (selection → crossover → mutation →
//! evaluation) × generations → termination.
//!
//! Replacement is wholesale: each generation's offspring replace the prior
//! population entirely and no individual is carried over unchanged. The
//! best fitness of the population is therefore non-increasing only in
//! expectation, not from one generation to the next.

use super::config::GaConfig;
use super::selection::tournament;
use super::types::{Fitness, GaProblem, Individual};
use crate::error::AssignResult;
use crate::random::rng_for;
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// The lowest-fitness individual of the final population.
    pub best: I,

    /// Fitness of `best` as computed during the search.
    pub best_fitness: I::Fitness,

    /// Number of generations executed.
    pub generations: usize,

    /// Best fitness of the initial population followed by the best fitness
    /// of each generation's population.
    pub fitness_history: Vec<f64>,
}

/// Executes the GA generational loop.
///
/// # Usage
///
/// ```ignore
/// let problem = MyProblem::new();
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config)?;
/// println!("Best fitness: {:?}", result.best_fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA for exactly `config.max_generations` generations.
    ///
    /// With `config.seed` set, the run is fully reproducible: the same
    /// problem and seed give the same chromosome sequence and final fitness.
    pub fn run<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
    ) -> AssignResult<GaResult<P::Individual>> {
        config.validate()?;

        let mut rng = rng_for(config.seed);
        let size = config.population_size;

        let mut population: Vec<P::Individual> = (0..size)
            .map(|_| problem.create_individual(&mut rng))
            .collect();
        evaluate_population(problem, &mut population, config.parallel);

        let mut fitness_history = Vec::with_capacity(config.max_generations + 1);
        fitness_history.push(best_fitness(&population).to_f64());

        for gen in 0..config.max_generations {
            let mut next_gen: Vec<P::Individual> = Vec::with_capacity(size);

            while next_gen.len() < size {
                let p1 = tournament(&population, config.tournament_size, &mut rng);
                let p2 = tournament(&population, config.tournament_size, &mut rng);

                let (mut child1, mut child2) =
                    if rng.random_range(0.0..1.0) < config.crossover_rate {
                        problem.crossover(&population[p1], &population[p2], &mut rng)
                    } else {
                        (population[p1].clone(), population[p2].clone())
                    };

                problem.mutate(&mut child1, config.mutation_rate, &mut rng);
                problem.mutate(&mut child2, config.mutation_rate, &mut rng);

                next_gen.push(child1);
                if next_gen.len() < size {
                    next_gen.push(child2);
                }
            }

            population = next_gen;
            evaluate_population(problem, &mut population, config.parallel);

            let gen_best = best_fitness(&population);
            fitness_history.push(gen_best.to_f64());
            problem.on_generation(gen + 1, gen_best);
        }

        // Stable sort: ties resolve to population order.
        population.sort_by(|a, b| {
            a.fitness()
                .partial_cmp(&b.fitness())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let best = population.swap_remove(0);

        Ok(GaResult {
            best_fitness: best.fitness(),
            best,
            generations: config.max_generations,
            fitness_history,
        })
    }
}

/// Evaluate all individuals in the population.
#[cfg(feature = "parallel")]
fn evaluate_population<P: GaProblem>(
    problem: &P,
    population: &mut [P::Individual],
    parallel: bool,
) {
    if parallel {
        population.par_iter_mut().for_each(|ind| {
            let f = problem.evaluate(ind);
            ind.set_fitness(f);
        });
    } else {
        for ind in population.iter_mut() {
            let f = problem.evaluate(ind);
            ind.set_fitness(f);
        }
    }
}

/// Evaluate all individuals in the population.
#[cfg(not(feature = "parallel"))]
fn evaluate_population<P: GaProblem>(
    problem: &P,
    population: &mut [P::Individual],
    _parallel: bool,
) {
    for ind in population.iter_mut() {
        let f = problem.evaluate(ind);
        ind.set_fitness(f);
    }
}

/// Lowest fitness in a non-empty population.
fn best_fitness<I: Individual>(population: &[I]) -> I::Fitness {
    population
        .iter()
        .map(Individual::fitness)
        .fold(I::Fitness::worst(), |best, f| if f < best { f } else { best })
}

// ============================================================================
// Tests
// ============================================================================
