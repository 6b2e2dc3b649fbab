//! Volunteer assignment as a [`GaProblem`].

use super::fitness::CostModel;
use crate::ga::operators::{reset_mutation, single_point_crossover};
use crate::ga::{Fitness, GaProblem, Individual};
use rand::Rng;
use tracing::debug;

/// A candidate assignment: `genes[i]` is the service index for volunteer `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    pub genes: Vec<usize>,
    pub fitness: f64,
}

impl Chromosome {
    pub fn new(genes: Vec<usize>) -> Self {
        Self {
            genes,
            fitness: f64::worst(),
        }
    }
}

impl Individual for Chromosome {
    type Fitness = f64;

    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

/// Assigns every volunteer one of the run's services, priced by a
/// [`CostModel`].
#[derive(Debug)]
pub struct AssignmentProblem {
    model: CostModel,
}

impl AssignmentProblem {
    pub fn new(model: CostModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &CostModel {
        &self.model
    }

    fn random_service<R: Rng>(&self, rng: &mut R) -> usize {
        rng.random_range(0..self.model.service_count())
    }
}

impl GaProblem for AssignmentProblem {
    type Individual = Chromosome;

    /// Uniformly random service per volunteer. With no services there is
    /// nothing to draw from and the chromosome is left empty.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Chromosome {
        if self.model.service_count() == 0 {
            return Chromosome::new(Vec::new());
        }
        let genes = (0..self.model.volunteer_count())
            .map(|_| self.random_service(rng))
            .collect();
        Chromosome::new(genes)
    }

    fn evaluate(&self, individual: &Chromosome) -> f64 {
        self.model.evaluate(&individual.genes)
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut R,
    ) -> (Chromosome, Chromosome) {
        let (c1, c2) = single_point_crossover(&parent1.genes, &parent2.genes, rng);
        (Chromosome::new(c1), Chromosome::new(c2))
    }

    fn mutate<R: Rng>(&self, individual: &mut Chromosome, rate: f64, rng: &mut R) {
        if self.model.service_count() == 0 {
            return;
        }
        reset_mutation(&mut individual.genes, rate, rng, |r| self.random_service(r));
    }

    fn on_generation(&self, generation: usize, best_fitness: f64) {
        debug!(generation, best_fitness, "generation complete");
    }
}
