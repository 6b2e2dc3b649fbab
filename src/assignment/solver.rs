//! Runs the search for one snapshot and converts its best chromosome into
//! a publishable [`AssignmentResult`].

use super::fitness::CostModel;
use super::model::{Assignment, AssignmentResult, ServiceDetails, Volunteer};
use super::problem::{AssignmentProblem, Chromosome};
use crate::error::AssignResult;
use crate::ga::{GaConfig, GaRunner};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Message of the degenerate result returned when either input is empty.
pub const NO_INPUT_MESSAGE: &str = "Cannot run GA: No volunteers or services.";

/// Message of a completed search.
pub const COMPLETE_MESSAGE: &str = "Optimization complete. Best assignment found.";

/// Volunteer-to-service assignment by genetic algorithm.
///
/// Volunteers are laid out in ascending id order for the run, so a seeded
/// configuration reproduces the same assignment for the same snapshot.
#[derive(Debug, Clone, Default)]
pub struct AssignmentSolver {
    config: GaConfig,
}

impl AssignmentSolver {
    pub fn new(config: GaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Searches for a low-cost assignment of `volunteers` to `services`.
    ///
    /// Either input being empty short-circuits to a zero-cost result with
    /// no assignments; the search is never started on empty input.
    pub fn solve(
        &self,
        volunteers: &BTreeMap<String, Volunteer>,
        services: &[ServiceDetails],
    ) -> AssignResult<AssignmentResult> {
        info!(
            volunteers = volunteers.len(),
            services = services.len(),
            "starting assignment search"
        );
        if volunteers.is_empty() || services.is_empty() {
            return Ok(AssignmentResult::empty(NO_INPUT_MESSAGE));
        }

        let problem = AssignmentProblem::new(CostModel::new(volunteers.values(), services)?);
        let outcome = GaRunner::run(&problem, &self.config)?;
        info!(
            best_fitness = outcome.best_fitness,
            generations = outcome.generations,
            "assignment search finished"
        );

        let volunteer_ids: Vec<&str> = volunteers.keys().map(String::as_str).collect();
        to_result(&problem, &volunteer_ids, services, &outcome.best)
    }
}

/// Converts the best chromosome into published records.
///
/// The total cost is the chromosome's own search fitness. Per-volunteer
/// costs come from the same cost model, so they sum with the capacity
/// penalty to exactly that total.
fn to_result(
    problem: &AssignmentProblem,
    volunteer_ids: &[&str],
    services: &[ServiceDetails],
    best: &Chromosome,
) -> AssignResult<AssignmentResult> {
    let breakdown = problem.model().breakdown(&best.genes)?;
    debug_assert_eq!(breakdown.total(), best.fitness);

    for (service, load, capacity) in problem.model().overloaded(&breakdown.loads) {
        warn!(
            service = %services[service].id,
            load,
            capacity,
            "service over capacity in final assignment"
        );
    }

    let assignments = volunteer_ids
        .iter()
        .zip(&best.genes)
        .zip(&breakdown.placements)
        .map(|((&volunteer_id, &service), placement)| Assignment {
            volunteer_id: volunteer_id.to_string(),
            service_id: services[service].id.clone(),
            cost: placement.cost,
            preference_rank: placement.rank,
        })
        .collect();

    Ok(AssignmentResult {
        assignments,
        total_cost: best.fitness,
        message: COMPLETE_MESSAGE.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssignError;
    use std::collections::HashSet;

    fn volunteers(list: Vec<Volunteer>) -> BTreeMap<String, Volunteer> {
        list.into_iter().map(|v| (v.id.clone(), v)).collect()
    }

    fn solver() -> AssignmentSolver {
        AssignmentSolver::new(GaConfig::default().with_seed(42))
    }

    #[test]
    fn test_empty_inputs_short_circuit() {
        let result = solver().solve(&BTreeMap::new(), &[]).unwrap();
        assert_eq!(result.message, NO_INPUT_MESSAGE);
        assert_eq!(result.total_cost, 0.0);
        assert!(result.assignments.is_empty());

        let vs = volunteers(vec![Volunteer::new("v1", "V1")]);
        let result = solver().solve(&vs, &[]).unwrap();
        assert_eq!(result.message, NO_INPUT_MESSAGE);

        let ss = vec![ServiceDetails::new("s1", "S1", 1)];
        let result = solver().solve(&BTreeMap::new(), &ss).unwrap();
        assert_eq!(result.message, NO_INPUT_MESSAGE);
    }

    #[test]
    fn test_two_volunteers_two_services() {
        let vs = volunteers(vec![
            Volunteer::new("v1", "Volunteer 1").with_preference(1, "s1"),
            Volunteer::new("v2", "Volunteer 2").with_preference(1, "s2"),
        ]);
        let ss = vec![
            ServiceDetails::new("s1", "Service 1", 1),
            ServiceDetails::new("s2", "Service 2", 1),
        ];

        let result = solver().solve(&vs, &ss).unwrap();
        assert_eq!(result.message, COMPLETE_MESSAGE);
        assert_eq!(result.assignments.len(), 2);
        // Everyone gets their first choice within capacity.
        assert_eq!(result.total_cost, 0.0);
        for a in &result.assignments {
            assert_eq!(a.preference_rank, 1);
            assert_eq!(a.cost, 0.0);
        }
    }

    #[test]
    fn test_capacity_conflict_is_penalized() {
        let vs = volunteers(vec![
            Volunteer::new("v1", "Volunteer 1").with_preference(1, "s1"),
            Volunteer::new("v2", "Volunteer 2").with_preference(1, "s1"),
        ]);
        let ss = vec![ServiceDetails::new("s1", "Service 1", 1)];

        for seed in [1, 2, 3, 42] {
            let result = AssignmentSolver::new(GaConfig::default().with_seed(seed))
                .solve(&vs, &ss)
                .unwrap();
            assert_eq!(result.assignments.len(), 2);
            assert_eq!(result.total_cost, 1000.0, "seed {seed}");
        }
    }

    #[test]
    fn test_volunteer_without_preferences_pays_penalty() {
        let vs = volunteers(vec![Volunteer::new("v1", "Volunteer 1")]);
        let ss = vec![
            ServiceDetails::new("s1", "Service 1", 5),
            ServiceDetails::new("s2", "Service 2", 5),
        ];

        let result = solver().solve(&vs, &ss).unwrap();
        assert_eq!(result.assignments.len(), 1);
        assert_eq!(result.total_cost, 40.0);
        assert_eq!(result.assignments[0].preference_rank, 0);
        assert_eq!(result.assignments[0].cost, 40.0);
    }

    #[test]
    fn test_every_volunteer_assigned_once_to_known_service() {
        let ss: Vec<ServiceDetails> = (1..=4)
            .map(|i| ServiceDetails::new(format!("s{i}"), format!("Service {i}"), 2))
            .collect();
        let vs = volunteers(
            (1..=9)
                .map(|i| {
                    Volunteer::new(format!("v{i}"), format!("Volunteer {i}"))
                        .with_preference(1, format!("s{}", i % 4 + 1))
                        .with_preference(2, format!("s{}", (i + 1) % 4 + 1))
                })
                .collect(),
        );

        let result = solver().solve(&vs, &ss).unwrap();
        assert_eq!(result.assignments.len(), 9);

        let ids: HashSet<&str> = result
            .assignments
            .iter()
            .map(|a| a.volunteer_id.as_str())
            .collect();
        assert_eq!(ids.len(), 9);
        let known: HashSet<&str> = ss.iter().map(|s| s.id.as_str()).collect();
        assert!(result.assignments.iter().all(|a| known.contains(a.service_id.as_str())));
        assert!(result.total_cost >= 0.0);
    }

    #[test]
    fn test_total_cost_matches_assignment_costs_plus_penalty() {
        let ss = vec![
            ServiceDetails::new("s1", "Service 1", 1),
            ServiceDetails::new("s2", "Service 2", 1),
        ];
        let vs = volunteers(
            (1..=5)
                .map(|i| Volunteer::new(format!("v{i}"), "V").with_preference(1, "s1"))
                .collect(),
        );

        let result = solver().solve(&vs, &ss).unwrap();
        let mut loads = BTreeMap::new();
        for a in &result.assignments {
            *loads.entry(a.service_id.as_str()).or_insert(0u32) += 1;
        }
        let penalty: f64 = loads
            .values()
            .map(|&l| if l > 1 { 1000.0 * f64::from(l - 1) } else { 0.0 })
            .sum();
        let preference: f64 = result.assignments.iter().map(|a| a.cost).sum();
        assert_eq!(result.total_cost, preference + penalty);
        assert!(result.total_cost >= 3000.0);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let ss: Vec<ServiceDetails> = (1..=3)
            .map(|i| ServiceDetails::new(format!("s{i}"), "S", 2))
            .collect();
        let vs = volunteers(
            (1..=7)
                .map(|i| {
                    Volunteer::new(format!("v{i}"), "V")
                        .with_preference(1, format!("s{}", i % 3 + 1))
                })
                .collect(),
        );

        let a = solver().solve(&vs, &ss).unwrap();
        let b = solver().solve(&vs, &ss).unwrap();
        assert_eq!(a, b);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_evaluation_matches_sequential() {
        let ss: Vec<ServiceDetails> = (1..=4)
            .map(|i| ServiceDetails::new(format!("s{i}"), "S", 2))
            .collect();
        let vs = volunteers(
            (1..=9)
                .map(|i| {
                    Volunteer::new(format!("v{i}"), "V")
                        .with_preference(1, format!("s{}", i % 4 + 1))
                        .with_preference(2, format!("s{}", (i + 1) % 4 + 1))
                })
                .collect(),
        );

        let config = GaConfig::default().with_max_generations(50).with_seed(3);
        let sequential = AssignmentSolver::new(config.clone()).solve(&vs, &ss).unwrap();
        let parallel = AssignmentSolver::new(config.with_parallel(true))
            .solve(&vs, &ss)
            .unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_corrupted_snapshot_is_an_error() {
        let vs = volunteers(vec![Volunteer::new("v1", "V1").with_preference(9, "s1")]);
        let ss = vec![ServiceDetails::new("s1", "Service 1", 1)];
        assert!(matches!(
            solver().solve(&vs, &ss),
            Err(AssignError::InvalidPreferenceRank { rank: 9, .. })
        ));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let vs = volunteers(vec![Volunteer::new("v1", "V1")]);
        let ss = vec![ServiceDetails::new("s1", "Service 1", 1)];
        let solver = AssignmentSolver::new(GaConfig::default().with_max_generations(0));
        assert!(matches!(solver.solve(&vs, &ss), Err(AssignError::InvalidConfig(_))));
    }
}
