//! Cost model for candidate assignments.
//!
//! A candidate assignment is a slice of service indices, one per volunteer,
//! in the fixed volunteer order of the run. Its cost is
//!
//! - `(r - 1)²` for each volunteer placed at their rank-`r` preference,
//! - `UNPREFERRED_PENALTY_BASE × D²` for each volunteer placed anywhere
//!   else, where `D` is the number of services,
//! - plus `OVER_CAPACITY_PENALTY` per volunteer beyond a service's capacity.
//!
//! [`CostModel::evaluate`] and [`CostModel::breakdown`] share the same
//! per-volunteer and per-service terms, so a published breakdown always
//! sums to the fitness the search ranked by.

use super::model::{ServiceDetails, Volunteer, MAX_PREFERENCES};
use crate::error::{AssignError, AssignResult};
use std::collections::HashMap;
use tracing::warn;

/// Multiplier of `D²` for a volunteer placed on a service they did not rank.
pub const UNPREFERRED_PENALTY_BASE: f64 = 10.0;

/// Cost per volunteer beyond a service's capacity.
pub const OVER_CAPACITY_PENALTY: f64 = 1000.0;

/// Cost and rank of one volunteer's placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub cost: f64,
    /// Rank achieved, 0 when unpreferred.
    pub rank: u8,
}

/// Per-term decomposition of a candidate's fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct CostBreakdown {
    pub placements: Vec<Placement>,
    /// Realized load per service index.
    pub loads: Vec<u32>,
    pub capacity_penalty: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.placements.iter().map(|p| p.cost).sum::<f64>() + self.capacity_penalty
    }
}

/// Immutable lookup tables for pricing candidate assignments.
///
/// Built once per run from a volunteer/service snapshot. Holds no mutable
/// state, so one model can price candidates from many threads at once.
#[derive(Debug, Clone)]
pub struct CostModel {
    /// Per volunteer: (service index, rank), ascending by rank.
    preferences: Vec<Vec<(usize, u8)>>,
    capacities: Vec<u32>,
    unpreferred_cost: f64,
}

impl CostModel {
    /// Builds the model for `volunteers` (in run order) over `services`.
    ///
    /// Rejects duplicate service ids, zero capacities, and stored ranks
    /// outside `1..=MAX_PREFERENCES`. A preference naming a service absent
    /// from `services` can never be honored and is skipped.
    pub fn new<'a, I>(volunteers: I, services: &[ServiceDetails]) -> AssignResult<Self>
    where
        I: IntoIterator<Item = &'a Volunteer>,
    {
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(services.len());
        for (i, service) in services.iter().enumerate() {
            if service.capacity == 0 {
                return Err(AssignError::ZeroCapacity {
                    service_id: service.id.clone(),
                });
            }
            if index.insert(service.id.as_str(), i).is_some() {
                return Err(AssignError::DuplicateService {
                    service_id: service.id.clone(),
                });
            }
        }

        let mut preferences = Vec::new();
        for volunteer in volunteers {
            let mut ranked: Vec<(usize, u8)> = Vec::with_capacity(volunteer.preferences.len());
            for (&rank, service_id) in &volunteer.preferences {
                if rank == 0 || usize::from(rank) > MAX_PREFERENCES {
                    return Err(AssignError::InvalidPreferenceRank {
                        volunteer_id: volunteer.id.clone(),
                        rank,
                    });
                }
                match index.get(service_id.as_str()) {
                    Some(&s) if !ranked.iter().any(|&(seen, _)| seen == s) => {
                        ranked.push((s, rank))
                    }
                    Some(_) => {}
                    None => warn!(
                        volunteer = %volunteer.id,
                        service = %service_id,
                        "preference names an unknown service; ignoring"
                    ),
                }
            }
            preferences.push(ranked);
        }

        let d = services.len() as f64;
        Ok(Self {
            preferences,
            capacities: services.iter().map(|s| s.capacity).collect(),
            unpreferred_cost: UNPREFERRED_PENALTY_BASE * d * d,
        })
    }

    pub fn volunteer_count(&self) -> usize {
        self.preferences.len()
    }

    pub fn service_count(&self) -> usize {
        self.capacities.len()
    }

    /// Cost of a placement at preference rank `rank` (1-based).
    pub fn preference_cost(rank: u8) -> f64 {
        let steps = f64::from(rank.saturating_sub(1));
        steps * steps
    }

    /// Cost of placing a volunteer on a service they did not rank.
    pub fn unpreferred_cost(&self) -> f64 {
        self.unpreferred_cost
    }

    /// Prices placing `volunteer` on `service`.
    pub fn placement(&self, volunteer: usize, service: usize) -> Placement {
        match self.preferences[volunteer].iter().find(|&&(s, _)| s == service) {
            Some(&(_, rank)) => Placement {
                cost: Self::preference_cost(rank),
                rank,
            },
            None => Placement {
                cost: self.unpreferred_cost,
                rank: 0,
            },
        }
    }

    /// `OVER_CAPACITY_PENALTY` per unit of overflow, summed over services.
    pub fn capacity_penalty(&self, loads: &[u32]) -> f64 {
        loads
            .iter()
            .zip(&self.capacities)
            .filter(|(load, capacity)| load > capacity)
            .map(|(load, capacity)| OVER_CAPACITY_PENALTY * f64::from(load - capacity))
            .sum()
    }

    /// Fitness of a candidate. Lower is better; never negative.
    ///
    /// `genes` must hold one valid service index per volunteer, which is
    /// what the search produces. Use [`breakdown`](Self::breakdown) for
    /// untrusted input.
    pub fn evaluate(&self, genes: &[usize]) -> f64 {
        let mut loads = vec![0u32; self.capacities.len()];
        let mut preference_total = 0.0;
        for (volunteer, &service) in genes.iter().enumerate() {
            loads[service] += 1;
            preference_total += self.placement(volunteer, service).cost;
        }
        preference_total + self.capacity_penalty(&loads)
    }

    /// Decomposes a candidate's fitness into per-volunteer placements and
    /// the capacity penalty, validating the candidate first.
    pub fn breakdown(&self, genes: &[usize]) -> AssignResult<CostBreakdown> {
        if genes.len() != self.volunteer_count() {
            return Err(AssignError::ChromosomeLength {
                expected: self.volunteer_count(),
                actual: genes.len(),
            });
        }
        if let Some(&index) = genes.iter().find(|&&s| s >= self.service_count()) {
            return Err(AssignError::UnknownServiceIndex { index });
        }

        let mut loads = vec![0u32; self.capacities.len()];
        let mut placements = Vec::with_capacity(genes.len());
        for (volunteer, &service) in genes.iter().enumerate() {
            loads[service] += 1;
            placements.push(self.placement(volunteer, service));
        }
        let capacity_penalty = self.capacity_penalty(&loads);

        Ok(CostBreakdown {
            placements,
            loads,
            capacity_penalty,
        })
    }

    /// Services whose load exceeds capacity, as `(index, load, capacity)`.
    pub fn overloaded(&self, loads: &[u32]) -> Vec<(usize, u32, u32)> {
        loads
            .iter()
            .zip(&self.capacities)
            .enumerate()
            .filter(|(_, (load, capacity))| load > capacity)
            .map(|(i, (&load, &capacity))| (i, load, capacity))
            .collect()
    }
}
