//! Volunteer-to-service assignment.
//!
//! Each volunteer ranks up to [`MAX_PREFERENCES`] services; each service
//! admits a limited number of volunteers. The search looks for an
//! assignment that honors high-ranked preferences while keeping every
//! service within capacity. Overfilling is allowed but priced heavily.
//!
//! - [`model`]: volunteers, services and published results
//! - [`fitness`]: the cost model
//! - [`AssignmentProblem`]: the cost model plugged into the GA engine
//! - [`AssignmentSolver`]: one search plus conversion to an [`AssignmentResult`]

pub mod fitness;
pub mod model;
mod problem;
mod solver;

pub use fitness::{
    CostBreakdown, CostModel, Placement, OVER_CAPACITY_PENALTY, UNPREFERRED_PENALTY_BASE,
};
pub use model::{Assignment, AssignmentResult, ServiceDetails, Volunteer, MAX_PREFERENCES};
pub use problem::{AssignmentProblem, Chromosome};
pub use solver::{AssignmentSolver, COMPLETE_MESSAGE, NO_INPUT_MESSAGE};
