//! Volunteer-to-service assignment by genetic search.
//!
//! Volunteers rank up to five services; services admit a bounded number of
//! volunteers. A generational GA searches for an assignment with low total
//! cost, where cost grows with the rank a volunteer receives and jumps
//! sharply for unranked placements and over-capacity services.
//!
//! - [`ga`]: generic GA engine (tournament selection, single-point
//!   crossover, per-gene reset mutation, no elitism)
//! - [`assignment`]: the cost model and the assignment problem on top of
//!   the engine
//! - [`orchestrator`]: asynchronous trigger that snapshots inputs, runs a
//!   search off the async runtime, and publishes the outcome
//! - [`store`], [`preferences`]: in-memory data sources and validation of
//!   preference submissions
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use volunteer_assign::assignment::{AssignmentSolver, ServiceDetails, Volunteer};
//! use volunteer_assign::ga::GaConfig;
//!
//! let v = Volunteer::new("v1", "Ada").with_preference(1, "s1");
//! let volunteers = BTreeMap::from([(v.id.clone(), v)]);
//! let services = vec![ServiceDetails::new("s1", "Kitchen", 1)];
//!
//! let solver = AssignmentSolver::new(GaConfig::default().with_seed(7));
//! let result = solver.solve(&volunteers, &services).unwrap();
//! assert_eq!(result.total_cost, 0.0);
//! assert_eq!(result.assignments[0].service_id, "s1");
//! ```

pub mod assignment;
pub mod error;
pub mod ga;
pub mod orchestrator;
pub mod preferences;
pub mod random;
pub mod store;

pub use error::{AssignError, AssignResult};
