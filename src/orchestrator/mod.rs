//! Optimization orchestration.
//!
//! A trigger snapshots the current volunteers and services, runs the
//! search on a blocking worker, and publishes the outcome on the
//! assignments channel. Empty inputs, search errors and panics are all
//! published as ordinary results whose message explains what happened.
//!
//! - [`VolunteerSource`], [`ServiceSource`]: where snapshots come from
//! - [`ResultPublisher`], [`AssignmentBroadcaster`]: where results go
//! - [`AssignmentOrchestrator`]: the trigger itself

mod publisher;
mod service;
mod sources;

pub use publisher::{AssignmentBroadcaster, ResultPublisher, ASSIGNMENTS_TOPIC};
pub use service::{AssignmentOrchestrator, Optimizer, NO_SERVICES_MESSAGE, NO_VOLUNTEERS_MESSAGE};
pub use sources::{ServiceSource, VolunteerSource};
