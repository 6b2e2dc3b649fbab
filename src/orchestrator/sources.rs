//! Read-only snapshot sources the orchestrator draws its input from.

use crate::assignment::{ServiceDetails, Volunteer};
use std::collections::BTreeMap;

/// Supplies the current volunteers with their preferences.
///
/// Implementations must be safe to read from any thread. Each call returns
/// an owned point-in-time copy that later writes cannot affect.
#[cfg_attr(test, mockall::automock)]
pub trait VolunteerSource: Send + Sync {
    /// All volunteers, keyed by volunteer id.
    fn volunteers(&self) -> BTreeMap<String, Volunteer>;
}

/// Supplies the current services with their capacities.
#[cfg_attr(test, mockall::automock)]
pub trait ServiceSource: Send + Sync {
    /// All services, ids unique.
    fn services(&self) -> Vec<ServiceDetails>;
}
