//! Domain records for volunteer assignment.

use std::collections::BTreeMap;

/// Highest rank a volunteer may state. Ranks run `1..=MAX_PREFERENCES`.
pub const MAX_PREFERENCES: usize = 5;

/// A volunteer and their ranked service preferences.
///
/// `preferences` maps a rank (1 = most preferred) to a service id. Rank 0
/// means "not preferred" and is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Volunteer {
    pub id: String,
    pub name: String,
    pub preferences: BTreeMap<u8, String>,
}

impl Volunteer {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            preferences: BTreeMap::new(),
        }
    }

    /// Adds `service_id` at `rank`, replacing whatever held that rank.
    pub fn with_preference(mut self, rank: u8, service_id: impl Into<String>) -> Self {
        self.preferences.insert(rank, service_id.into());
        self
    }

    /// Rank at which `service_id` was preferred, lowest rank first.
    pub fn rank_of(&self, service_id: &str) -> Option<u8> {
        self.preferences
            .iter()
            .find(|(_, id)| id.as_str() == service_id)
            .map(|(&rank, _)| rank)
    }
}

/// A service volunteers can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServiceDetails {
    pub id: String,
    pub name: String,
    /// Maximum volunteers admissible before the over-capacity penalty applies.
    pub capacity: u32,
}

impl ServiceDetails {
    pub fn new(id: impl Into<String>, name: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            capacity,
        }
    }
}

/// One volunteer's placement in a published result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub volunteer_id: String,
    pub service_id: String,
    /// Preference cost of this placement, excluding capacity penalties.
    pub cost: f64,
    /// Rank achieved, or 0 when the service was not preferred.
    pub preference_rank: u8,
}

/// The outcome of one optimization run.
///
/// Successes, empty inputs and failures all take this shape; subscribers
/// tell them apart by `message`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignmentResult {
    pub assignments: Vec<Assignment>,
    /// Search fitness of the published assignment, capacity penalties included.
    pub total_cost: f64,
    pub message: String,
}

impl AssignmentResult {
    /// A terminal result with no assignments and zero cost.
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            assignments: Vec::new(),
            total_cost: 0.0,
            message: message.into(),
        }
    }
}
