//! Error types for the assignment search.

use thiserror::Error;

/// Failures raised while validating a snapshot, running the search, or
/// converting its result.
///
/// Empty inputs are not errors; they produce a zero-cost result instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssignError {
    #[error("invalid GA configuration: {0}")]
    InvalidConfig(String),

    #[error("duplicate service id in snapshot: {service_id}")]
    DuplicateService { service_id: String },

    #[error("service {service_id} has zero capacity")]
    ZeroCapacity { service_id: String },

    #[error("volunteer {volunteer_id} has invalid preference rank {rank}")]
    InvalidPreferenceRank { volunteer_id: String, rank: u8 },

    #[error("chromosome length {actual} does not match volunteer count {expected}")]
    ChromosomeLength { expected: usize, actual: usize },

    #[error("chromosome references unknown service index {index}")]
    UnknownServiceIndex { index: usize },
}

pub type AssignResult<T> = Result<T, AssignError>;
