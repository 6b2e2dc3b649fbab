//! Validation of preference submissions.
//!
//! Submissions are checked before they reach a store, so the search can
//! assume every stored rank names an existing service.

use crate::assignment::MAX_PREFERENCES;
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// A volunteer's ranked choice of services, most preferred first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreferenceSubmission {
    pub ranked_service_ids: Vec<String>,
}

impl PreferenceSubmission {
    pub fn new<I, S>(ranked_service_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ranked_service_ids: ranked_service_ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Rank → service id, ranks starting at 1 in list order.
    pub fn ranks(&self) -> BTreeMap<u8, String> {
        (1u8..)
            .zip(self.ranked_service_ids.iter().cloned())
            .collect()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreferenceError {
    #[error("Volunteer ID cannot be empty.")]
    EmptyVolunteerId,

    #[error("Preferences cannot be empty for volunteer {volunteer_id}")]
    NoPreferences { volunteer_id: String },

    #[error(
        "Volunteer {volunteer_id} cannot prefer more than {} services (got {count})",
        MAX_PREFERENCES
    )]
    TooManyPreferences { volunteer_id: String, count: usize },

    #[error("Service ID {service_id} (preferred by {volunteer_id}) does not exist.")]
    UnknownService {
        volunteer_id: String,
        service_id: String,
    },

    #[error("Service ID {service_id} is ranked more than once by {volunteer_id}")]
    DuplicateService {
        volunteer_id: String,
        service_id: String,
    },
}

/// Checks a submission against the known services.
///
/// Shape checks (id, count) run before any service lookup.
pub fn validate_submission<F>(
    volunteer_id: &str,
    submission: &PreferenceSubmission,
    service_exists: F,
) -> Result<(), PreferenceError>
where
    F: Fn(&str) -> bool,
{
    if volunteer_id.trim().is_empty() {
        return Err(PreferenceError::EmptyVolunteerId);
    }
    let ranked = &submission.ranked_service_ids;
    if ranked.is_empty() {
        return Err(PreferenceError::NoPreferences {
            volunteer_id: volunteer_id.to_string(),
        });
    }
    if ranked.len() > MAX_PREFERENCES {
        return Err(PreferenceError::TooManyPreferences {
            volunteer_id: volunteer_id.to_string(),
            count: ranked.len(),
        });
    }

    let mut seen = HashSet::with_capacity(ranked.len());
    for service_id in ranked {
        if !service_exists(service_id) {
            return Err(PreferenceError::UnknownService {
                volunteer_id: volunteer_id.to_string(),
                service_id: service_id.clone(),
            });
        }
        if !seen.insert(service_id.as_str()) {
            return Err(PreferenceError::DuplicateService {
                volunteer_id: volunteer_id.to_string(),
                service_id: service_id.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn known(id: &str) -> bool {
        matches!(id, "service1" | "service2" | "service3" | "service4" | "service5" | "service6")
    }

    #[test]
    fn test_ranks_follow_list_order() {
        let s = PreferenceSubmission::new(["service2", "service1"]);
        let ranks = s.ranks();
        assert_eq!(ranks.get(&1).map(String::as_str), Some("service2"));
        assert_eq!(ranks.get(&2).map(String::as_str), Some("service1"));
        assert_eq!(ranks.len(), 2);
    }

    #[test]
    fn test_valid_submission() {
        let s = PreferenceSubmission::new(["service1", "service3"]);
        assert_eq!(validate_submission("volunteer1", &s, known), Ok(()));
    }

    #[test]
    fn test_empty_volunteer_id_rejected_before_lookup() {
        let lookups = Cell::new(0);
        let s = PreferenceSubmission::new(["service1"]);
        let result = validate_submission("  ", &s, |id| {
            lookups.set(lookups.get() + 1);
            known(id)
        });
        assert_eq!(result, Err(PreferenceError::EmptyVolunteerId));
        assert_eq!(lookups.get(), 0);
    }

    #[test]
    fn test_empty_preferences_rejected() {
        let s = PreferenceSubmission::default();
        assert_eq!(
            validate_submission("volunteer1", &s, known),
            Err(PreferenceError::NoPreferences {
                volunteer_id: "volunteer1".into()
            })
        );
    }

    #[test]
    fn test_more_than_five_rejected_before_lookup() {
        let lookups = Cell::new(0);
        let s = PreferenceSubmission::new([
            "service1", "service2", "service3", "service4", "service5", "service6",
        ]);
        let result = validate_submission("volunteer1", &s, |id| {
            lookups.set(lookups.get() + 1);
            known(id)
        });
        assert!(matches!(
            result,
            Err(PreferenceError::TooManyPreferences { count: 6, .. })
        ));
        assert_eq!(lookups.get(), 0);
        assert_eq!(
            result.unwrap_err().to_string(),
            "Volunteer volunteer1 cannot prefer more than 5 services (got 6)"
        );
    }

    #[test]
    fn test_unknown_service_rejected() {
        let s = PreferenceSubmission::new(["service1", "service99"]);
        let err = validate_submission("volunteer1", &s, known).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Service ID service99 (preferred by volunteer1) does not exist."
        );
    }

    #[test]
    fn test_duplicate_service_rejected() {
        let s = PreferenceSubmission::new(["service1", "service1"]);
        assert!(matches!(
            validate_submission("volunteer1", &s, known),
            Err(PreferenceError::DuplicateService { .. })
        ));
    }
}
