//! In-memory volunteer and service stores.
//!
//! Both stores are safe to share across threads and hand out owned
//! snapshots through the orchestrator's source traits.

use crate::assignment::{ServiceDetails, Volunteer, MAX_PREFERENCES};
use crate::orchestrator::{ServiceSource, VolunteerSource};
use crate::preferences::{validate_submission, PreferenceError, PreferenceSubmission};
use rand::Rng;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};
use tracing::info;

/// Services keyed by id.
#[derive(Debug, Default)]
pub struct InMemoryServiceStore {
    services: RwLock<BTreeMap<String, ServiceDetails>>,
}

impl InMemoryServiceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_services(services: impl IntoIterator<Item = ServiceDetails>) -> Self {
        let store = Self::new();
        for service in services {
            store.insert(service);
        }
        store
    }

    /// Inserts or replaces a service.
    pub fn insert(&self, service: ServiceDetails) {
        self.services
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(service.id.clone(), service);
    }

    pub fn find(&self, id: &str) -> Option<ServiceDetails> {
        self.services
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.services
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.services.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ServiceSource for InMemoryServiceStore {
    fn services(&self) -> Vec<ServiceDetails> {
        self.services
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }
}

/// Volunteers and their preferences keyed by volunteer id.
#[derive(Debug, Default)]
pub struct InMemoryVolunteerStore {
    volunteers: RwLock<BTreeMap<String, Volunteer>>,
}

impl InMemoryVolunteerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_volunteers(volunteers: impl IntoIterator<Item = Volunteer>) -> Self {
        let store = Self::new();
        for volunteer in volunteers {
            store.insert(volunteer);
        }
        store
    }

    /// Inserts or replaces a volunteer.
    pub fn insert(&self, volunteer: Volunteer) {
        self.volunteers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(volunteer.id.clone(), volunteer);
    }

    pub fn find(&self, id: &str) -> Option<Volunteer> {
        self.volunteers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// The stored volunteer, or a placeholder with no preferences when
    /// `id` has not submitted any yet.
    pub fn preferences_for(&self, id: &str) -> Volunteer {
        self.find(id)
            .unwrap_or_else(|| Volunteer::new(id, format!("New Volunteer {id}")))
    }

    pub fn len(&self) -> usize {
        self.volunteers.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validates `submission` against `services` and replaces the
    /// volunteer's ranking with it.
    ///
    /// An unknown volunteer is created with its id as display name.
    pub fn submit_preferences(
        &self,
        volunteer_id: &str,
        submission: &PreferenceSubmission,
        services: &InMemoryServiceStore,
    ) -> Result<(), PreferenceError> {
        validate_submission(volunteer_id, submission, |id| services.contains(id))?;

        let mut volunteers = self.volunteers.write().unwrap_or_else(PoisonError::into_inner);
        let volunteer = volunteers
            .entry(volunteer_id.to_string())
            .or_insert_with(|| Volunteer::new(volunteer_id, volunteer_id));
        volunteer.preferences = submission.ranks();

        info!(
            volunteer = volunteer_id,
            preferences = submission.ranked_service_ids.len(),
            "preferences submitted"
        );
        Ok(())
    }
}

impl VolunteerSource for InMemoryVolunteerStore {
    fn volunteers(&self) -> BTreeMap<String, Volunteer> {
        self.volunteers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Demo services `service1..=serviceN` with capacities drawn from 2..=6.
pub fn seed_services<R: Rng>(count: usize, rng: &mut R) -> Vec<ServiceDetails> {
    (1..=count)
        .map(|i| {
            ServiceDetails::new(
                format!("service{i}"),
                format!("Service {i}"),
                rng.random_range(2..=6),
            )
        })
        .collect()
}

/// Demo volunteers `volunteer1..=volunteerM`, each ranking between 1 and
/// [`MAX_PREFERENCES`] distinct services drawn from `service_ids`.
pub fn seed_volunteers<R: Rng>(
    count: usize,
    service_ids: &[String],
    rng: &mut R,
) -> Vec<Volunteer> {
    (1..=count)
        .map(|i| {
            let wanted = rng.random_range(1..=MAX_PREFERENCES);
            let mut available = service_ids.to_vec();
            let mut volunteer = Volunteer::new(format!("volunteer{i}"), format!("Volunteer {i}"));
            for rank in 1..=wanted {
                if available.is_empty() {
                    break;
                }
                let pick = available.remove(rng.random_range(0..available.len()));
                volunteer.preferences.insert(rank as u8, pick);
            }
            volunteer
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use std::collections::HashSet;

    fn services() -> InMemoryServiceStore {
        InMemoryServiceStore::from_services([
            ServiceDetails::new("s1", "Service 1", 2),
            ServiceDetails::new("s2", "Service 2", 3),
        ])
    }

    #[test]
    fn test_service_store_snapshot() {
        let store = services();
        assert_eq!(store.len(), 2);
        assert!(store.contains("s1"));
        assert_eq!(store.find("s2").map(|s| s.capacity), Some(3));
        let ids: Vec<String> = store.services().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["s1", "s2"]);
    }

    #[test]
    fn test_submit_creates_unknown_volunteer() {
        let volunteers = InMemoryVolunteerStore::new();
        volunteers
            .submit_preferences("v9", &PreferenceSubmission::new(["s2", "s1"]), &services())
            .unwrap();

        let v = volunteers.find("v9").unwrap();
        assert_eq!(v.name, "v9");
        assert_eq!(v.rank_of("s2"), Some(1));
        assert_eq!(v.rank_of("s1"), Some(2));
    }

    #[test]
    fn test_submit_replaces_previous_ranking() {
        let volunteers = InMemoryVolunteerStore::from_volunteers([Volunteer::new("v1", "Ada")
            .with_preference(1, "s1")
            .with_preference(2, "s2")]);
        volunteers
            .submit_preferences("v1", &PreferenceSubmission::new(["s2"]), &services())
            .unwrap();

        let v = volunteers.find("v1").unwrap();
        assert_eq!(v.name, "Ada");
        assert_eq!(v.preferences.len(), 1);
        assert_eq!(v.rank_of("s2"), Some(1));
    }

    #[test]
    fn test_preferences_for_unknown_volunteer_is_placeholder() {
        let volunteers = InMemoryVolunteerStore::from_volunteers([
            Volunteer::new("v1", "Ada").with_preference(1, "s1"),
        ]);

        let known = volunteers.preferences_for("v1");
        assert_eq!(known.name, "Ada");
        assert_eq!(known.rank_of("s1"), Some(1));

        let placeholder = volunteers.preferences_for("v7");
        assert_eq!(placeholder.id, "v7");
        assert_eq!(placeholder.name, "New Volunteer v7");
        assert!(placeholder.preferences.is_empty());
        assert_eq!(volunteers.len(), 1);
    }

    #[test]
    fn test_rejected_submission_leaves_store_untouched() {
        let volunteers = InMemoryVolunteerStore::new();
        let err = volunteers
            .submit_preferences("v1", &PreferenceSubmission::new(["nope"]), &services())
            .unwrap_err();
        assert!(matches!(err, PreferenceError::UnknownService { .. }));
        assert!(volunteers.is_empty());
    }

    #[test]
    fn test_snapshot_is_detached_from_later_writes() {
        let volunteers = InMemoryVolunteerStore::from_volunteers([Volunteer::new("v1", "V1")]);
        let snapshot = volunteers.volunteers();
        volunteers.insert(Volunteer::new("v2", "V2"));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(volunteers.len(), 2);
    }

    #[test]
    fn test_seeded_demo_data() {
        let mut rng = create_rng(42);
        let services = seed_services(10, &mut rng);
        assert_eq!(services.len(), 10);
        assert!(services.iter().all(|s| (2..=6).contains(&s.capacity)));

        let ids: Vec<String> = services.iter().map(|s| s.id.clone()).collect();
        let volunteers = seed_volunteers(30, &ids, &mut rng);
        assert_eq!(volunteers.len(), 30);
        for v in &volunteers {
            assert!((1..=MAX_PREFERENCES).contains(&v.preferences.len()));
            let distinct: HashSet<&String> = v.preferences.values().collect();
            assert_eq!(distinct.len(), v.preferences.len());
            assert!(v.preferences.keys().copied().eq(1..=v.preferences.len() as u8));
            assert!(v.preferences.values().all(|id| ids.contains(id)));
        }
    }

    #[test]
    fn test_seed_volunteers_with_few_services() {
        let mut rng = create_rng(1);
        let ids = vec!["only".to_string()];
        for v in seed_volunteers(20, &ids, &mut rng) {
            assert_eq!(v.preferences.len(), 1);
        }
    }
}
