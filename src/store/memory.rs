use rocket::tokio::sync::Mutex;

use super::{ElectionStore, StoreError, StoreResult};
use crate::model::{
    candidate::{Candidate, CandidateId, NewCandidate},
    election::{Election, ElectionId, NewElection},
};

/// An [`ElectionStore`] held entirely in process memory.
///
/// A single lock covers every table, so the uniqueness check and the insert
/// that follows it cannot interleave with another writer.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    elections: Vec<Election>,
    candidates: Vec<Candidate>,
    last_election_id: ElectionId,
    last_candidate_id: CandidateId,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[rocket::async_trait]
impl ElectionStore for MemoryStore {
    async fn add_election(&self, election: &NewElection) -> StoreResult<ElectionId> {
        let mut tables = self.tables.lock().await;
        if tables.elections.iter().any(|e| e.name == election.name) {
            return Err(StoreError::ConstraintViolation(format!(
                "Election named '{}'",
                election.name
            )));
        }

        let id = tables
            .last_election_id
            .checked_add(1)
            .ok_or_else(|| StoreError::storage("election IDs exhausted"))?;
        tables.last_election_id = id;
        tables.elections.push(Election::new(id, election.clone()));
        Ok(id)
    }

    async fn get_election(&self, id: ElectionId) -> StoreResult<Election> {
        self.tables
            .lock()
            .await
            .elections
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Election {id}")))
    }

    async fn list_elections(&self) -> StoreResult<Vec<Election>> {
        Ok(self.tables.lock().await.elections.clone())
    }

    async fn add_candidate(
        &self,
        election_id: ElectionId,
        candidate: &NewCandidate,
    ) -> StoreResult<CandidateId> {
        let mut tables = self.tables.lock().await;
        let taken = tables
            .candidates
            .iter()
            .any(|c| c.election_id == election_id && c.name == candidate.name);
        if taken {
            return Err(StoreError::ConstraintViolation(format!(
                "Candidate named '{}' in election {election_id}",
                candidate.name
            )));
        }

        let id = tables
            .last_candidate_id
            .checked_add(1)
            .ok_or_else(|| StoreError::storage("candidate IDs exhausted"))?;
        tables.last_candidate_id = id;
        tables
            .candidates
            .push(Candidate::new(id, election_id, candidate.clone()));
        Ok(id)
    }

    async fn get_candidate(
        &self,
        election_id: ElectionId,
        id: CandidateId,
    ) -> StoreResult<Candidate> {
        self.tables
            .lock()
            .await
            .candidates
            .iter()
            .find(|c| c.id == id && c.election_id == election_id)
            .cloned()
            .ok_or_else(|| {
                StoreError::NotFound(format!("Candidate {id} in election {election_id}"))
            })
    }

    async fn list_candidates(&self, election_id: ElectionId) -> StoreResult<Vec<Candidate>> {
        Ok(self
            .tables
            .lock()
            .await
            .candidates
            .iter()
            .filter(|c| c.election_id == election_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rocket::tokio;

    use super::*;

    #[rocket::async_test]
    async fn election_ids_count_from_one() {
        let store = MemoryStore::new();
        let first = store.add_election(&NewElection::example()).await.unwrap();
        let second = store.add_election(&NewElection::example2()).await.unwrap();
        assert_eq!((first, second), (1, 2));

        let listed = store.list_elections().await.unwrap();
        let names: Vec<_> = listed.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                NewElection::example().name.as_str(),
                NewElection::example2().name.as_str()
            ]
        );
    }

    #[rocket::async_test]
    async fn duplicate_election_is_a_constraint_violation() {
        let store = MemoryStore::new();
        store.add_election(&NewElection::example()).await.unwrap();
        let err = store
            .add_election(&NewElection::example())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ConstraintViolation(_)));
        assert_eq!(store.list_elections().await.unwrap().len(), 1);

        // The failed insert must not have used up an ID.
        let id = store.add_election(&NewElection::example2()).await.unwrap();
        assert_eq!(id, 2);
    }

    #[rocket::async_test]
    async fn missing_records_are_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.get_election(1).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.get_candidate(1, 1).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(store.list_elections().await.unwrap().is_empty());
        assert!(store.list_candidates(1).await.unwrap().is_empty());
    }

    #[rocket::async_test]
    async fn candidate_names_are_unique_per_election() {
        let store = MemoryStore::new();
        let e1 = store.add_election(&NewElection::example()).await.unwrap();
        let e2 = store.add_election(&NewElection::example2()).await.unwrap();

        let c1 = store
            .add_candidate(e1, &NewCandidate::example1())
            .await
            .unwrap();
        let c2 = store
            .add_candidate(e2, &NewCandidate::example1())
            .await
            .unwrap();
        assert_ne!(c1, c2);

        let err = store
            .add_candidate(e1, &NewCandidate::example1())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ConstraintViolation(_)));

        // Lookups need both keys to match.
        assert_eq!(store.get_candidate(e1, c1).await.unwrap().election_id, e1);
        assert!(matches!(
            store.get_candidate(e2, c1).await,
            Err(StoreError::NotFound(_))
        ));
        assert_eq!(store.list_candidates(e1).await.unwrap().len(), 1);
    }

    #[rocket::async_test]
    async fn concurrent_duplicates_admit_exactly_one() {
        let store = Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.add_election(&NewElection::example()).await })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(StoreError::ConstraintViolation(_)) => {}
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(successes, 1);
        assert_eq!(store.list_elections().await.unwrap().len(), 1);
    }
}
