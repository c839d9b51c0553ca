use super::{ElectionStore, StoreError, StoreResult};
use crate::model::{
    candidate::{Candidate, CandidateId, NewCandidate},
    election::{Election, ElectionId, NewElection},
};

/// An [`ElectionStore`] whose backend is always unreachable.
#[derive(Debug, Default)]
pub struct FailingStore;

impl FailingStore {
    /// The detail carried by every error. Must never reach a client.
    pub const DETAIL: &'static str = "connection refused: 10.0.0.7:27017";

    fn fail<T>() -> StoreResult<T> {
        Err(StoreError::storage(Self::DETAIL))
    }
}

#[rocket::async_trait]
impl ElectionStore for FailingStore {
    async fn add_election(&self, _election: &NewElection) -> StoreResult<ElectionId> {
        Self::fail()
    }

    async fn get_election(&self, _id: ElectionId) -> StoreResult<Election> {
        Self::fail()
    }

    async fn list_elections(&self) -> StoreResult<Vec<Election>> {
        Self::fail()
    }

    async fn add_candidate(
        &self,
        _election_id: ElectionId,
        _candidate: &NewCandidate,
    ) -> StoreResult<CandidateId> {
        Self::fail()
    }

    async fn get_candidate(
        &self,
        _election_id: ElectionId,
        _id: CandidateId,
    ) -> StoreResult<Candidate> {
        Self::fail()
    }

    async fn list_candidates(&self, _election_id: ElectionId) -> StoreResult<Vec<Candidate>> {
        Self::fail()
    }
}
