//! The boundary between request handlers and whatever holds the data.

use std::error::Error as StdError;
use std::sync::Arc;

use thiserror::Error;

use crate::model::{
    candidate::{Candidate, CandidateId, NewCandidate},
    election::{Election, ElectionId, NewElection},
};

#[cfg(test)]
mod failing;
mod memory;
mod mongo;

#[cfg(test)]
pub use self::failing::FailingStore;
pub use self::memory::MemoryStore;
pub use self::mongo::MongoStore;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// The store shared by every request of one application.
pub type SharedStore = Arc<dyn ElectionStore>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} does not exist")]
    NotFound(String),
    /// An insert would break a uniqueness rule. Detected atomically with the insert.
    #[error("{0} already exists")]
    ConstraintViolation(String),
    #[error("storage failure: {0}")]
    Storage(#[source] Box<dyn StdError + Send + Sync>),
}

impl StoreError {
    pub fn storage(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::Storage(err.into())
    }
}

/// Persistence operations for elections and their candidates.
///
/// Implementations must tolerate concurrent calls and must enforce name
/// uniqueness in the same step as the insert.
#[rocket::async_trait]
pub trait ElectionStore: Send + Sync {
    /// Insert a new election, returning its assigned ID.
    /// Fails with [`StoreError::ConstraintViolation`] if the name is in use.
    async fn add_election(&self, election: &NewElection) -> StoreResult<ElectionId>;

    async fn get_election(&self, id: ElectionId) -> StoreResult<Election>;

    /// All elections in creation order.
    async fn list_elections(&self) -> StoreResult<Vec<Election>>;

    /// Insert a candidate under the given election, returning its assigned ID.
    /// Fails with [`StoreError::ConstraintViolation`] if that election already
    /// has a candidate with the same name.
    ///
    /// The election is not checked for existence here.
    async fn add_candidate(
        &self,
        election_id: ElectionId,
        candidate: &NewCandidate,
    ) -> StoreResult<CandidateId>;

    async fn get_candidate(
        &self,
        election_id: ElectionId,
        id: CandidateId,
    ) -> StoreResult<Candidate>;

    /// The candidates of one election in creation order.
    async fn list_candidates(&self, election_id: ElectionId) -> StoreResult<Vec<Candidate>>;
}
