use log::info;
use mongodb::{bson::doc, error::Error as DbError, options::FindOptions, Client, Database};
use rocket::futures::TryStreamExt;

use super::{ElectionStore, StoreError, StoreResult};
use crate::model::{
    candidate::{Candidate, CandidateId, NewCandidate},
    election::{Election, ElectionId, NewElection},
    mongodb::{
        ensure_counters_exist, ensure_indexes_exist, is_duplicate_key_error, CandidateDocument,
        Coll, Counter, ElectionDocument, CANDIDATE_ID_COUNTER_ID, ELECTION_ID_COUNTER_ID,
    },
};

/// An [`ElectionStore`] backed by a MongoDB database.
///
/// Uniqueness is enforced by the indexes created in [`MongoStore::connect`],
/// so a duplicate surfaces as a failed insert rather than a prior lookup.
#[derive(Clone)]
pub struct MongoStore {
    elections: Coll<ElectionDocument>,
    candidates: Coll<CandidateDocument>,
    counters: Coll<Counter>,
}

impl MongoStore {
    /// Connect to the given server and prepare the named database for use.
    pub async fn connect(db_uri: &str, db_name: &str) -> Result<Self, DbError> {
        let client = Client::with_uri_str(db_uri).await?;
        Self::for_database(&client.database(db_name)).await
    }

    /// Prepare an existing database handle: indexes and ID counters are
    /// created if missing.
    pub async fn for_database(db: &Database) -> Result<Self, DbError> {
        info!("Creating indexes...");
        ensure_indexes_exist(db).await?;
        let counters = Coll::from_db(db);
        ensure_counters_exist(&counters).await?;
        info!("...indexes and counters ready");

        Ok(Self {
            elections: Coll::from_db(db),
            candidates: Coll::from_db(db),
            counters,
        })
    }
}

/// Turn a failed insert into a constraint violation if it hit a unique index.
fn insert_error(err: DbError, what: impl FnOnce() -> String) -> StoreError {
    if is_duplicate_key_error(&err) {
        StoreError::ConstraintViolation(what())
    } else {
        StoreError::storage(err)
    }
}

fn in_id_order() -> FindOptions {
    FindOptions::builder().sort(doc! { "_id": 1 }).build()
}

#[rocket::async_trait]
impl ElectionStore for MongoStore {
    async fn add_election(&self, election: &NewElection) -> StoreResult<ElectionId> {
        let id = Counter::next(&self.counters, ELECTION_ID_COUNTER_ID).await?;
        let document = ElectionDocument::from(Election::new(id, election.clone()));
        self.elections
            .insert_one(&document, None)
            .await
            .map_err(|e| insert_error(e, || format!("Election named '{}'", election.name)))?;
        Ok(id)
    }

    async fn get_election(&self, id: ElectionId) -> StoreResult<Election> {
        self.elections
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(StoreError::storage)?
            .map(Election::from)
            .ok_or_else(|| StoreError::NotFound(format!("Election {id}")))
    }

    async fn list_elections(&self) -> StoreResult<Vec<Election>> {
        let documents: Vec<ElectionDocument> = self
            .elections
            .find(None, in_id_order())
            .await
            .map_err(StoreError::storage)?
            .try_collect()
            .await
            .map_err(StoreError::storage)?;
        Ok(documents.into_iter().map(Election::from).collect())
    }

    async fn add_candidate(
        &self,
        election_id: ElectionId,
        candidate: &NewCandidate,
    ) -> StoreResult<CandidateId> {
        let id = Counter::next(&self.counters, CANDIDATE_ID_COUNTER_ID).await?;
        let document = CandidateDocument::from(Candidate::new(id, election_id, candidate.clone()));
        self.candidates
            .insert_one(&document, None)
            .await
            .map_err(|e| {
                insert_error(e, || {
                    format!(
                        "Candidate named '{}' in election {election_id}",
                        candidate.name
                    )
                })
            })?;
        Ok(id)
    }

    async fn get_candidate(
        &self,
        election_id: ElectionId,
        id: CandidateId,
    ) -> StoreResult<Candidate> {
        let filter = doc! {
            "_id": id,
            "election_id": election_id,
        };
        self.candidates
            .find_one(filter, None)
            .await
            .map_err(StoreError::storage)?
            .map(Candidate::from)
            .ok_or_else(|| StoreError::NotFound(format!("Candidate {id} in election {election_id}")))
    }

    async fn list_candidates(&self, election_id: ElectionId) -> StoreResult<Vec<Candidate>> {
        let documents: Vec<CandidateDocument> = self
            .candidates
            .find(doc! { "election_id": election_id }, in_id_order())
            .await
            .map_err(StoreError::storage)?
            .try_collect()
            .await
            .map_err(StoreError::storage)?;
        Ok(documents.into_iter().map(Candidate::from).collect())
    }
}
