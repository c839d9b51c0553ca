use std::ops::Deref;

use log::debug;
use mongodb::{
    bson::doc, error::Error as DbError, options::IndexOptions, Collection, Database, IndexModel,
};

use super::{
    counter::Counter,
    documents::{CandidateDocument, ElectionDocument},
};

/// A type that can be directly inserted/read to/from the database.
pub trait MongoCollection {
    /// The name of the collection.
    const NAME: &'static str;
}

/// A database collection of the given type.
pub struct Coll<T>(Collection<T>);

impl<T> Coll<T>
where
    T: MongoCollection,
{
    /// Get a handle on this collection in the given database.
    pub fn from_db(db: &Database) -> Self {
        Self(db.collection(T::NAME))
    }
}

// `Derive(Clone)` would only derive if `T: Clone`, but we don't need that bound.
impl<T> Clone for Coll<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Deref for Coll<T> {
    type Target = Collection<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl MongoCollection for ElectionDocument {
    const NAME: &'static str = "elections";
}

impl MongoCollection for CandidateDocument {
    const NAME: &'static str = "candidates";
}

impl MongoCollection for Counter {
    const NAME: &'static str = "counters";
}

/// Ensure the unique indexes backing the naming rules exist.
///
/// This operation is idempotent.
pub async fn ensure_indexes_exist(db: &Database) -> Result<(), DbError> {
    debug!("Ensuring collection indexes exist");

    let unique = IndexOptions::builder().unique(true).build();

    // Election names are globally unique.
    let election_index = IndexModel::builder()
        .keys(doc! {"name": 1})
        .options(unique.clone())
        .build();
    Coll::<ElectionDocument>::from_db(db)
        .create_index(election_index, None)
        .await?;

    // Candidate names are unique within an election.
    let candidate_index = IndexModel::builder()
        .keys(doc! {"election_id": 1, "name": 1})
        .options(unique)
        .build();
    Coll::<CandidateDocument>::from_db(db)
        .create_index(candidate_index, None)
        .await?;

    Ok(())
}
