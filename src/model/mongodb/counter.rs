use log::debug;
use mongodb::{
    bson::doc,
    error::Error as DbError,
    options::{FindOneAndUpdateOptions, ReturnDocument, UpdateOptions},
};
use serde::{Deserialize, Serialize};

use super::Coll;
use crate::store::{StoreError, StoreResult};

pub const ELECTION_ID_COUNTER_ID: &str = "election_id";
pub const CANDIDATE_ID_COUNTER_ID: &str = "candidate_id";

/// A counter object used to implement auto-increment fields.
///
/// `next` holds the last value handed out, so a fresh counter yields 1 first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Counter {
    #[serde(rename = "_id")]
    pub id: String,
    pub next: u32,
}

impl Counter {
    /// Atomically increment the counter with the given ID and return the new value.
    pub async fn next(counters: &Coll<Counter>, id: &str) -> StoreResult<u32> {
        let update = doc! {
            "$inc": { "next": 1 }
        };
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        let counter = counters
            .find_one_and_update(doc! { "_id": id }, update, options)
            .await
            .map_err(StoreError::storage)?
            .ok_or_else(|| StoreError::storage(format!("Failed to find counter with ID {id}")))?;
        Ok(counter.next)
    }
}

/// Create any ID counter that doesn't exist yet, leaving existing ones alone.
pub async fn ensure_counters_exist(counters: &Coll<Counter>) -> Result<(), DbError> {
    debug!("Ensuring ID counters exist");
    let options = UpdateOptions::builder().upsert(true).build();
    for id in [ELECTION_ID_COUNTER_ID, CANDIDATE_ID_COUNTER_ID] {
        let update = doc! {
            "$setOnInsert": { "next": 0 }
        };
        counters
            .update_one(doc! { "_id": id }, update, options.clone())
            .await?;
    }
    Ok(())
}
