use log::info;
use rocket::{
    data::{Data, Limits},
    get, post,
    response::status::Created,
    routes,
    serde::json::Json,
    Route, State,
};

use super::common::read_named;
use crate::error::Result;
use crate::model::{
    candidate::{Candidate, NewCandidate},
    id::Id,
};
use crate::store::{ElectionStore, SharedStore};

pub fn routes() -> Vec<Route> {
    routes![add_candidate, list_candidates, get_candidate]
}

/// Register a candidate under an existing election.
///
/// The election is looked up before the body is decoded, so a missing
/// election is always a `404` whatever the payload.
#[post("/elections/<election_id>/candidates", data = "<body>")]
async fn add_candidate(
    election_id: Result<Id>,
    body: Data<'_>,
    limits: &Limits,
    store: &State<SharedStore>,
) -> Result<Created<Json<Candidate>>> {
    let election = store.get_election(*election_id?).await?;
    let candidate: NewCandidate = read_named(body, limits).await?;
    let id = store.add_candidate(election.id, &candidate).await?;
    info!("Added candidate {id} to election {}", election.id);

    let location = format!("/elections/{}/candidates/{id}", election.id);
    Ok(Created::new(location).body(Json(Candidate::new(id, election.id, candidate))))
}

#[get("/elections/<election_id>/candidates")]
async fn list_candidates(
    election_id: Result<Id>,
    store: &State<SharedStore>,
) -> Result<Json<Vec<Candidate>>> {
    let election = store.get_election(*election_id?).await?;
    Ok(Json(store.list_candidates(election.id).await?))
}

#[get("/elections/<election_id>/candidates/<id>")]
async fn get_candidate(
    election_id: Result<Id>,
    id: Result<Id>,
    store: &State<SharedStore>,
) -> Result<Json<Candidate>> {
    let candidate = store.get_candidate(*election_id?, *id?).await?;
    Ok(Json(candidate))
}
