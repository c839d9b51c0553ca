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
    election::{Election, NewElection},
    id::Id,
};
use crate::store::{ElectionStore, SharedStore};

pub fn routes() -> Vec<Route> {
    routes![create_election, list_elections, get_election]
}

#[post("/elections", data = "<body>")]
async fn create_election(
    body: Data<'_>,
    limits: &Limits,
    store: &State<SharedStore>,
) -> Result<Created<Json<Election>>> {
    let election: NewElection = read_named(body, limits).await?;
    let id = store.add_election(&election).await?;
    info!("Created election {id}");

    Ok(Created::new(format!("/elections/{id}")).body(Json(Election::new(id, election))))
}

#[get("/elections")]
async fn list_elections(store: &State<SharedStore>) -> Result<Json<Vec<Election>>> {
    Ok(Json(store.list_elections().await?))
}

#[get("/elections/<id>")]
async fn get_election(id: Result<Id>, store: &State<SharedStore>) -> Result<Json<Election>> {
    let election = store.get_election(*id?).await?;
    Ok(Json(election))
}
