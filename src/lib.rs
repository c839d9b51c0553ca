#[cfg(test)]
#[macro_use]
extern crate backend_test;

use log::info;
use rocket::{Build, Rocket};

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod store;

pub use config::{Config, LaunchError};

use logging::LoggerFairing;
use store::SharedStore;

/// Load the configuration, open the configured store, and assemble the server.
pub async fn build() -> Result<Rocket<Build>, LaunchError> {
    let config = Config::from_figment(&rocket::Config::figment())?;
    info!("Configuring {:?} store...", config.store());
    let store = config.open_store().await?;
    Ok(rocket_for_store(store))
}

/// Assemble a server around the given store.
///
/// Every request handled by the returned instance shares `store`, and nothing
/// else: separate calls with separate stores produce fully independent servers.
pub fn rocket_for_store(store: SharedStore) -> Rocket<Build> {
    let rocket = rocket::build()
        .mount("/", api::routes())
        .manage(store)
        .attach(LoggerFairing);
    info!("Routes mounted");
    rocket
}

/// Route this crate's log output to the test harness.
#[cfg(test)]
fn init_test_logging() {
    log4rs_test_utils::test_logging::init_logging_once_for(["election_backend"], None, None);
}

#[cfg(test)]
fn test_memory_store() -> SharedStore {
    std::sync::Arc::new(store::MemoryStore::new())
}

/// A client for an application whose store fails every call.
#[cfg(test)]
async fn failing_client() -> rocket::local::asynchronous::Client {
    init_test_logging();
    let store: SharedStore = std::sync::Arc::new(store::FailingStore);
    rocket::local::asynchronous::Client::tracked(rocket_for_store(store))
        .await
        .unwrap()
}

/// A store over a freshly named database, so concurrent tests never collide.
/// The caller is responsible for dropping the database.
#[cfg(test)]
async fn test_mongo_store() -> (SharedStore, mongodb::Database) {
    let db_uri = std::env::var("MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let client = mongodb::Client::with_uri_str(db_uri).await.unwrap();
    let random: u32 = rand::random();
    let db = client.database(&format!("test{random}"));
    info!("Using database {}", db.name());
    let store = store::MongoStore::for_database(&db).await.unwrap();
    (std::sync::Arc::new(store), db)
}
