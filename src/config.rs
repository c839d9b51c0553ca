use std::sync::Arc;

use log::{info, warn};
use mongodb::error::Error as DbError;
use rocket::figment::{self, Figment};
use serde::Deserialize;
use thiserror::Error;

use crate::store::{MemoryStore, MongoStore, SharedStore};

/// Errors that stop the server from starting.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Failed to load application config: {0}")]
    Config(#[from] figment::Error),
    #[error("`db_uri` must be set to use the MongoDB store")]
    MissingDbUri,
    #[error("Failed to contact database during launch: {0}")]
    Db(#[from] DbError),
    #[error(transparent)]
    Rocket(#[from] rocket::Error),
}

/// Which [`crate::store::ElectionStore`] implementation backs the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    Mongodb,
    /// Data lives only as long as the process.
    Memory,
}

/// Application configuration, derived from `Rocket.toml` and `ROCKET_*`
/// environment variables.
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    store: StoreKind,
    // secrets
    db_uri: Option<String>,
    #[serde(default = "default_db_name")]
    db_name: String,
}

fn default_db_name() -> String {
    "elections".to_string()
}

impl Config {
    /// Extract the application keys from Rocket's configuration sources.
    pub fn from_figment(figment: &Figment) -> Result<Self, LaunchError> {
        Ok(figment.extract::<Config>()?)
    }

    pub fn store(&self) -> StoreKind {
        self.store
    }

    /// Construct the configured store. Called once per application.
    pub async fn open_store(&self) -> Result<SharedStore, LaunchError> {
        match self.store {
            StoreKind::Memory => {
                warn!("Using the in-memory store; nothing will be persisted");
                Ok(Arc::new(MemoryStore::new()))
            }
            StoreKind::Mongodb => {
                let db_uri = self.db_uri.as_deref().ok_or(LaunchError::MissingDbUri)?;
                info!("Loaded database config, connecting...");
                let store = MongoStore::connect(db_uri, &self.db_name).await?;
                info!("...database connection online!");
                Ok(Arc::new(store))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rocket::{figment::providers::Serialized, serde::json::serde_json::json};

    use super::*;

    use crate::store::ElectionStore;

    #[test]
    fn defaults_to_mongodb() {
        let figment = Figment::from(Serialized::defaults(json!({
            "db_uri": "mongodb://localhost:27017",
        })));
        let config = Config::from_figment(&figment).unwrap();
        assert_eq!(config.store(), StoreKind::Mongodb);
        assert_eq!(config.db_name, "elections");
    }

    #[test]
    fn rejects_unknown_store() {
        let figment = Figment::from(Serialized::defaults(json!({
            "store": "postgres",
        })));
        assert!(matches!(
            Config::from_figment(&figment),
            Err(LaunchError::Config(_))
        ));
    }

    #[rocket::async_test]
    async fn memory_store_needs_no_database() {
        let figment = Figment::from(Serialized::defaults(json!({
            "store": "memory",
        })));
        let config = Config::from_figment(&figment).unwrap();
        let store = config.open_store().await.unwrap();
        assert!(store.list_elections().await.unwrap().is_empty());
    }

    #[rocket::async_test]
    async fn mongodb_store_needs_a_uri() {
        let figment = Figment::from(Serialized::defaults(json!({
            "store": "mongodb",
        })));
        let config = Config::from_figment(&figment).unwrap();
        assert!(matches!(
            config.open_store().await,
            Err(LaunchError::MissingDbUri)
        ));
    }
}
