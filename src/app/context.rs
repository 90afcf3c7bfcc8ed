use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{NewsdeskError, Result};
use crate::config::Config;
use crate::feed::{FeedMachine, FeedSession};
use crate::fetcher::{HttpGeoLocator, HttpNewsClient};
use crate::location::LocationResolver;
use crate::session::SessionStore;
use crate::store::{KeyValueStore, MemoryStore, SqliteStore};

pub struct AppContext {
    pub config: Config,
    pub client: Arc<HttpNewsClient>,
    pub geo: Arc<HttpGeoLocator>,
    pub store: Arc<dyn KeyValueStore>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let db_path = match config.storage.db_path.clone() {
            Some(p) => p,
            None => Self::default_db_path()?,
        };

        let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::new(&db_path)?);
        Self::with_store(config, store)
    }

    pub fn in_memory(config: Config) -> Result<Self> {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    pub fn with_store(config: Config, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let client = Arc::new(HttpNewsClient::new(&config.api)?);
        let geo = Arc::new(HttpGeoLocator::new(&config.geo)?);

        Ok(Self {
            config,
            client,
            geo,
            store,
        })
    }

    pub fn location_resolver(&self) -> LocationResolver {
        LocationResolver::new(self.store.clone(), self.geo.clone())
    }

    pub fn sessions(&self) -> SessionStore {
        SessionStore::new(self.store.clone())
    }

    pub fn feed_machine(&self) -> FeedMachine {
        FeedMachine::from_config(&self.config.feed)
    }

    pub fn feed_session(&self, machine: FeedMachine) -> FeedSession {
        FeedSession::new(machine, self.client.clone())
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| NewsdeskError::Config("Could not find data directory".into()))?;
        let newsdesk_dir = data_dir.join("newsdesk");
        std::fs::create_dir_all(&newsdesk_dir)?;
        Ok(newsdesk_dir.join("newsdesk.db"))
    }
}
