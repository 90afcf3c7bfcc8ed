//! Cache-then-fetch resolution of the user's location.

use std::sync::Arc;

use crate::app::Result;
use crate::domain::UserLocation;
use crate::fetcher::GeoLocator;
use crate::store::KeyValueStore;

pub const LOCATION_KEY: &str = "user_location";

pub struct LocationResolver {
    store: Arc<dyn KeyValueStore>,
    locator: Arc<dyn GeoLocator>,
}

impl LocationResolver {
    pub fn new(store: Arc<dyn KeyValueStore>, locator: Arc<dyn GeoLocator>) -> Self {
        Self { store, locator }
    }

    /// Returns the persisted location, or performs one lookup and persists it.
    ///
    /// A failed lookup is propagated and nothing is written; callers treat the
    /// location as absent.
    pub async fn resolve(&self) -> Result<UserLocation> {
        if let Some(location) = self.cached()? {
            tracing::debug!("Using cached location: {}", location.display_name());
            return Ok(location);
        }

        let location = self.locator.locate().await?;
        self.store
            .set(LOCATION_KEY, &serde_json::to_string(&location)?)?;
        tracing::info!("Resolved location: {}", location.display_name());
        Ok(location)
    }

    /// Reads the persisted location without touching the network.
    ///
    /// An unreadable entry is dropped so the next `resolve` looks it up again.
    pub fn cached(&self) -> Result<Option<UserLocation>> {
        let Some(raw) = self.store.get(LOCATION_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(location) => Ok(Some(location)),
            Err(e) => {
                tracing::warn!("Discarding unreadable cached location: {}", e);
                self.store.remove(LOCATION_KEY)?;
                Ok(None)
            }
        }
    }

    pub fn forget(&self) -> Result<()> {
        self.store.remove(LOCATION_KEY)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::app::NewsdeskError;
    use crate::store::MemoryStore;

    struct CountingLocator {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingLocator {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GeoLocator for CountingLocator {
        async fn locate(&self) -> Result<UserLocation> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(NewsdeskError::Other("provider unreachable".into()));
            }
            Ok(minna())
        }
    }

    fn minna() -> UserLocation {
        UserLocation {
            city: "Minna".into(),
            region: "Niger".into(),
            country_name: "Nigeria".into(),
            country_code: "NG".into(),
        }
    }

    #[tokio::test]
    async fn test_miss_looks_up_once_and_persists() {
        let store = Arc::new(MemoryStore::new());
        let locator = CountingLocator::new(false);
        let resolver = LocationResolver::new(store.clone(), locator.clone());

        assert_eq!(resolver.resolve().await.unwrap(), minna());
        assert_eq!(resolver.resolve().await.unwrap(), minna());

        assert_eq!(locator.calls(), 1);
        assert!(store.get(LOCATION_KEY).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_hit_skips_network() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(LOCATION_KEY, &serde_json::to_string(&minna()).unwrap())
            .unwrap();
        let locator = CountingLocator::new(true);
        let resolver = LocationResolver::new(store, locator.clone());

        assert_eq!(resolver.resolve().await.unwrap(), minna());
        assert_eq!(locator.calls(), 0);
    }

    #[tokio::test]
    async fn test_failure_propagates_without_persisting() {
        let store = Arc::new(MemoryStore::new());
        let locator = CountingLocator::new(true);
        let resolver = LocationResolver::new(store.clone(), locator.clone());

        assert!(resolver.resolve().await.is_err());
        assert_eq!(locator.calls(), 1);
        assert_eq!(store.get(LOCATION_KEY).unwrap(), None);
    }

    #[test]
    fn test_corrupt_cache_is_dropped() {
        let store = Arc::new(MemoryStore::new());
        store.set(LOCATION_KEY, "{not json").unwrap();
        let locator = CountingLocator::new(false);
        let resolver = LocationResolver::new(store.clone(), locator.clone());

        assert_eq!(resolver.cached().unwrap(), None);
        assert_eq!(store.get(LOCATION_KEY).unwrap(), None);

        let location = tokio_test::block_on(resolver.resolve()).unwrap();
        assert_eq!(location, minna());
        assert_eq!(locator.calls(), 1);
    }

    #[test]
    fn test_forget_clears_slot() {
        let store = Arc::new(MemoryStore::new());
        store.set(LOCATION_KEY, "{}").unwrap();
        let resolver = LocationResolver::new(store.clone(), CountingLocator::new(false));

        resolver.forget().unwrap();
        assert_eq!(store.get(LOCATION_KEY).unwrap(), None);
    }
}
