pub mod geo;
pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::{Article, Topic, UserLocation};

pub use geo::HttpGeoLocator;
pub use http_fetcher::HttpNewsClient;

/// Paginated article endpoints. `page` is 1-indexed.
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn hot(&self, page: u32, limit: u32) -> Result<Vec<Article>>;

    async fn trending(&self, page: u32, limit: u32) -> Result<Vec<Article>>;

    async fn by_topic(&self, topic_key: &str, page: u32, limit: u32) -> Result<Vec<Article>>;

    async fn by_location(
        &self,
        country: &str,
        region: &str,
        city: &str,
        page: u32,
        limit: u32,
    ) -> Result<Vec<Article>>;

    async fn search(&self, query: &str, page: u32, limit: u32) -> Result<Vec<Article>>;
}

#[async_trait]
pub trait TopicSource: Send + Sync {
    async fn topics(&self) -> Result<Vec<Topic>>;
}

#[async_trait]
pub trait GeoLocator: Send + Sync {
    async fn locate(&self) -> Result<UserLocation>;
}
