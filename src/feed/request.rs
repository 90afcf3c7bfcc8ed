use futures::future::try_join;

use crate::app::Result;
use crate::domain::{Article, UserLocation};
use crate::fetcher::NewsSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Replaces the accumulator.
    Initial,
    /// Appends to the accumulator.
    More,
}

/// Which fetcher a request calls and which accumulator it feeds.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchTarget {
    /// Home page 1: hot and trending together.
    HomeSpotlight,
    /// Home page > 1: trending only, appended to `trending_news`.
    HomeTrending,
    Trending,
    Local(UserLocation),
    Search(String),
    Topic { key: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchedBatch {
    Spotlight {
        hot: Vec<Article>,
        trending: Vec<Article>,
    },
    Articles(Vec<Article>),
}

impl FetchedBatch {
    /// Length used for the short-page exhaustion check.
    pub fn paginated_len(&self) -> usize {
        match self {
            FetchedBatch::Spotlight { trending, .. } => trending.len(),
            FetchedBatch::Articles(articles) => articles.len(),
        }
    }
}

/// A fetch issued by the machine, tagged with the token it was issued under.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub(crate) token: u64,
    pub page: u32,
    pub limit: u32,
    pub mode: LoadMode,
    pub target: FetchTarget,
}

impl FetchRequest {
    pub async fn execute(&self, source: &dyn NewsSource) -> Result<FetchedBatch> {
        let (page, limit) = (self.page, self.limit);
        let batch = match &self.target {
            FetchTarget::HomeSpotlight => {
                let (hot, trending) =
                    try_join(source.hot(1, limit), source.trending(1, limit)).await?;
                FetchedBatch::Spotlight { hot, trending }
            }
            FetchTarget::HomeTrending | FetchTarget::Trending => {
                FetchedBatch::Articles(source.trending(page, limit).await?)
            }
            FetchTarget::Local(location) => FetchedBatch::Articles(
                source
                    .by_location(
                        &location.country_name,
                        &location.region,
                        &location.city,
                        page,
                        limit,
                    )
                    .await?,
            ),
            FetchTarget::Search(query) => {
                FetchedBatch::Articles(source.search(query, page, limit).await?)
            }
            FetchTarget::Topic { key } => {
                FetchedBatch::Articles(source.by_topic(key, page, limit).await?)
            }
        };
        Ok(batch)
    }
}
