//! Session-start loading of the navigable topic list.

use std::collections::HashSet;

use crate::domain::Topic;
use crate::fetcher::TopicSource;

pub struct TopicDirectory;

impl TopicDirectory {
    /// Fetches topics once, headed by the built-in Home pseudo-topic.
    ///
    /// Failures are logged and yield the Home topic alone. Later duplicates of
    /// a key are dropped.
    pub async fn load(source: &dyn TopicSource) -> Vec<Topic> {
        match source.topics().await {
            Ok(fetched) => {
                let topics = Self::with_home(fetched);
                tracing::info!("Loaded {} topics", topics.len() - 1);
                topics
            }
            Err(e) => {
                tracing::error!("Error fetching topics: {}", e);
                vec![Topic::home()]
            }
        }
    }

    pub fn with_home(fetched: Vec<Topic>) -> Vec<Topic> {
        let mut seen = HashSet::new();
        seen.insert(Topic::HOME_KEY.to_string());

        let mut topics = vec![Topic::home()];
        for topic in fetched {
            if seen.insert(topic.key.clone()) {
                topics.push(topic);
            } else {
                tracing::debug!("Skipping duplicate topic key {}", topic.key);
            }
        }
        topics
    }
}
