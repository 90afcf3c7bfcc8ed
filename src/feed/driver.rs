use std::sync::Arc;

use crate::domain::{Category, Topic, UserLocation};
use crate::feed::machine::FeedMachine;
use crate::feed::request::FetchRequest;
use crate::feed::state::FeedState;
use crate::fetcher::NewsSource;

/// Runs each transition of a [`FeedMachine`] to completion against a source.
pub struct FeedSession {
    machine: FeedMachine,
    source: Arc<dyn NewsSource>,
}

impl FeedSession {
    pub fn new(machine: FeedMachine, source: Arc<dyn NewsSource>) -> Self {
        Self { machine, source }
    }

    pub fn state(&self) -> &FeedState {
        self.machine.state()
    }

    pub fn machine(&self) -> &FeedMachine {
        &self.machine
    }

    /// Executes `request`, if any, and commits its result. Returns whether state changed.
    pub async fn run(&mut self, request: Option<FetchRequest>) -> bool {
        let Some(request) = request else {
            return false;
        };
        let result = request.execute(self.source.as_ref()).await;
        self.machine.complete(request, result)
    }

    /// Shows `category`, fetching it even if it is already active.
    pub async fn open(&mut self, category: Category) -> bool {
        let request = if self.machine.state().category == category {
            self.machine.refresh()
        } else {
            self.machine.select_category(category)
        };
        self.run(request).await
    }

    pub async fn select_category(&mut self, category: Category) -> bool {
        let request = self.machine.select_category(category);
        self.run(request).await
    }

    pub async fn submit_search(&mut self, query: &str) -> bool {
        let request = self.machine.submit_search(query);
        self.run(request).await
    }

    pub async fn load_more(&mut self) -> bool {
        let request = self.machine.load_more();
        self.run(request).await
    }

    pub async fn refresh(&mut self) -> bool {
        let request = self.machine.refresh();
        self.run(request).await
    }

    pub async fn set_topics(&mut self, topics: Vec<Topic>) -> bool {
        let request = self.machine.set_topics(topics);
        self.run(request).await
    }

    pub async fn set_location(&mut self, location: UserLocation) -> bool {
        let request = self.machine.set_location(location);
        self.run(request).await
    }
}
