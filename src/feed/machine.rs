use crate::app::Result;
use crate::config::FeedConfig;
use crate::domain::{Category, Topic, UserLocation};
use crate::feed::request::{FetchRequest, FetchTarget, FetchedBatch, LoadMode};
use crate::feed::state::FeedState;

pub struct FeedMachine {
    state: FeedState,
    topics: Vec<Topic>,
    fallback_topics: Vec<Topic>,
    location: Option<UserLocation>,
    page_size: u32,
    /// Token of the most recently issued request; anything older is stale.
    current_token: u64,
}

impl FeedMachine {
    pub fn new(page_size: u32) -> Self {
        Self {
            state: FeedState::default(),
            topics: vec![Topic::home()],
            fallback_topics: Vec::new(),
            location: None,
            page_size: page_size.max(1),
            current_token: 0,
        }
    }

    pub fn from_config(config: &FeedConfig) -> Self {
        Self::new(config.page_size()).with_fallback_topics(config.extra_topics.clone())
    }

    pub fn with_fallback_topics(mut self, topics: Vec<Topic>) -> Self {
        self.fallback_topics = topics;
        self
    }

    /// Hydrates the topic list without triggering a fetch.
    pub fn with_topics(mut self, topics: Vec<Topic>) -> Self {
        self.topics = topics;
        self
    }

    /// Hydrates the location without triggering a fetch.
    pub fn with_location(mut self, location: Option<UserLocation>) -> Self {
        self.location = location;
        self
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn location(&self) -> Option<&UserLocation> {
        self.location.as_ref()
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// User picked a category from the navigation.
    ///
    /// Re-selecting the active category does nothing. Selecting Search only
    /// resets the view; a search fetch needs an explicit submission.
    pub fn select_category(&mut self, category: Category) -> Option<FetchRequest> {
        if category == self.state.category {
            return None;
        }

        tracing::debug!("Category {} -> {}", self.state.category, category);
        self.state.category = category;
        self.reset_pagination();
        self.dependency_changed()
    }

    /// User submitted a search query. Blank queries leave everything untouched.
    pub fn submit_search(&mut self, query: &str) -> Option<FetchRequest> {
        let query = query.trim();
        if query.is_empty() {
            tracing::debug!("Ignoring blank search");
            return None;
        }

        self.state.search_term = Some(query.to_string());
        self.state.category = Category::Search;
        self.reset_pagination();
        self.issue(LoadMode::Initial, 1)
    }

    /// Fetches the next page, unless exhausted or a fetch is already in flight.
    pub fn load_more(&mut self) -> Option<FetchRequest> {
        if !self.state.can_load_more() {
            tracing::debug!(
                "Load more refused (has_more={}, loading={})",
                self.state.has_more,
                self.state.is_loading()
            );
            return None;
        }

        let next_page = self.state.page + 1;
        self.issue(LoadMode::More, next_page)
    }

    /// Initial fetch of the active category, e.g. on startup or a manual refresh.
    pub fn refresh(&mut self) -> Option<FetchRequest> {
        self.issue(LoadMode::Initial, 1)
    }

    pub fn set_topics(&mut self, topics: Vec<Topic>) -> Option<FetchRequest> {
        if topics == self.topics {
            return None;
        }
        self.topics = topics;
        self.dependency_changed()
    }

    pub fn set_location(&mut self, location: UserLocation) -> Option<FetchRequest> {
        if self.location.as_ref() == Some(&location) {
            return None;
        }
        self.location = Some(location);
        self.dependency_changed()
    }

    /// Commits the result of `request`. Returns whether state changed.
    ///
    /// Results of superseded requests are dropped. A failed fetch only clears
    /// the loading flags.
    pub fn complete(&mut self, request: FetchRequest, result: Result<FetchedBatch>) -> bool {
        if request.token != self.current_token {
            tracing::warn!(
                "Discarding stale response for {:?} page {} (token {}, current {})",
                request.target,
                request.page,
                request.token,
                self.current_token
            );
            return false;
        }

        self.state.is_loading_initial = false;
        self.state.is_loading_more = false;

        let batch = match result {
            Ok(batch) => batch,
            Err(e) => {
                tracing::error!("Error fetching news: {}", e);
                return false;
            }
        };

        let full_page = batch.paginated_len() >= self.page_size as usize;
        match (request.target, batch) {
            (FetchTarget::HomeSpotlight, FetchedBatch::Spotlight { hot, trending }) => {
                self.state.hot_news = hot;
                self.state.trending_news = trending;
            }
            (FetchTarget::HomeTrending, FetchedBatch::Articles(articles)) => {
                self.state.trending_news.extend(articles);
            }
            (FetchTarget::HomeSpotlight, _) | (_, FetchedBatch::Spotlight { .. }) => {
                tracing::warn!("Batch shape does not match its request, ignoring");
                return false;
            }
            (_, FetchedBatch::Articles(articles)) => match request.mode {
                LoadMode::Initial => self.state.topic_news = articles,
                LoadMode::More => self.state.topic_news.extend(articles),
            },
        }

        self.state.has_more = full_page;
        self.state.page = request.page;
        tracing::info!(
            "Committed {} page {} ({} articles, has_more={})",
            self.state.category,
            request.page,
            self.state.articles().len(),
            full_page
        );
        true
    }

    fn reset_pagination(&mut self) {
        self.state.page = 1;
        self.state.has_more = true;
        self.state.topic_news.clear();
        self.state.is_loading_initial = false;
        self.state.is_loading_more = false;
        // In-flight requests belong to the previous view.
        self.current_token += 1;
    }

    /// Re-runs the initial fetch when the category, topics or location change.
    fn dependency_changed(&mut self) -> Option<FetchRequest> {
        if self.state.category == Category::Search {
            return None;
        }
        if !self.is_ready() {
            tracing::debug!("{} not ready yet, deferring fetch", self.state.category);
            return None;
        }
        self.issue(LoadMode::Initial, 1)
    }

    fn is_ready(&self) -> bool {
        let topics_loaded = self.topics.len() > 1;
        match self.state.category {
            Category::Home => true,
            Category::Local => topics_loaded && self.location.is_some(),
            _ => topics_loaded,
        }
    }

    fn issue(&mut self, mode: LoadMode, page: u32) -> Option<FetchRequest> {
        let Some(target) = self.resolve_target(page) else {
            self.state.is_loading_initial = false;
            self.state.is_loading_more = false;
            // Nothing is loading, so nothing in flight may commit.
            self.current_token += 1;
            return None;
        };

        self.current_token += 1;
        match mode {
            LoadMode::Initial => self.state.is_loading_initial = true,
            LoadMode::More => self.state.is_loading_more = true,
        }

        tracing::debug!("Issuing {:?} page {} ({:?})", target, page, mode);
        Some(FetchRequest {
            token: self.current_token,
            page,
            limit: self.page_size,
            mode,
            target,
        })
    }

    fn resolve_target(&self, page: u32) -> Option<FetchTarget> {
        match &self.state.category {
            Category::Home if page == 1 => Some(FetchTarget::HomeSpotlight),
            Category::Home => Some(FetchTarget::HomeTrending),
            Category::Trending => Some(FetchTarget::Trending),
            Category::Local => {
                let target = self.location.clone().map(FetchTarget::Local);
                if target.is_none() {
                    tracing::debug!("Local feed waiting for location");
                }
                target
            }
            Category::Search => self
                .state
                .search_term
                .as_deref()
                .map(str::trim)
                .filter(|term| !term.is_empty())
                .map(|term| FetchTarget::Search(term.to_string())),
            Category::Topic(label) => {
                let key = self.topic_key(label);
                if key.is_none() {
                    tracing::debug!("No topic matches label {}", label);
                }
                key.map(|key| FetchTarget::Topic { key })
            }
        }
    }

    fn topic_key(&self, label: &str) -> Option<String> {
        self.topics
            .iter()
            .chain(self.fallback_topics.iter())
            .find(|topic| topic.label == label)
            .map(|topic| topic.key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::NewsdeskError;
    use crate::domain::Article;

    const SIZE: u32 = 10;

    fn batch(prefix: &str, n: usize) -> Vec<Article> {
        (0..n)
            .map(|i| Article::new(format!("{}-{}", prefix, i), format!("{} {}", prefix, i), "Wire"))
            .collect()
    }

    fn topics() -> Vec<Topic> {
        vec![
            Topic::home(),
            Topic::new("trending", "Trending", "🔥"),
            Topic::new("local", "Local", "📍"),
            Topic::new("tech", "Technology", "💻"),
        ]
    }

    fn minna() -> UserLocation {
        UserLocation {
            city: "Minna".into(),
            region: "Niger".into(),
            country_name: "Nigeria".into(),
            country_code: "NG".into(),
        }
    }

    fn ready_machine() -> FeedMachine {
        FeedMachine::new(SIZE).with_topics(topics())
    }

    fn articles(n: usize) -> Result<FetchedBatch> {
        Ok(FetchedBatch::Articles(batch("a", n)))
    }

    #[test]
    fn test_home_refresh_issues_spotlight() {
        let mut machine = FeedMachine::new(SIZE);
        let request = machine.refresh().unwrap();

        assert_eq!(request.target, FetchTarget::HomeSpotlight);
        assert_eq!(request.page, 1);
        assert_eq!(request.limit, SIZE);
        assert!(machine.state().is_loading_initial);
    }

    #[test]
    fn test_spotlight_commit_replaces_both_lists() {
        let mut machine = FeedMachine::new(SIZE);
        let request = machine.refresh().unwrap();
        let committed = machine.complete(
            request,
            Ok(FetchedBatch::Spotlight {
                hot: batch("hot", 4),
                trending: batch("trending", 10),
            }),
        );

        assert!(committed);
        let state = machine.state();
        assert_eq!(state.hot_news.len(), 4);
        assert_eq!(state.trending_news.len(), 10);
        assert!(state.has_more);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_short_page_ends_pagination() {
        let mut machine = ready_machine();
        let request = machine.select_category(Category::Trending).unwrap();
        machine.complete(request, articles(7));
        assert!(!machine.state().has_more);
        assert!(machine.load_more().is_none());
    }

    #[test]
    fn test_full_page_keeps_pagination() {
        let mut machine = ready_machine();
        let request = machine.select_category(Category::Trending).unwrap();
        machine.complete(request, articles(10));
        assert!(machine.state().has_more);
    }

    #[test]
    fn test_home_load_more_appends_trending_only() {
        let mut machine = FeedMachine::new(SIZE);
        let request = machine.refresh().unwrap();
        machine.complete(
            request,
            Ok(FetchedBatch::Spotlight {
                hot: batch("hot", 4),
                trending: batch("trending", 10),
            }),
        );

        let request = machine.load_more().unwrap();
        assert_eq!(request.target, FetchTarget::HomeTrending);
        assert_eq!(request.page, 2);
        assert!(machine.state().is_loading_more);

        machine.complete(request, Ok(FetchedBatch::Articles(batch("more", 3))));
        let state = machine.state();
        assert_eq!(state.hot_news.len(), 4);
        assert_eq!(state.trending_news.len(), 13);
        assert_eq!(state.page, 2);
        assert!(!state.has_more);
    }

    #[test]
    fn test_category_change_resets_view() {
        let mut machine = ready_machine();
        let request = machine.select_category(Category::Trending).unwrap();
        machine.complete(request, articles(10));
        let request = machine.load_more().unwrap();
        machine.complete(request, articles(10));
        assert_eq!(machine.state().page, 2);

        let request = machine.select_category(Category::from_label("Technology"));
        let state = machine.state();
        assert_eq!(state.page, 1);
        assert!(state.has_more);
        assert!(state.topic_news.is_empty());
        assert_eq!(
            request.unwrap().target,
            FetchTarget::Topic { key: "tech".into() }
        );
    }

    #[test]
    fn test_reselecting_active_category_is_noop() {
        let mut machine = ready_machine();
        let request = machine.select_category(Category::Trending).unwrap();
        machine.complete(request, articles(10));

        assert!(machine.select_category(Category::Trending).is_none());
        assert_eq!(machine.state().topic_news.len(), 10);
    }

    #[test]
    fn test_selecting_search_does_not_fetch() {
        let mut machine = ready_machine();
        assert!(machine.select_category(Category::Search).is_none());
        assert_eq!(machine.state().category, Category::Search);
        assert!(!machine.state().is_loading());
    }

    #[test]
    fn test_topic_category_waits_for_topics() {
        let mut machine = FeedMachine::new(SIZE);
        assert!(machine
            .select_category(Category::from_label("Technology"))
            .is_none());

        let request = machine.set_topics(topics()).unwrap();
        assert_eq!(request.target, FetchTarget::Topic { key: "tech".into() });
    }

    #[test]
    fn test_unknown_topic_is_noop() {
        let mut machine = ready_machine();
        assert!(machine
            .select_category(Category::from_label("Astrology"))
            .is_none());
        assert!(!machine.state().is_loading());
        assert!(machine.state().topic_news.is_empty());
    }

    #[test]
    fn test_fallback_topics_resolve_labels() {
        let mut machine =
            ready_machine().with_fallback_topics(vec![Topic::new("science", "Science", "🔬")]);
        let request = machine.select_category(Category::from_label("Science")).unwrap();
        assert_eq!(request.target, FetchTarget::Topic { key: "science".into() });
    }

    #[test]
    fn test_local_waits_for_location() {
        let mut machine = ready_machine();
        assert!(machine.select_category(Category::Local).is_none());
        assert!(machine.refresh().is_none());
        assert!(!machine.state().is_loading());

        let request = machine.set_location(minna()).unwrap();
        assert_eq!(request.target, FetchTarget::Local(minna()));

        // Same location again is not a change.
        assert!(machine.set_location(minna()).is_none());
    }

    #[test]
    fn test_blank_search_leaves_state_untouched() {
        let mut machine = ready_machine();
        let request = machine.select_category(Category::Trending).unwrap();
        machine.complete(request, articles(10));
        let before = machine.state().clone();

        assert!(machine.submit_search("   ").is_none());
        assert!(machine.submit_search("").is_none());
        assert_eq!(machine.state(), &before);
    }

    #[test]
    fn test_search_resets_and_fetches_trimmed_query() {
        let mut machine = ready_machine();
        let request = machine.select_category(Category::from_label("Technology")).unwrap();
        machine.complete(request, articles(10));

        let request = machine.submit_search("  election ").unwrap();
        let state = machine.state();
        assert_eq!(state.category, Category::Search);
        assert_eq!(state.search_term.as_deref(), Some("election"));
        assert_eq!(state.page, 1);
        assert!(state.topic_news.is_empty());
        assert_eq!(request.target, FetchTarget::Search("election".into()));
        assert_eq!(request.page, 1);
    }

    #[test]
    fn test_search_load_more_reuses_term() {
        let mut machine = ready_machine();
        let request = machine.submit_search("election").unwrap();
        machine.complete(request, articles(10));

        let request = machine.load_more().unwrap();
        assert_eq!(request.target, FetchTarget::Search("election".into()));
        assert_eq!(request.page, 2);
    }

    #[test]
    fn test_dependency_change_skips_search() {
        let mut machine = FeedMachine::new(SIZE);
        let request = machine.submit_search("election").unwrap();
        machine.complete(request, articles(3));

        assert!(machine.set_topics(topics()).is_none());
        assert!(machine.set_location(minna()).is_none());
    }

    #[test]
    fn test_load_more_refused_while_loading() {
        let mut machine = ready_machine();
        let _in_flight = machine.select_category(Category::Trending).unwrap();
        assert!(machine.load_more().is_none());
    }

    #[test]
    fn test_load_more_appends_without_dropping() {
        let mut machine = ready_machine();
        let request = machine.select_category(Category::from_label("Technology")).unwrap();
        machine.complete(request, articles(10));
        let before = machine.state().topic_news.len();

        let request = machine.load_more().unwrap();
        assert_eq!(request.mode, LoadMode::More);
        machine.complete(request, Ok(FetchedBatch::Articles(batch("page2", 6))));

        let after = &machine.state().topic_news;
        assert_eq!(after.len(), before + 6);
        assert_eq!(after[0].id, "a-0");
        assert_eq!(after[before].id, "page2-0");
    }

    #[test]
    fn test_failure_leaves_state_and_page() {
        let mut machine = ready_machine();
        let request = machine.select_category(Category::Trending).unwrap();
        machine.complete(request, articles(10));
        let before = machine.state().clone();

        let request = machine.load_more().unwrap();
        let committed = machine.complete(
            request,
            Err(NewsdeskError::Other("connection reset".into())),
        );

        assert!(!committed);
        assert_eq!(machine.state(), &before);
        assert_eq!(machine.state().page, 1);

        // Retrying asks for the same page again.
        assert_eq!(machine.load_more().unwrap().page, 2);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut machine = ready_machine();
        let technology = machine
            .select_category(Category::from_label("Technology"))
            .unwrap();
        let trending = machine.select_category(Category::Trending).unwrap();

        assert!(machine.complete(trending, Ok(FetchedBatch::Articles(batch("trending", 10)))));
        assert!(!machine.complete(technology, Ok(FetchedBatch::Articles(batch("tech", 10)))));

        let state = machine.state();
        assert_eq!(state.category, Category::Trending);
        assert!(state.topic_news.iter().all(|a| a.id.starts_with("trending")));
    }

    #[test]
    fn test_stale_response_after_switch_to_unready_view() {
        let mut machine = ready_machine();
        let trending = machine.select_category(Category::Trending).unwrap();
        assert!(machine.select_category(Category::Local).is_none());

        assert!(!machine.complete(trending, articles(10)));
        assert!(machine.state().topic_news.is_empty());
        assert!(!machine.state().is_loading());
    }

    #[test]
    fn test_in_flight_load_more_dropped_when_topic_vanishes() {
        let mut machine = ready_machine();
        let request = machine
            .select_category(Category::from_label("Technology"))
            .unwrap();
        assert!(machine.complete(request, articles(10)));

        let more = machine.load_more().unwrap();
        let sports = vec![Topic::home(), Topic::new("sports", "Sports", "⚽")];
        assert!(machine.set_topics(sports).is_none());
        assert!(!machine.state().is_loading());

        assert!(!machine.complete(more, articles(10)));
        let state = machine.state();
        assert_eq!(state.page, 1);
        assert_eq!(state.topic_news.len(), 10);
    }

    #[test]
    fn test_refresh_without_target_invalidates_in_flight() {
        let mut machine = ready_machine();
        assert!(machine.select_category(Category::Local).is_none());
        let request = machine.set_location(minna()).unwrap();

        machine.location = None;
        assert!(machine.refresh().is_none());
        assert!(!machine.complete(request, articles(10)));
        assert!(machine.state().topic_news.is_empty());
    }

    #[test]
    fn test_page_fill_decides_has_more_for_every_category() {
        let cases = [
            (Category::Trending, None),
            (Category::Local, None),
            (Category::Search, Some("election")),
            (Category::from_label("Technology"), None),
        ];

        for (category, query) in cases {
            for (len, expected) in [(10, true), (11, true), (9, false), (0, false)] {
                let mut machine = ready_machine().with_location(Some(minna()));
                let request = match query {
                    Some(query) => machine.submit_search(query),
                    None => machine.select_category(category.clone()),
                }
                .unwrap();

                assert!(machine.complete(request, articles(len)));
                assert_eq!(
                    machine.state().has_more,
                    expected,
                    "{} with {} articles",
                    category,
                    len
                );
                assert_eq!(machine.load_more().is_some(), expected);
            }
        }
    }

    #[test]
    fn test_mismatched_batch_is_ignored() {
        let mut machine = FeedMachine::new(SIZE);
        let request = machine.refresh().unwrap();
        assert!(!machine.complete(request, articles(10)));
        assert!(machine.state().trending_news.is_empty());
    }

    #[test]
    fn test_from_config() {
        let config = FeedConfig {
            page_size: 0,
            extra_topics: vec![Topic::new("science", "Science", "🔬")],
        };
        let machine = FeedMachine::from_config(&config);
        assert_eq!(machine.page_size(), 1);
    }
}
