use crate::domain::{Article, Category};

/// Everything the presentation layer needs to render the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedState {
    pub category: Category,
    /// Last page committed for the active category, 1-indexed.
    pub page: u32,
    /// Best-effort: true while the last batch was a full page.
    pub has_more: bool,
    pub is_loading_initial: bool,
    pub is_loading_more: bool,
    pub search_term: Option<String>,
    /// Home spotlight, never paginated.
    pub hot_news: Vec<Article>,
    /// Home "latest news" list.
    pub trending_news: Vec<Article>,
    /// Shared by every category other than Home.
    pub topic_news: Vec<Article>,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            category: Category::Home,
            page: 1,
            has_more: true,
            is_loading_initial: false,
            is_loading_more: false,
            search_term: None,
            hot_news: Vec::new(),
            trending_news: Vec::new(),
            topic_news: Vec::new(),
        }
    }
}

impl FeedState {
    pub fn is_loading(&self) -> bool {
        self.is_loading_initial || self.is_loading_more
    }

    /// Whether a "load more" control should be offered and enabled.
    pub fn can_load_more(&self) -> bool {
        self.has_more && !self.is_loading()
    }

    /// The paginated list for the active category.
    pub fn articles(&self) -> &[Article] {
        if self.category.uses_topic_news() {
            &self.topic_news
        } else {
            &self.trending_news
        }
    }

    /// Section heading for the active category.
    pub fn title(&self) -> String {
        match &self.category {
            Category::Home => "Your briefing".to_string(),
            Category::Search => match &self.search_term {
                Some(term) => format!("Search: {}", term),
                None => "Search".to_string(),
            },
            other => other.label().to_string(),
        }
    }
}
