use std::fmt;

/// The selected feed view: a reserved tag or a dynamic topic label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Category {
    #[default]
    Home,
    Trending,
    Local,
    Search,
    Topic(String),
}

impl Category {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Home" => Category::Home,
            "Trending" => Category::Trending,
            "Local" => Category::Local,
            "Search" => Category::Search,
            other => Category::Topic(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Category::Home => "Home",
            Category::Trending => "Trending",
            Category::Local => "Local",
            Category::Search => "Search",
            Category::Topic(label) => label,
        }
    }

    /// Whether loaded articles live in the shared topic accumulator.
    pub fn uses_topic_news(&self) -> bool {
        !matches!(self, Category::Home)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Category::from_label(label)
    }
}
