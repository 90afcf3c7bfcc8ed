use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where an article came from. Older backend records carry a bare name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArticleSource {
    Name(String),
    Outlet {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },
}

impl ArticleSource {
    pub fn name(&self) -> &str {
        match self {
            ArticleSource::Name(name) => name,
            ArticleSource::Outlet { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Legacy image field.
    #[serde(default)]
    pub image: Option<String>,
    pub source: ArticleSource,
    #[serde(default)]
    pub published_at: Option<String>,
    /// Legacy free-text time, e.g. "9 hours ago".
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
}

impl Article {
    pub fn new(id: impl Into<String>, title: impl Into<String>, source: &str) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            summary: None,
            content: None,
            url: None,
            image_url: None,
            image: None,
            source: ArticleSource::Name(source.to_string()),
            published_at: None,
            time: None,
            category: None,
            author: None,
            topics: Vec::new(),
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn display_image(&self) -> Option<&str> {
        self.image_url.as_deref().or(self.image.as_deref())
    }

    /// Get the best available body text for display
    pub fn display_content(&self) -> &str {
        self.content
            .as_deref()
            .or(self.summary.as_deref())
            .unwrap_or("")
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at.as_deref().and_then(parse_datetime)
    }

    /// Relative publication time, falling back to the legacy `time` text.
    pub fn display_time(&self, now: DateTime<Utc>) -> String {
        match self.published_at() {
            Some(published) => relative_time(published, now),
            None => self.time.clone().unwrap_or_default(),
        }
    }
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| s.parse::<DateTime<Utc>>().ok())
}

pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    if elapsed.num_seconds() < 0 {
        return "in the future".to_string();
    }

    let (count, unit) = if elapsed.num_minutes() < 1 {
        return "just now".to_string();
    } else if elapsed.num_hours() < 1 {
        (elapsed.num_minutes(), "minute")
    } else if elapsed.num_days() < 1 {
        (elapsed.num_hours(), "hour")
    } else if elapsed.num_days() < 30 {
        (elapsed.num_days(), "day")
    } else if elapsed.num_days() < 365 {
        (elapsed.num_days() / 30, "month")
    } else {
        (elapsed.num_days() / 365, "year")
    };

    if count == 1 {
        format!("a {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}
