use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Identifier passed to `/news/by-topics`.
    pub key: String,
    /// Display name, also the category-switch key.
    pub label: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Topic {
    pub const HOME_KEY: &'static str = "home";

    pub fn new(key: impl Into<String>, label: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            emoji: emoji.into(),
            id: None,
        }
    }

    /// The built-in pseudo-topic that always heads the navigation.
    pub fn home() -> Self {
        Self::new(Self::HOME_KEY, "Home", "🏡")
    }
}
