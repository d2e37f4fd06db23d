use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
pub enum Platform {
    #[default]
    Facebook,
    Instagram,
    Twitter,
    LinkedIn,
}

impl Platform {
    /// Prefix put in front of upstream ids so ids stay unique across
    /// platforms.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Platform::Facebook => "fb",
            Platform::Instagram => "ig",
            Platform::Twitter => "tw",
            Platform::LinkedIn => "li",
        }
    }

    pub fn post_id(&self, upstream_id: &str) -> String {
        format!("{}-{}", self.id_prefix(), upstream_id)
    }
}

/// A post normalized from one of the upstream platforms. Never persisted.
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
pub struct SocialPost {
    pub id: String,
    pub platform: Platform,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shares: Option<u64>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}
