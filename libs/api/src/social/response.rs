use chrono::SecondsFormat;
use entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetPostsResponse {
    pub success: bool,
    pub data: Vec<SocialPost>,
    pub cached: bool,
    /// present only when `data` comes from the cache
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_update: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct SocialPost {
    pub id: String,
    /// one of Facebook, Instagram, Twitter, LinkedIn
    pub platform: String,
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
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl From<SocialPostEntity> for SocialPost {
    fn from(value: SocialPostEntity) -> Self {
        Self {
            id: value.id,
            platform: value.platform.to_string(),
            content: value.content,
            image: value.image,
            url: value.url,
            likes: value.likes,
            comments: value.comments,
            shares: value.shares,
            timestamp: value
                .timestamp
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            author: value.author,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct GetStatsResponse {
    pub success: bool,
    pub data: SocialMediaStats,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SocialMediaStats {
    pub total_followers: String,
    pub monthly_reach: String,
    pub engagement_rate: String,
    pub total_posts: String,
    pub platforms: Vec<PlatformStats>,
}

#[derive(Serialize, ToSchema)]
pub struct PlatformStats {
    pub name: String,
    pub followers: u64,
    pub url: String,
}

impl From<SocialMediaStatsEntity> for SocialMediaStats {
    fn from(value: SocialMediaStatsEntity) -> Self {
        Self {
            total_followers: value.total_followers,
            monthly_reach: value.monthly_reach,
            engagement_rate: value.engagement_rate,
            total_posts: value.total_posts,
            platforms: value
                .platforms
                .into_iter()
                .map(|p| PlatformStats {
                    name: p.name,
                    followers: p.followers,
                    url: p.url,
                })
                .collect(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct RefreshResponse {
    pub success: bool,
    pub message: String,
}
