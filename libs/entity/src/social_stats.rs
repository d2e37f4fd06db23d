use serde::{Deserialize, Serialize};

/// Estimated audience figures shown on the social media page.
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMediaStats {
    pub total_followers: String,
    pub monthly_reach: String,
    pub engagement_rate: String,
    pub total_posts: String,
    pub platforms: Vec<PlatformStats>,
}

#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
pub struct PlatformStats {
    pub name: String,
    pub followers: u64,
    pub url: String,
}
