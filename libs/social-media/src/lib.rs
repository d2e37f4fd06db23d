use std::{sync::Arc, time::Duration};

use anyhow::Context as _;
use entity::prelude::*;
use serde::Deserialize;
use toml::{map::Map, Value};
use tracing::info;

mod aggregator;
mod cache;
mod client;
pub mod platforms;
mod response;

pub use aggregator::{Aggregator, PostSource};
pub use cache::{PostCache, PostsSnapshot};
pub use client::Client;

use platforms::{Facebook, Instagram, LinkedIn, Twitter};

#[derive(Debug, thiserror::Error)]
pub enum SocialMediaError {
    #[error("{platform} credentials not configured")]
    MissingCredentials { platform: Platform },

    #[error("in reqwest crate: {message}: {source}")]
    ReqwestError {
        message: String,
        source: reqwest::Error,
    },

    #[error("unsuccessful status code {status_code}: {message}")]
    FailedStatusCode {
        status_code: reqwest::StatusCode,
        message: String,
    },

    #[error("in serde_json crate: {message}: {source}")]
    SerdeJsonError {
        message: String,
        source: serde_json::Error,
    },

    #[error("invalid header value: {message}: {source}")]
    InvalidHeaderValue {
        message: String,
        source: reqwest::header::InvalidHeaderValue,
    },
}

/// Platform secrets. Each integration is enabled only when all of its
/// values are present.
#[derive(Clone, Debug, Default)]
pub struct Credentials {
    pub facebook_page_id: Option<String>,
    pub facebook_access_token: Option<String>,
    pub instagram_account_id: Option<String>,
    pub twitter_bearer_token: Option<String>,
    pub twitter_user_id: Option<String>,
    pub linkedin_access_token: Option<String>,
    pub linkedin_organization_id: Option<String>,
}

impl Credentials {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            facebook_page_id: lookup("FACEBOOK_PAGE_ID"),
            facebook_access_token: lookup("FACEBOOK_ACCESS_TOKEN"),
            instagram_account_id: lookup("INSTAGRAM_ACCOUNT_ID"),
            twitter_bearer_token: lookup("TWITTER_BEARER_TOKEN"),
            twitter_user_id: lookup("TWITTER_USER_ID"),
            linkedin_access_token: lookup("LINKEDIN_ACCESS_TOKEN"),
            linkedin_organization_id: lookup("LINKEDIN_ORGANIZATION_ID"),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub cache_secs: u64,
    pub max_posts: usize,
    pub timeout_secs: u64,
    pub facebook: PlatformConfig,
    pub instagram: PlatformConfig,
    pub twitter: TwitterConfig,
    pub linkedin: PlatformConfig,
    pub stats: SocialMediaStatsEntity,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PlatformConfig {
    pub base_url: String,
    pub limit: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TwitterConfig {
    pub base_url: String,
    pub limit: u32,
    /// account handle used to build public post links
    pub handle: String,
}

pub fn init_config(config: &Map<String, Value>) -> anyhow::Result<Config> {
    let social_media = config
        .get("social_media")
        .context("failed to get social_media config")?;

    social_media
        .clone()
        .try_into::<Config>()
        .context("failed to parse social_media config")
}

/// Aggregated feed of the school's social accounts with its cache window.
#[derive(Clone, Debug)]
pub struct SocialMedia {
    aggregator: Arc<Aggregator>,
    cache: Arc<PostCache>,
    stats: SocialMediaStatsEntity,
}

impl SocialMedia {
    pub fn new(
        aggregator: Aggregator,
        cache_window: Duration,
        stats: SocialMediaStatsEntity,
    ) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            cache: Arc::new(PostCache::new(cache_window)),
            stats,
        }
    }

    /// Cached posts while the window is open, otherwise a fresh fan-out.
    pub async fn posts(&self) -> PostsSnapshot {
        let aggregator = self.aggregator.clone();

        self.cache
            .get_or_fetch(|| async move { aggregator.fetch_all().await })
            .await
    }

    pub async fn refresh(&self) {
        self.cache.clear().await;
    }

    pub fn stats(&self) -> SocialMediaStatsEntity {
        self.stats.clone()
    }
}

pub fn serve(
    config: &Map<String, Value>,
    credentials: Credentials,
) -> anyhow::Result<SocialMedia> {
    info!(task = "start social media aggregation");

    let config = init_config(config)?;
    let timeout = Duration::from_secs(config.timeout_secs);

    let facebook = Facebook::new(
        Client::new(&config.facebook.base_url, timeout)?,
        credentials.facebook_page_id.clone(),
        credentials.facebook_access_token.clone(),
        config.facebook.limit,
    );
    let instagram = Instagram::new(
        Client::new(&config.instagram.base_url, timeout)?,
        credentials.instagram_account_id,
        credentials.facebook_access_token,
        config.instagram.limit,
    );
    let twitter = Twitter::new(
        Client::new(&config.twitter.base_url, timeout)?,
        credentials.twitter_bearer_token,
        credentials.twitter_user_id,
        config.twitter.handle.clone(),
        config.twitter.limit,
    );
    let linkedin = LinkedIn::new(
        Client::new(&config.linkedin.base_url, timeout)?
            .with_header("x-restli-protocol-version", "2.0.0")?,
        credentials.linkedin_access_token,
        credentials.linkedin_organization_id,
        config.linkedin.limit,
    );

    let aggregator = Aggregator::new(
        vec![
            Arc::new(facebook),
            Arc::new(instagram),
            Arc::new(twitter),
            Arc::new(linkedin),
        ],
        config.max_posts,
    );

    Ok(SocialMedia::new(
        aggregator,
        Duration::from_secs(config.cache_secs),
        config.stats,
    ))
}

#[cfg(test)]
mod test {
    use super::*;

    const CONFIG: &str = r#"
        [social_media]
        cache_secs = 900
        max_posts = 12
        timeout_secs = 10

        [social_media.facebook]
        base_url = "https://graph.facebook.com/v18.0"
        limit = 5

        [social_media.instagram]
        base_url = "https://graph.facebook.com/v18.0"
        limit = 6

        [social_media.twitter]
        base_url = "https://api.twitter.com/2"
        limit = 5
        handle = "thepalaceschool"

        [social_media.linkedin]
        base_url = "https://api.linkedin.com/v2"
        limit = 5

        [social_media.stats]
        totalFollowers = "10K+"
        monthlyReach = "50K+"
        engagementRate = "85%"
        totalPosts = "500+"

        [[social_media.stats.platforms]]
        name = "Facebook"
        followers = 2500
        url = "https://www.facebook.com/thepalaceschool"
    "#;

    #[test]
    fn test_init_config() {
        // Arrange
        let config = toml::from_str::<Map<String, Value>>(CONFIG).unwrap();

        // Act
        let config = init_config(&config).unwrap();

        // Assert
        assert_eq!(config.cache_secs, 900);
        assert_eq!(config.max_posts, 12);
        assert_eq!(config.instagram.limit, 6);
        assert_eq!(config.twitter.handle, "thepalaceschool");
        assert_eq!(config.stats.total_followers, "10K+");
        assert_eq!(config.stats.platforms[0].followers, 2500);
    }

    #[test]
    fn test_credentials_from_lookup() {
        let credentials = Credentials::from_lookup(|key| match key {
            "TWITTER_USER_ID" => Some("123".to_string()),
            _ => None,
        });

        assert_eq!(credentials.twitter_user_id.as_deref(), Some("123"));
        assert_eq!(credentials.twitter_bearer_token, None);
        assert_eq!(credentials.facebook_page_id, None);
    }

    #[tokio::test]
    async fn test_serve_without_credentials_returns_empty_feed() {
        // Arrange
        let config = toml::from_str::<Map<String, Value>>(CONFIG).unwrap();
        let social_media = serve(&config, Credentials::default()).unwrap();

        // Act
        let snapshot = social_media.posts().await;

        // Assert
        assert!(snapshot.posts.is_empty());
        assert!(!snapshot.cached);
        assert_eq!(social_media.stats().monthly_reach, "50K+");
    }
}
