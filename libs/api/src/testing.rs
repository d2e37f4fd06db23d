use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{TimeZone, Utc};
use entity::prelude::*;
use http_body_util::BodyExt;
use repository::{init_repository_with, ConnectOptions, RepositoryOptions};
use serde_json::Value;
use social_media::{
    Aggregator, Credentials, PostSource, SocialMedia, SocialMediaError,
};
use toml::{map::Map, Value as TomlValue};
use tower::ServiceExt;

use crate::{auth::Claims, init_config, router, ApiState};

pub(crate) const CONFIG: &str = r#"
    [auth]
    token_ttl_secs = 3600
    password_hash_cost = 4

    [contact]
    list_limit = 50

    [cors]
    origins = ["http://localhost:5173"]

    [social_media]
    cache_secs = 900
    max_posts = 12
    timeout_secs = 1

    [social_media.facebook]
    base_url = "http://127.0.0.1:9"
    limit = 5

    [social_media.instagram]
    base_url = "http://127.0.0.1:9"
    limit = 6

    [social_media.twitter]
    base_url = "http://127.0.0.1:9"
    limit = 5
    handle = "thepalaceschool"

    [social_media.linkedin]
    base_url = "http://127.0.0.1:9"
    limit = 5

    [social_media.stats]
    totalFollowers = "10K+"
    monthlyReach = "50K+"
    engagementRate = "85%"
    totalPosts = "500+"

    [[social_media.stats.platforms]]
    name = "Facebook"
    followers = 2500
    url = "https://www.facebook.com/share/1AF8tQzQWH/"
"#;

/// Twitter stand-in returning three posts and counting its calls.
struct CountingSource {
    fetches: Arc<AtomicUsize>,
}

#[async_trait]
impl PostSource for CountingSource {
    fn platform(&self) -> Platform {
        Platform::Twitter
    }

    async fn fetch_posts(
        &self,
    ) -> Result<Vec<SocialPostEntity>, SocialMediaError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        Ok((0..3)
            .map(|i| SocialPostEntity {
                id: Platform::Twitter.post_id(&i.to_string()),
                platform: Platform::Twitter,
                content: format!("tweet {}", i),
                url: format!("https://x.com/thepalaceschool/status/{}", i),
                timestamp: Utc
                    .with_ymd_and_hms(2024, 5, 1, i, 0, 0)
                    .unwrap(),
                ..Default::default()
            })
            .collect())
    }
}

pub(crate) struct TestApp {
    pub state: ApiState,
    pub fetches: Arc<AtomicUsize>,
}

impl TestApp {
    pub async fn new() -> Self {
        let config =
            toml::from_str::<Map<String, TomlValue>>(CONFIG).unwrap();
        let fetches = Arc::new(AtomicUsize::new(0));

        let aggregator = Aggregator::new(
            vec![Arc::new(CountingSource {
                fetches: fetches.clone(),
            })],
            12,
        );
        let stats = social_media::init_config(&config).unwrap().stats;
        let social =
            SocialMedia::new(aggregator, Duration::from_secs(900), stats);

        Self::build(&config, social, fetches).await
    }

    /// Real platform clients with every credential missing.
    pub async fn without_credentials() -> Self {
        let config =
            toml::from_str::<Map<String, TomlValue>>(CONFIG).unwrap();
        let social =
            social_media::serve(&config, Credentials::default()).unwrap();

        Self::build(&config, social, Arc::new(AtomicUsize::new(0))).await
    }

    async fn build(
        config: &Map<String, TomlValue>,
        social: SocialMedia,
        fetches: Arc<AtomicUsize>,
    ) -> Self {
        let config = init_config(config).unwrap();

        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);
        let repo = init_repository_with(
            opt,
            RepositoryOptions {
                password_hash_cost: config.auth.password_hash_cost,
            },
        )
        .await
        .unwrap();

        Self {
            state: ApiState::new(repo, social, config, "test-secret"),
            fetches,
        }
    }

    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    pub async fn create_admin(&self) -> UserEntity {
        self.state
            .repo
            .user
            .create("Admin User", "admin@palaceschool.edu", "admin123")
            .await
            .unwrap()
    }
}

/// `Authorization` header value carrying a fresh token for `user`.
pub(crate) fn bearer_for(app: &TestApp, user: &UserEntity) -> String {
    let claims = Claims::new(user, app.state.config.auth.token_ttl());

    format!("Bearer {}", app.state.keys.encode(&claims).unwrap())
}

pub(crate) async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    authorization: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(authorization) = authorization {
        builder = builder.header(header::AUTHORIZATION, authorization);
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}
