use std::{fmt, sync::Arc};

use async_trait::async_trait;
use entity::prelude::*;
use futures::future::join_all;
use tracing::{error, info, warn};

use crate::SocialMediaError;

/// One upstream platform able to produce normalized posts.
#[async_trait]
pub trait PostSource: Send + Sync {
    fn platform(&self) -> Platform;

    async fn fetch_posts(
        &self,
    ) -> Result<Vec<SocialPostEntity>, SocialMediaError>;
}

/// Fans out to every source concurrently and merges the results.
pub struct Aggregator {
    sources: Vec<Arc<dyn PostSource>>,
    max_posts: usize,
}

impl fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let platforms = self
            .sources
            .iter()
            .map(|source| source.platform())
            .collect::<Vec<_>>();

        f.debug_struct("Aggregator")
            .field("sources", &platforms)
            .field("max_posts", &self.max_posts)
            .finish()
    }
}

impl Aggregator {
    pub fn new(sources: Vec<Arc<dyn PostSource>>, max_posts: usize) -> Self {
        Self { sources, max_posts }
    }

    /// Never fails. A platform that errors contributes no posts.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_all(&self) -> Vec<SocialPostEntity> {
        let results = join_all(self.sources.iter().map(|source| async move {
            (source.platform(), source.fetch_posts().await)
        }))
        .await;

        let mut posts = vec![];
        for (platform, result) in results {
            match result {
                Ok(fetched) => {
                    info!(
                        task = "fetch posts",
                        platform = platform.to_string(),
                        count = fetched.len(),
                    );
                    posts.extend(fetched);
                }
                Err(e @ SocialMediaError::MissingCredentials { .. }) => {
                    warn!(
                        task = "fetch posts",
                        platform = platform.to_string(),
                        error = e.to_string(),
                    );
                }
                Err(e) => {
                    error!(
                        task = "fetch posts",
                        platform = platform.to_string(),
                        error = e.to_string(),
                    );
                }
            }
        }

        posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        posts.truncate(self.max_posts);

        posts
    }
}

#[cfg(test)]
pub(crate) mod test {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    /// Canned source for exercising the fan-out without HTTP.
    pub(crate) struct FakeSource {
        pub platform: Platform,
        pub posts: Vec<SocialPostEntity>,
        pub fail: bool,
    }

    impl FakeSource {
        pub fn with_posts(platform: Platform, count: usize) -> Self {
            let base = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
            let posts = (0..count)
                .map(|i| SocialPostEntity {
                    id: platform.post_id(&i.to_string()),
                    platform,
                    content: format!("{} post {}", platform, i),
                    url: format!("https://example.com/{}", i),
                    timestamp: base + Duration::hours(i as i64),
                    ..Default::default()
                })
                .collect();

            Self {
                platform,
                posts,
                fail: false,
            }
        }

        pub fn failing(platform: Platform) -> Self {
            Self {
                platform,
                posts: vec![],
                fail: true,
            }
        }
    }

    #[async_trait]
    impl PostSource for FakeSource {
        fn platform(&self) -> Platform {
            self.platform
        }

        async fn fetch_posts(
            &self,
        ) -> Result<Vec<SocialPostEntity>, SocialMediaError> {
            if self.fail {
                return Err(SocialMediaError::MissingCredentials {
                    platform: self.platform,
                });
            }

            Ok(self.posts.clone())
        }
    }

    #[tokio::test]
    async fn test_fetch_all_sorts_newest_first() {
        // Arrange
        let aggregator = Aggregator::new(
            vec![
                Arc::new(FakeSource::with_posts(Platform::Facebook, 2)),
                Arc::new(FakeSource::with_posts(Platform::Twitter, 3)),
            ],
            12,
        );

        // Act
        let posts = aggregator.fetch_all().await;

        // Assert
        assert_eq!(posts.len(), 5);
        assert_eq!(posts[0].id, "tw-2");
        assert!(posts.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[tokio::test]
    async fn test_fetch_all_truncates() {
        // Arrange
        let aggregator = Aggregator::new(
            vec![
                Arc::new(FakeSource::with_posts(Platform::Facebook, 5)),
                Arc::new(FakeSource::with_posts(Platform::Instagram, 6)),
                Arc::new(FakeSource::with_posts(Platform::Twitter, 5)),
                Arc::new(FakeSource::with_posts(Platform::LinkedIn, 5)),
            ],
            12,
        );

        // Act
        let posts = aggregator.fetch_all().await;

        // Assert
        assert_eq!(posts.len(), 12);
        assert_eq!(posts[0].id, "ig-5");
    }

    #[tokio::test]
    async fn test_fetch_all_isolates_failures() {
        // Arrange
        let aggregator = Aggregator::new(
            vec![
                Arc::new(FakeSource::failing(Platform::Facebook)),
                Arc::new(FakeSource::with_posts(Platform::LinkedIn, 2)),
                Arc::new(FakeSource::failing(Platform::Twitter)),
            ],
            12,
        );

        // Act
        let posts = aggregator.fetch_all().await;

        // Assert
        assert_eq!(posts.len(), 2);
        assert!(posts.iter().all(|p| p.platform == Platform::LinkedIn));
    }

    #[tokio::test]
    async fn test_fetch_all_survives_slow_platform() {
        // Arrange
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(
                wiremock::ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "data": [] }))
                    .set_delay(std::time::Duration::from_millis(500)),
            )
            .mount(&server)
            .await;
        let client = crate::Client::new(
            &server.uri(),
            std::time::Duration::from_millis(50),
        )
        .unwrap();
        let facebook = crate::platforms::Facebook::new(
            client,
            Some("1234".to_string()),
            Some("token".to_string()),
            5,
        );
        let aggregator = Aggregator::new(
            vec![
                Arc::new(facebook),
                Arc::new(FakeSource::with_posts(Platform::LinkedIn, 2)),
            ],
            12,
        );

        // Act
        let posts = aggregator.fetch_all().await;

        // Assert
        assert_eq!(posts.len(), 2);
        assert!(posts.iter().all(|p| p.platform == Platform::LinkedIn));
    }

    #[tokio::test]
    async fn test_fetch_all_without_any_source() {
        let aggregator = Aggregator::new(
            vec![
                Arc::new(FakeSource::failing(Platform::Facebook)),
                Arc::new(FakeSource::failing(Platform::Instagram)),
                Arc::new(FakeSource::failing(Platform::Twitter)),
                Arc::new(FakeSource::failing(Platform::LinkedIn)),
            ],
            12,
        );

        let posts = aggregator.fetch_all().await;

        assert!(posts.is_empty());
    }
}
