use async_trait::async_trait;
use entity::prelude::*;
use tracing::warn;

use self::response::{Media, Tweet, TweetsResponse};
use crate::{
    aggregator::PostSource, platforms::parse_timestamp, Client,
    SocialMediaError,
};

mod response;

/// Recent tweets from the X API v2 timeline endpoint.
#[derive(Debug)]
pub struct Twitter {
    client: Client,
    bearer_token: Option<String>,
    user_id: Option<String>,
    handle: String,
    limit: u32,
}

impl Twitter {
    pub fn new(
        client: Client,
        bearer_token: Option<String>,
        user_id: Option<String>,
        handle: String,
        limit: u32,
    ) -> Self {
        Self {
            client,
            bearer_token,
            user_id,
            handle,
            limit,
        }
    }

    fn to_entity(
        &self,
        tweet: Tweet,
        media: &[Media],
    ) -> Option<SocialPostEntity> {
        let Some(timestamp) = parse_timestamp(&tweet.created_at) else {
            warn!(
                task = "map tweet",
                id = tweet.id.as_str(),
                created_at = tweet.created_at.as_str(),
            );
            return None;
        };

        let image = tweet.attachments.as_ref().and_then(|attachments| {
            media
                .iter()
                .find(|m| attachments.media_keys.contains(&m.media_key))
                .and_then(|m| m.url.clone())
        });
        let metrics = tweet.public_metrics.as_ref();

        Some(SocialPostEntity {
            id: Platform::Twitter.post_id(&tweet.id),
            platform: Platform::Twitter,
            content: tweet.text,
            image,
            url: format!("https://x.com/{}/status/{}", self.handle, tweet.id),
            likes: metrics.and_then(|m| m.like_count),
            comments: metrics.and_then(|m| m.reply_count),
            shares: metrics.and_then(|m| m.retweet_count),
            timestamp,
            author: None,
        })
    }
}

#[async_trait]
impl PostSource for Twitter {
    fn platform(&self) -> Platform {
        Platform::Twitter
    }

    async fn fetch_posts(
        &self,
    ) -> Result<Vec<SocialPostEntity>, SocialMediaError> {
        let (Some(bearer_token), Some(user_id)) =
            (&self.bearer_token, &self.user_id)
        else {
            return Err(SocialMediaError::MissingCredentials {
                platform: self.platform(),
            });
        };

        let limit = self.limit.to_string();
        let response = self
            .client
            .get::<TweetsResponse, _>(
                &format!("users/{}/tweets", user_id),
                &[
                    ("max_results", limit.as_str()),
                    ("tweet.fields", "created_at,public_metrics,attachments"),
                    ("media.fields", "url"),
                    ("expansions", "attachments.media_keys"),
                ],
                Some(bearer_token.as_str()),
            )
            .await?;

        let media = response.includes.map(|i| i.media).unwrap_or_default();

        Ok(response
            .data
            .into_iter()
            .filter_map(|tweet| self.to_entity(tweet, &media))
            .collect())
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::{
        matchers::{header, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;

    fn twitter(server: &MockServer) -> Twitter {
        Twitter::new(
            Client::new(&server.uri(), Duration::from_secs(5)).unwrap(),
            Some("bearer".to_string()),
            Some("42".to_string()),
            "thepalaceschool".to_string(),
            5,
        )
    }

    #[tokio::test]
    async fn test_fetch_posts_matches_attached_media() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/42/tweets"))
            .and(header("authorization", "Bearer bearer"))
            .and(query_param("max_results", "5"))
            .and(query_param("expansions", "attachments.media_keys"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {
                        "id": "100",
                        "text": "Results are out",
                        "created_at": "2024-05-04T09:00:00.000Z",
                        "public_metrics": {
                            "like_count": 7,
                            "reply_count": 1,
                            "retweet_count": 2
                        },
                        "attachments": { "media_keys": ["3_2"] }
                    },
                    {
                        "id": "101",
                        "text": "No picture here",
                        "created_at": "2024-05-03T09:00:00.000Z"
                    }
                ],
                "includes": {
                    "media": [
                        { "media_key": "3_1", "url": "https://pbs.example.com/1.jpg" },
                        { "media_key": "3_2", "url": "https://pbs.example.com/2.jpg" }
                    ]
                }
            })))
            .mount(&server)
            .await;

        // Act
        let posts = twitter(&server).fetch_posts().await.unwrap();

        // Assert
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, "tw-100");
        assert_eq!(
            posts[0].image.as_deref(),
            Some("https://pbs.example.com/2.jpg")
        );
        assert_eq!(posts[0].url, "https://x.com/thepalaceschool/status/100");
        assert_eq!(posts[0].likes, Some(7));
        assert_eq!(posts[0].comments, Some(1));
        assert_eq!(posts[0].shares, Some(2));
        assert_eq!(posts[1].image, None);
        assert_eq!(posts[1].likes, None);
    }

    #[tokio::test]
    async fn test_fetch_posts_without_data() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "meta": { "result_count": 0 } })),
            )
            .mount(&server)
            .await;

        // Act
        let posts = twitter(&server).fetch_posts().await.unwrap();

        // Assert
        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_posts_with_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let result = twitter(&server).fetch_posts().await;

        assert!(matches!(
            result,
            Err(SocialMediaError::SerdeJsonError { .. })
        ));
    }
}
