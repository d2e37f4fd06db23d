use async_trait::async_trait;
use entity::prelude::*;
use tracing::warn;

use self::response::{Post, PostsResponse};
use crate::{
    aggregator::PostSource, platforms::parse_timestamp, Client,
    SocialMediaError,
};

mod response;

const FIELDS: &str = "id,message,created_time,full_picture,permalink_url,likes.summary(true),comments.summary(true),shares";

/// Page posts from the Graph API.
#[derive(Debug)]
pub struct Facebook {
    client: Client,
    page_id: Option<String>,
    access_token: Option<String>,
    limit: u32,
}

impl Facebook {
    pub fn new(
        client: Client,
        page_id: Option<String>,
        access_token: Option<String>,
        limit: u32,
    ) -> Self {
        Self {
            client,
            page_id,
            access_token,
            limit,
        }
    }
}

#[async_trait]
impl PostSource for Facebook {
    fn platform(&self) -> Platform {
        Platform::Facebook
    }

    async fn fetch_posts(
        &self,
    ) -> Result<Vec<SocialPostEntity>, SocialMediaError> {
        let (Some(page_id), Some(access_token)) =
            (&self.page_id, &self.access_token)
        else {
            return Err(SocialMediaError::MissingCredentials {
                platform: self.platform(),
            });
        };

        let limit = self.limit.to_string();
        let response = self
            .client
            .get::<PostsResponse, _>(
                &format!("{}/posts", page_id),
                &[
                    ("fields", FIELDS),
                    ("limit", limit.as_str()),
                    ("access_token", access_token.as_str()),
                ],
                None,
            )
            .await?;

        Ok(response.data.into_iter().filter_map(into_entity).collect())
    }
}

fn into_entity(post: Post) -> Option<SocialPostEntity> {
    let Some(timestamp) = parse_timestamp(&post.created_time) else {
        warn!(
            task = "map facebook post",
            id = post.id.as_str(),
            created_time = post.created_time.as_str(),
        );
        return None;
    };

    Some(SocialPostEntity {
        id: Platform::Facebook.post_id(&post.id),
        platform: Platform::Facebook,
        content: post.message.unwrap_or_default(),
        image: post.full_picture,
        url: post
            .permalink_url
            .unwrap_or_else(|| format!("https://www.facebook.com/{}", post.id)),
        likes: post.likes.as_ref().and_then(|r| r.total_count()),
        comments: post.comments.as_ref().and_then(|r| r.total_count()),
        shares: post.shares.and_then(|s| s.count),
        timestamp,
        author: None,
    })
}
