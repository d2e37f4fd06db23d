use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entity::prelude::*;

use self::response::{UgcPost, UgcPostsResponse};
use crate::{aggregator::PostSource, Client, SocialMediaError};

mod response;

/// Organization shares from the UGC posts API. The client is expected to
/// send the Rest.li 2.0 protocol header.
#[derive(Debug)]
pub struct LinkedIn {
    client: Client,
    access_token: Option<String>,
    organization_id: Option<String>,
    limit: u32,
}

impl LinkedIn {
    pub fn new(
        client: Client,
        access_token: Option<String>,
        organization_id: Option<String>,
        limit: u32,
    ) -> Self {
        Self {
            client,
            access_token,
            organization_id,
            limit,
        }
    }
}

#[async_trait]
impl PostSource for LinkedIn {
    fn platform(&self) -> Platform {
        Platform::LinkedIn
    }

    async fn fetch_posts(
        &self,
    ) -> Result<Vec<SocialPostEntity>, SocialMediaError> {
        let (Some(access_token), Some(organization_id)) =
            (&self.access_token, &self.organization_id)
        else {
            return Err(SocialMediaError::MissingCredentials {
                platform: self.platform(),
            });
        };

        // Rest.li expects literal list parens around an encoded URN.
        let urn = format!("urn:li:organization:{}", organization_id);
        let path =
            format!("ugcPosts?authors=List({})", urlencoding::encode(&urn));

        let limit = self.limit.to_string();
        let response = self
            .client
            .get::<UgcPostsResponse, _>(
                &path,
                &[("q", "authors"), ("count", limit.as_str())],
                Some(access_token.as_str()),
            )
            .await?;

        Ok(response.elements.into_iter().map(into_entity).collect())
    }
}

fn into_entity(post: UgcPost) -> SocialPostEntity {
    let share_content = post
        .specific_content
        .and_then(|content| content.share_content);

    let image = share_content
        .as_ref()
        .and_then(|share| share.media.first())
        .and_then(|media| media.thumbnails.first())
        .and_then(|thumbnail| thumbnail.url.clone());

    let content = post
        .commentary
        .or_else(|| {
            share_content
                .and_then(|share| share.share_commentary)
                .and_then(|commentary| commentary.text)
        })
        .unwrap_or_default();

    let timestamp = post
        .created
        .and_then(|created| created.time)
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .unwrap_or_else(Utc::now);

    SocialPostEntity {
        id: Platform::LinkedIn.post_id(&post.id),
        platform: Platform::LinkedIn,
        content,
        image,
        url: format!("https://www.linkedin.com/feed/update/{}", post.id),
        likes: post.num_likes,
        comments: post.num_comments,
        shares: None,
        timestamp,
        author: None,
    }
}
