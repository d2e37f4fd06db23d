use async_trait::async_trait;
use entity::prelude::*;
use tracing::warn;

use self::response::{Media, MediaResponse};
use crate::{
    aggregator::PostSource, platforms::parse_timestamp, Client,
    SocialMediaError,
};

mod response;

const FIELDS: &str =
    "id,caption,media_type,media_url,permalink,timestamp,like_count,comments_count";

/// Business account media from the Graph API. Videos and reels are skipped.
#[derive(Debug)]
pub struct Instagram {
    client: Client,
    account_id: Option<String>,
    access_token: Option<String>,
    limit: u32,
}

impl Instagram {
    pub fn new(
        client: Client,
        account_id: Option<String>,
        access_token: Option<String>,
        limit: u32,
    ) -> Self {
        Self {
            client,
            account_id,
            access_token,
            limit,
        }
    }
}

#[async_trait]
impl PostSource for Instagram {
    fn platform(&self) -> Platform {
        Platform::Instagram
    }

    async fn fetch_posts(
        &self,
    ) -> Result<Vec<SocialPostEntity>, SocialMediaError> {
        let (Some(account_id), Some(access_token)) =
            (&self.account_id, &self.access_token)
        else {
            return Err(SocialMediaError::MissingCredentials {
                platform: self.platform(),
            });
        };

        let limit = self.limit.to_string();
        let response = self
            .client
            .get::<MediaResponse, _>(
                &format!("{}/media", account_id),
                &[
                    ("fields", FIELDS),
                    ("limit", limit.as_str()),
                    ("access_token", access_token.as_str()),
                ],
                None,
            )
            .await?;

        Ok(response
            .data
            .into_iter()
            .filter(|media| media.media_type.is_still())
            .filter_map(into_entity)
            .collect())
    }
}

fn into_entity(media: Media) -> Option<SocialPostEntity> {
    let Some(url) = media.permalink else {
        warn!(
            task = "map instagram media",
            id = media.id.as_str(),
            error = "missing permalink",
        );
        return None;
    };

    let Some(timestamp) = media.timestamp.as_deref().and_then(parse_timestamp)
    else {
        warn!(
            task = "map instagram media",
            id = media.id.as_str(),
            timestamp = media.timestamp.as_deref().unwrap_or_default(),
        );
        return None;
    };

    Some(SocialPostEntity {
        id: Platform::Instagram.post_id(&media.id),
        platform: Platform::Instagram,
        content: media.caption.unwrap_or_default(),
        image: media.media_url,
        url,
        likes: media.like_count,
        comments: media.comments_count,
        shares: None,
        timestamp,
        author: None,
    })
}
