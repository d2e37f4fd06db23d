use serde::Deserialize;

/// `data` is absent when the account has no tweets in range.
#[derive(Debug, Deserialize)]
pub struct TweetsResponse {
    #[serde(default)]
    pub data: Vec<Tweet>,
    pub includes: Option<Includes>,
}

#[derive(Debug, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub text: String,
    pub created_at: String,
    pub public_metrics: Option<PublicMetrics>,
    pub attachments: Option<Attachments>,
}

#[derive(Debug, Deserialize)]
pub struct PublicMetrics {
    pub like_count: Option<u64>,
    pub reply_count: Option<u64>,
    pub retweet_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct Attachments {
    #[serde(default)]
    pub media_keys: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct Includes {
    #[serde(default)]
    pub media: Vec<Media>,
}

#[derive(Debug, Deserialize)]
pub struct Media {
    pub media_key: String,
    pub url: Option<String>,
}
