use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UgcPostsResponse {
    #[serde(default)]
    pub elements: Vec<UgcPost>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UgcPost {
    pub id: String,
    pub commentary: Option<String>,
    pub specific_content: Option<SpecificContent>,
    pub created: Option<AuditStamp>,
    pub num_likes: Option<u64>,
    pub num_comments: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct SpecificContent {
    #[serde(rename = "com.linkedin.ugc.ShareContent")]
    pub share_content: Option<ShareContent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareContent {
    pub share_commentary: Option<Text>,
    #[serde(default)]
    pub media: Vec<Media>,
}

#[derive(Debug, Deserialize)]
pub struct Text {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Media {
    #[serde(default)]
    pub thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub url: Option<String>,
}

/// epoch milliseconds
#[derive(Debug, Deserialize)]
pub struct AuditStamp {
    pub time: Option<i64>,
}
