use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct MediaResponse {
    #[serde(default)]
    pub data: Vec<Media>,
}

#[derive(Debug, Deserialize)]
pub struct Media {
    pub id: String,
    pub caption: Option<String>,
    #[serde(default)]
    pub media_type: MediaType,
    pub media_url: Option<String>,
    /// absent on media hidden for copyright reasons
    pub permalink: Option<String>,
    pub timestamp: Option<String>,
    pub like_count: Option<u64>,
    pub comments_count: Option<u64>,
}

#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaType {
    Image,
    CarouselAlbum,
    Video,
    #[default]
    #[serde(other)]
    Other,
}

impl MediaType {
    pub fn is_still(&self) -> bool {
        matches!(self, MediaType::Image | MediaType::CarouselAlbum)
    }
}
