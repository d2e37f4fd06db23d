use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PostsResponse {
    #[serde(default)]
    pub data: Vec<Post>,
}

#[derive(Debug, Deserialize)]
pub struct Post {
    pub id: String,
    pub message: Option<String>,
    pub created_time: String,
    pub full_picture: Option<String>,
    pub permalink_url: Option<String>,
    pub likes: Option<Reactions>,
    pub comments: Option<Reactions>,
    pub shares: Option<Shares>,
}

#[derive(Debug, Deserialize)]
pub struct Reactions {
    pub summary: Option<Summary>,
}

#[derive(Debug, Deserialize)]
pub struct Summary {
    pub total_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct Shares {
    pub count: Option<u64>,
}

impl Reactions {
    pub fn total_count(&self) -> Option<u64> {
        self.summary.as_ref().and_then(|s| s.total_count)
    }
}
