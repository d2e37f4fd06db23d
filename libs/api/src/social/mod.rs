use axum::{extract::State, Json};
use chrono::SecondsFormat;
use tracing::info;

pub mod response;

use self::response::{
    GetPostsResponse, GetStatsResponse, RefreshResponse, SocialMediaStats,
    SocialPost,
};
use crate::ApiState;

/// Recent posts across the school's social accounts
#[utoipa::path(
    get,
    path = "/api/social-media/posts",
    responses(
        (status = 200, description = "Merged posts, newest first", body = GetPostsResponse)
    )
)]
pub async fn get_posts(
    State(state): State<ApiState>,
) -> Json<GetPostsResponse> {
    let snapshot = state.social.posts().await;

    Json(GetPostsResponse {
        success: true,
        data: snapshot.posts.into_iter().map(SocialPost::from).collect(),
        cached: snapshot.cached,
        next_update: snapshot
            .next_update
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true)),
    })
}

/// Audience estimates per platform
#[utoipa::path(
    get,
    path = "/api/social-media/stats",
    responses(
        (status = 200, description = "Configured estimates", body = GetStatsResponse)
    )
)]
pub async fn get_stats(
    State(state): State<ApiState>,
) -> Json<GetStatsResponse> {
    Json(GetStatsResponse {
        success: true,
        data: SocialMediaStats::from(state.social.stats()),
    })
}

/// Drop the cached posts
#[utoipa::path(
    post,
    path = "/api/social-media/refresh",
    responses(
        (status = 200, description = "Cache cleared", body = RefreshResponse)
    )
)]
pub async fn refresh(State(state): State<ApiState>) -> Json<RefreshResponse> {
    state.social.refresh().await;
    info!(task = "clear post cache");

    Json(RefreshResponse {
        success: true,
        message: "Cache cleared. Next request will fetch fresh data."
            .to_string(),
    })
}
