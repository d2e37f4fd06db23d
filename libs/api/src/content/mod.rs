use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use axum_extra::extract::WithRejection;
use tracing::info;
use validator::Validate;

pub mod request;
pub mod response;

use self::{request::UpsertContentRequest, response::StaticContent};
use crate::{
    auth::Claims,
    response::{ApiResponse, ErrorResponse, IntoApiResponse},
    ApiError, ApiState,
};

/// List all content blocks
#[utoipa::path(
    get,
    path = "/api/content",
    responses(
        (status = 200, description = "Blocks ordered by page key", body = [StaticContent])
    )
)]
pub async fn get_contents(
    State(state): State<ApiState>,
) -> ApiResponse<Json<Vec<StaticContent>>> {
    let contents = state
        .repo
        .static_content
        .find_all()
        .await
        .into_response("500-005")?;

    Ok(Json(contents.into_iter().map(StaticContent::from).collect()))
}

/// Get the content block of a page
#[utoipa::path(
    get,
    path = "/api/content/{page}",
    responses(
        (status = 200, description = "Found the block", body = StaticContent),
        (status = 404, description = "No block for this page", body = ErrorResponse)
    ),
    params(
        ("page", description = "page key"),
    )
)]
pub async fn get_content(
    State(state): State<ApiState>,
    Path(page): Path<String>,
) -> ApiResponse<Json<StaticContent>> {
    let content = state
        .repo
        .static_content
        .find_by_page(&page)
        .await
        .into_response("500-005")?;

    let Some(content) = content else {
        return Err(ApiError::NotFound("Content not found".to_string()));
    };

    Ok(Json(StaticContent::from(content)))
}

/// Create or update the content block of a page
#[utoipa::path(
    post,
    path = "/api/content",
    request_body = UpsertContentRequest,
    responses(
        (status = 201, description = "Stored the block", body = StaticContent),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn upsert_content(
    State(state): State<ApiState>,
    Extension(claims): Extension<Claims>,
    WithRejection(Json(body), _): WithRejection<
        Json<UpsertContentRequest>,
        ApiError,
    >,
) -> ApiResponse<(StatusCode, Json<StaticContent>)> {
    body.validate()
        .map_err(|e| ApiError::ClientError(e.to_string()))?;

    let saved = state
        .repo
        .static_content
        .save(&body.page, &body.content)
        .await
        .into_response("500-006")?;

    info!(
        task = "upsert content",
        page = saved.page.as_str(),
        user_id = claims.id,
    );

    Ok((StatusCode::CREATED, Json(StaticContent::from(saved))))
}
