use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use entity::prelude::*;
use tracing::info;
use validator::Validate;

pub mod request;
pub mod response;

use self::{request::CreateContactRequest, response::ContactSubmission};
use crate::{
    response::{ApiResponse, ErrorResponse, IntoApiResponse},
    ApiError, ApiState,
};

/// Submit the contact form
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = CreateContactRequest,
    responses(
        (status = 201, description = "Stored the submission", body = ContactSubmission),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse)
    )
)]
pub async fn create_contact(
    State(state): State<ApiState>,
    WithRejection(Json(body), _): WithRejection<
        Json<CreateContactRequest>,
        ApiError,
    >,
) -> ApiResponse<(StatusCode, Json<ContactSubmission>)> {
    body.validate()
        .map_err(|e| ApiError::ClientError(e.to_string()))?;

    let saved = state
        .repo
        .contact_submission
        .save(ContactSubmissionEntity {
            name: body.name,
            email: body.email,
            phone: body.phone,
            subject: body.subject,
            message: body.message,
            ..Default::default()
        })
        .await
        .into_response("500-003")?;

    info!(task = "create contact submission", id = saved.id);

    Ok((StatusCode::CREATED, Json(ContactSubmission::from(saved))))
}

/// List the latest contact submissions
#[utoipa::path(
    get,
    path = "/api/contact",
    responses(
        (status = 200, description = "Newest submissions first", body = [ContactSubmission]),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn get_contacts(
    State(state): State<ApiState>,
) -> ApiResponse<Json<Vec<ContactSubmission>>> {
    let submissions = state
        .repo
        .contact_submission
        .find_latest(state.config.contact.list_limit)
        .await
        .into_response("500-004")?;

    Ok(Json(
        submissions
            .into_iter()
            .map(ContactSubmission::from)
            .collect(),
    ))
}
