use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Deserialize, ToSchema, Validate)]
pub struct UpsertContentRequest {
    #[validate(length(min = 1, message = "page is required"))]
    pub page: String,
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
}
