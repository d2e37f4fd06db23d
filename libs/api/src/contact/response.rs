use chrono::SecondsFormat;
use entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ContactSubmissionEntity> for ContactSubmission {
    fn from(value: ContactSubmissionEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            phone: value.phone,
            subject: value.subject,
            message: value.message,
            created_at: value
                .created_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            updated_at: value
                .updated_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
