use chrono::SecondsFormat;
use entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaticContent {
    pub page: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<StaticContentEntity> for StaticContent {
    fn from(value: StaticContentEntity) -> Self {
        Self {
            page: value.page,
            content: value.content,
            created_at: value
                .created_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            updated_at: value
                .updated_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
