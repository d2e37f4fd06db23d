use entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Serialize, ToSchema)]
pub struct VerifyResponse {
    pub valid: bool,
    pub user: UserResp,
}

#[derive(Serialize, ToSchema)]
pub struct UserResp {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<UserEntity> for UserResp {
    fn from(value: UserEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
        }
    }
}
