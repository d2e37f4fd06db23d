use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection,
    EntityTrait, QueryFilter,
};

use crate::active_models::{prelude::*, *};
use crate::now;
use entity::prelude::*;
use entity::user::hash_password;

#[derive(Clone, Debug)]
pub struct UserRepository {
    db: DatabaseConnection,
    hash_cost: u32,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection, hash_cost: u32) -> Self {
        Self { db, hash_cost }
    }
}

impl From<user::Model> for UserEntity {
    fn from(value: user::Model) -> Self {
        UserEntity {
            id: value.id,
            name: value.name,
            email: value.email,
            password: value.password,
            created_at: value.created_at.and_utc(),
            updated_at: value.updated_at.and_utc(),
        }
    }
}

impl UserRepository {
    pub async fn find_by_id(
        &self,
        id: i32,
    ) -> anyhow::Result<Option<UserEntity>> {
        let user = User::find_by_id(id).one(&self.db).await?;

        Ok(user.map(UserEntity::from))
    }

    pub async fn find_by_email(
        &self,
        email: &str,
    ) -> anyhow::Result<Option<UserEntity>> {
        let user = User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(user.map(UserEntity::from))
    }

    /// Stores a new user, hashing the plain password first.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> anyhow::Result<UserEntity> {
        let hashed = hash_password(password, self.hash_cost)?;
        let now = now();

        let user = user::ActiveModel {
            id: ActiveValue::not_set(),
            name: ActiveValue::set(name.to_string()),
            email: ActiveValue::set(email.to_string()),
            password: ActiveValue::set(hashed),
            created_at: ActiveValue::set(now),
            updated_at: ActiveValue::set(now),
        }
        .insert(&self.db)
        .await?;

        Ok(UserEntity::from(user))
    }
}
