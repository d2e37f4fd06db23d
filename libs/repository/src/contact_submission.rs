use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait,
    QueryOrder, QuerySelect,
};

use crate::active_models::{prelude::*, *};
use crate::now;
use entity::prelude::*;

#[derive(Clone, Debug)]
pub struct ContactSubmissionRepository {
    db: DatabaseConnection,
}

impl ContactSubmissionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<contact_submission::Model> for ContactSubmissionEntity {
    fn from(value: contact_submission::Model) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            phone: value.phone,
            subject: value.subject,
            message: value.message,
            created_at: value.created_at.and_utc(),
            updated_at: value.updated_at.and_utc(),
        }
    }
}

impl From<ContactSubmissionEntity> for contact_submission::ActiveModel {
    fn from(value: ContactSubmissionEntity) -> Self {
        Self {
            id: if value.id == i32::default() {
                ActiveValue::not_set()
            } else {
                ActiveValue::set(value.id)
            },
            name: ActiveValue::set(value.name),
            email: ActiveValue::set(value.email),
            phone: ActiveValue::set(value.phone),
            subject: ActiveValue::set(value.subject),
            message: ActiveValue::set(value.message),
            created_at: ActiveValue::set(value.created_at.naive_utc()),
            updated_at: ActiveValue::set(value.updated_at.naive_utc()),
        }
    }
}

impl ContactSubmissionRepository {
    /// Newest first, at most `limit` rows.
    pub async fn find_latest(
        &self,
        limit: u64,
    ) -> anyhow::Result<Vec<ContactSubmissionEntity>> {
        let submissions = ContactSubmission::find()
            .order_by_desc(contact_submission::Column::CreatedAt)
            .order_by_desc(contact_submission::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(submissions
            .into_iter()
            .map(ContactSubmissionEntity::from)
            .collect())
    }

    /// Inserts the submission stamped with the current time and returns the
    /// stored row.
    pub async fn save(
        &self,
        submission: ContactSubmissionEntity,
    ) -> anyhow::Result<ContactSubmissionEntity> {
        let now = now();
        let mut model = contact_submission::ActiveModel::from(submission);
        model.id = ActiveValue::not_set();
        model.created_at = ActiveValue::set(now);
        model.updated_at = ActiveValue::set(now);

        let saved = model.insert(&self.db).await?;

        Ok(ContactSubmissionEntity::from(saved))
    }
}
