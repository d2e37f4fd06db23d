use anyhow::Context as _;
use sea_orm::{
    sea_query, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::active_models::{prelude::*, *};
use crate::now;
use entity::prelude::*;

use self::static_content::Column;

#[derive(Clone, Debug)]
pub struct StaticContentRepository {
    db: DatabaseConnection,
}

impl StaticContentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<static_content::Model> for StaticContentEntity {
    fn from(value: static_content::Model) -> Self {
        Self {
            page: value.page,
            content: value.content,
            created_at: value.created_at.and_utc(),
            updated_at: value.updated_at.and_utc(),
        }
    }
}

impl StaticContentRepository {
    /// All blocks ordered by page key.
    pub async fn find_all(&self) -> anyhow::Result<Vec<StaticContentEntity>> {
        let contents = StaticContent::find()
            .order_by_asc(Column::Page)
            .all(&self.db)
            .await?;

        Ok(contents.into_iter().map(StaticContentEntity::from).collect())
    }

    pub async fn find_by_page(
        &self,
        page: &str,
    ) -> anyhow::Result<Option<StaticContentEntity>> {
        let content = StaticContent::find()
            .filter(Column::Page.eq(page))
            .one(&self.db)
            .await?;

        Ok(content.map(StaticContentEntity::from))
    }

    /// Creates the block for `page` or replaces its content in place. The
    /// creation time of an existing block is kept.
    pub async fn save(
        &self,
        page: &str,
        content: &str,
    ) -> anyhow::Result<StaticContentEntity> {
        let now = now();
        let model = static_content::ActiveModel {
            page: ActiveValue::set(page.to_string()),
            content: ActiveValue::set(content.to_string()),
            created_at: ActiveValue::set(now),
            updated_at: ActiveValue::set(now),
        };

        let _ = StaticContent::insert(model)
            .on_conflict(
                sea_query::OnConflict::column(Column::Page)
                    .update_columns([Column::Content, Column::UpdatedAt])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;

        self.find_by_page(page)
            .await?
            .with_context(|| format!("static content {} vanished after save", page))
    }
}
