use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StaticContents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StaticContents::Page)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StaticContents::Content)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StaticContents::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StaticContents::UpdatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StaticContents::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum StaticContents {
    Table,
    Page,
    Content,
    CreatedAt,
    UpdatedAt,
}
