use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContactSubmissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContactSubmissions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ContactSubmissions::Name)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContactSubmissions::Email)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContactSubmissions::Phone).string())
                    .col(ColumnDef::new(ContactSubmissions::Subject).string())
                    .col(
                        ColumnDef::new(ContactSubmissions::Message)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContactSubmissions::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContactSubmissions::UpdatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx-contact_submissions-created_at")
                    .table(ContactSubmissions::Table)
                    .col(ContactSubmissions::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop().table(ContactSubmissions::Table).to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum ContactSubmissions {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Subject,
    Message,
    CreatedAt,
    UpdatedAt,
}
