pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_user_table;
mod m20240601_000002_create_contact_submission_table;
mod m20240601_000003_create_static_content_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_user_table::Migration),
            Box::new(
                m20240601_000002_create_contact_submission_table::Migration,
            ),
            Box::new(m20240601_000003_create_static_content_table::Migration),
        ]
    }
}
