use chrono::{NaiveDateTime, SubsecRound, Utc};
use contact_submission::ContactSubmissionRepository;
use entity::user::DEFAULT_HASH_COST;
use migration::Migrator;
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use static_content::StaticContentRepository;
use user::UserRepository;

pub use sea_orm::ConnectOptions;

mod active_models;
pub mod contact_submission;
mod response;
pub mod static_content;
pub mod user;

use response::{IntoResponse, Response};

#[derive(Clone, Debug)]
pub struct Repository {
    pub user: UserRepository,
    pub contact_submission: ContactSubmissionRepository,
    pub static_content: StaticContentRepository,
}

#[derive(Clone, Copy, Debug)]
pub struct RepositoryOptions {
    /// bcrypt cost applied when storing new passwords
    pub password_hash_cost: u32,
}

impl Default for RepositoryOptions {
    fn default() -> Self {
        Self {
            password_hash_cost: DEFAULT_HASH_COST,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error(
        "in sea-orm crate from unsuccessful database operations: {}: {}",
        message,
        source
    )]
    InSeaOrmDbErr {
        message: String,
        source: sea_orm::DbErr,
    },
}

pub async fn init_repository(
    db_url: &str,
    options: RepositoryOptions,
) -> Response<Repository> {
    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(5)
        .min_connections(1)
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    init_repository_with(opt, options).await
}

pub async fn init_repository_with(
    opt: ConnectOptions,
    options: RepositoryOptions,
) -> Response<Repository> {
    let db = init_db(opt).await?;

    let repository = Repository {
        user: UserRepository::new(db.clone(), options.password_hash_cost),
        contact_submission: ContactSubmissionRepository::new(db.clone()),
        static_content: StaticContentRepository::new(db),
    };

    Ok(repository)
}

async fn init_db(opt: ConnectOptions) -> Response<DatabaseConnection> {
    let db = Database::connect(opt)
        .await
        .into_response("in database connect")?;

    Migrator::up(&db, None)
        .await
        .into_response("in migrator up")?;

    Ok(db)
}

/// Current time at millisecond precision so values read back from any
/// backend compare equal to what was written.
pub(crate) fn now() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(3)
}

#[cfg(test)]
pub(crate) async fn test_repository() -> Repository {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);

    init_repository_with(
        opt,
        RepositoryOptions {
            password_hash_cost: 4,
        },
    )
    .await
    .unwrap()
}
