use anyhow::Context;
use repository::{init_repository, RepositoryOptions};
use toml::{map::Map, Value};
use tracing::{info, warn};
use util::{load_env, secret};

const DEFAULT_NAME: &str = "Admin User";
const DEFAULT_EMAIL: &str = "admin@palaceschool.edu";
const DEFAULT_PASSWORD: &str = "admin123";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let secrets = load_env("Secrets.dev.toml").unwrap_or_else(|e| {
        warn!(task = "load secrets", error = e.to_string());
        Map::<String, Value>::new()
    });

    let db_url = secret(&secrets, "LOCAL_DATABASE_URL")
        .or_else(|| secret(&secrets, "DATABASE_URL"))
        .context("LOCAL_DATABASE_URL or DATABASE_URL must be set")?;

    let repository =
        init_repository(&db_url, RepositoryOptions::default()).await?;
    info!(task = "connect database");

    let name =
        secret(&secrets, "ADMIN_NAME").unwrap_or(DEFAULT_NAME.to_string());
    let email =
        secret(&secrets, "ADMIN_EMAIL").unwrap_or(DEFAULT_EMAIL.to_string());
    let password = secret(&secrets, "ADMIN_PASSWORD")
        .unwrap_or(DEFAULT_PASSWORD.to_string());

    if repository.user.find_by_email(&email).await?.is_some() {
        info!(
            task = "create admin",
            email = email.as_str(),
            "admin user already exists"
        );
        return Ok(());
    }

    let user = repository
        .user
        .create(&name, &email, &password)
        .await
        .context("failed to create admin user")?;

    info!(
        task = "create admin",
        id = user.id,
        email = user.email.as_str(),
        "admin user created"
    );

    Ok(())
}
