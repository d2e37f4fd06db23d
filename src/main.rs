use api::init_config;
use repository::{init_repository, RepositoryOptions};
use shuttle_runtime::{Error, SecretStore, Secrets};
use social_media::Credentials;
use util::load_config;

#[shuttle_runtime::main]
async fn main(
    #[Secrets] secret_store: SecretStore,
    #[shuttle_shared_db::Postgres(local_uri = "{secrets.LOCAL_DATABASE_URL}")]
    conn_string: String,
) -> shuttle_axum::ShuttleAxum {
    if secret_store.get("ENV").is_some_and(|env| env != "prod") {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .init();
    }

    let secret = |key: &str| {
        secret_store
            .get(key)
            .or_else(|| std::env::var(key).ok())
            .filter(|value| !value.trim().is_empty())
    };

    let Some(jwt_secret) = secret("JWT_SECRET") else {
        return Err(Error::BuildPanic("JWT_SECRET was not found".to_string()));
    };

    let config_suffix = secret("CONFIG").unwrap_or_default();
    let config = load_config(&format!("Config{}.toml", config_suffix))
        .map_err(|e| Error::BuildPanic(e.to_string()))?;
    let api_config =
        init_config(&config).map_err(|e| Error::BuildPanic(e.to_string()))?;

    let repository = init_repository(
        &conn_string,
        RepositoryOptions {
            password_hash_cost: api_config.auth.password_hash_cost,
        },
    )
    .await
    .map_err(|e| Error::BuildPanic(e.to_string()))?;

    let social_media =
        social_media::serve(&config, Credentials::from_lookup(secret))
            .map_err(|e| Error::BuildPanic(e.to_string()))?;

    let router = api::serve(repository, social_media, &jwt_secret, &config)
        .map_err(|e| Error::BuildPanic(e.to_string()))?;

    Ok(router.into())
}
