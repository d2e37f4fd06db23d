use std::net::{Ipv4Addr, SocketAddr};

use anyhow::Context;
use api::{init_config, serve};
use repository::{init_repository, RepositoryOptions};
use social_media::Credentials;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use util::{load_config, load_env, secret};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let secrets = load_env("Secrets.dev.toml")?;

    let config_suffix = secret(&secrets, "CONFIG").unwrap_or_default();
    let config = load_config(&format!("Config{}.toml", config_suffix))?;
    let api_config = init_config(&config)?;

    let conn_string = secret(&secrets, "LOCAL_DATABASE_URL")
        .context("LOCAL_DATABASE_URL was not found")?;
    let repository = init_repository(
        &conn_string,
        RepositoryOptions {
            password_hash_cost: api_config.auth.password_hash_cost,
        },
    )
    .await?;

    let jwt_secret =
        secret(&secrets, "JWT_SECRET").context("JWT_SECRET was not found")?;

    let credentials =
        Credentials::from_lookup(|key| secret(&secrets, key));
    let social_media = social_media::serve(&config, credentials)?;

    let router = serve(repository, social_media, &jwt_secret, &config)?;

    let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8000));
    let listener = TcpListener::bind(&address).await?;
    Ok(axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?)
}
