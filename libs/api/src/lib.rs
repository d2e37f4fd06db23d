use anyhow::Context;
use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use repository::Repository;
use serde::Deserialize;
use social_media::SocialMedia;
use toml::{map::Map, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;
use utoipauto::utoipauto;

use crate::auth::Keys;

pub mod auth;
pub mod contact;
pub mod content;
pub mod healthz;
pub mod not_found;
mod response;
pub mod social;
#[cfg(test)]
mod testing;

pub enum ApiError {
    AuthError(String),
    ClientError(String),
    NotFound(String),
    ServerError(String),
}

#[derive(Clone, Debug)]
pub struct ApiState {
    repo: Repository,
    social: SocialMedia,
    config: Config,
    keys: Keys,
}

impl ApiState {
    pub fn new(
        repo: Repository,
        social: SocialMedia,
        config: Config,
        jwt_secret: &str,
    ) -> Self {
        Self {
            repo,
            social,
            config,
            keys: Keys::new(jwt_secret.as_bytes()),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub auth: AuthConfig,
    pub contact: ContactConfig,
    pub cors: CorsConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AuthConfig {
    pub token_ttl_secs: i64,
    /// bcrypt cost for newly stored passwords
    pub password_hash_cost: u32,
}

impl AuthConfig {
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.token_ttl_secs)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ContactConfig {
    pub list_limit: u64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CorsConfig {
    pub origins: Vec<String>,
}

pub fn init_config(config: &Map<String, Value>) -> anyhow::Result<Config> {
    Value::Table(config.clone())
        .try_into::<Config>()
        .context("failed to parse api config")
}

pub fn serve(
    repository: Repository,
    social_media: SocialMedia,
    jwt_secret: &str,
    config: &Map<String, Value>,
) -> anyhow::Result<Router> {
    info!(task = "start api serving");

    let config = init_config(config)?;
    let cors = cors_layer(&config.cors)?;
    let state = ApiState::new(repository, social_media, config, jwt_secret);

    Ok(router(state).layer(cors))
}

pub fn router(state: ApiState) -> Router {
    #[utoipauto(paths = "./libs/api/src")]
    #[derive(OpenApi)]
    #[openapi(
        modifiers(&SecurityAddon),
        tags(
            (name = "palace", description = "The Palace School website API")
        )
    )]
    struct ApiDoc;

    // auth
    let auth_router = Router::new()
        .route("/login", post(auth::login))
        .route(
            "/verify",
            get(auth::verify).route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth::auth,
            )),
        )
        .with_state(state.clone());

    // contact
    let contact_router = Router::new()
        .route(
            "/",
            post(contact::create_contact).merge(
                get(contact::get_contacts).route_layer(
                    middleware::from_fn_with_state(state.clone(), auth::auth),
                ),
            ),
        )
        .with_state(state.clone());

    // content
    let content_router = Router::new()
        .route(
            "/",
            get(content::get_contents).merge(
                post(content::upsert_content).route_layer(
                    middleware::from_fn_with_state(state.clone(), auth::auth),
                ),
            ),
        )
        .route("/:page", get(content::get_content))
        .with_state(state.clone());

    // social media
    let social_media_router = Router::new()
        .route("/posts", get(social::get_posts))
        .route("/stats", get(social::get_stats))
        .route("/refresh", post(social::refresh))
        .with_state(state);

    Router::new()
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .route("/", get(healthz::get_root))
        .route("/healthz", get(healthz::get_health))
        .nest("/api/auth", auth_router)
        .nest("/api/contact", contact_router)
        .nest("/api/content", content_router)
        .nest("/api/social-media", social_media_router)
        .fallback(not_found::get_404)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &CorsConfig) -> anyhow::Result<CorsLayer> {
    let origins = config
        .origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("invalid cors origin {}", origin))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]))
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
