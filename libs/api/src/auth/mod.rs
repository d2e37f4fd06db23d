use std::fmt;

use anyhow::Context;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    Extension, Json,
};
use axum_extra::{
    extract::WithRejection,
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use chrono::{Duration, Utc};
use entity::prelude::*;
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub mod request;
pub mod response;

use self::{
    request::LoginRequest,
    response::{LoginResponse, UserResp, VerifyResponse},
};
use crate::{
    response::{ApiResponse, ErrorResponse, IntoApiResponse},
    ApiError, ApiState,
};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Payload of the admin session token.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user: &UserEntity, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}

/// HS256 signing and verification keys derived from the shared secret.
#[derive(Clone)]
pub struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl fmt::Debug for Keys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keys").finish_non_exhaustive()
    }
}

impl Keys {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    pub fn encode(&self, claims: &Claims) -> anyhow::Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .context("failed to encode token")
    }

    pub fn decode(&self, token: &str) -> anyhow::Result<Claims> {
        let data = decode::<Claims>(
            token,
            &self.decoding,
            &Validation::new(Algorithm::HS256),
        )
        .context("failed to decode token")?;

        Ok(data.claims)
    }
}

/// Rejects requests without a valid bearer token and exposes its claims to
/// the handler.
pub async fn auth(
    State(state): State<ApiState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> ApiResponse<Response> {
    let Some(TypedHeader(Authorization(bearer))) = bearer else {
        return Err(ApiError::AuthError(
            "Authorization header is missing".to_string(),
        ));
    };

    let claims = state.keys.decode(bearer.token()).map_err(|e| {
        warn!(task = "verify token", error = format!("{:#}", e));
        ApiError::AuthError("Invalid or expired token".to_string())
    })?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Log in as an admin
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Issued a session token", body = LoginResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<ApiState>,
    WithRejection(Json(body), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> ApiResponse<Json<LoginResponse>> {
    let user = state
        .repo
        .user
        .find_by_email(&body.email)
        .await
        .into_response("500-001")?;

    let Some(user) = user.filter(|user| user.verify_password(&body.password))
    else {
        return Err(ApiError::AuthError(INVALID_CREDENTIALS.to_string()));
    };

    let claims = Claims::new(&user, state.config.auth.token_ttl());
    let token = state.keys.encode(&claims).into_response("500-002")?;

    info!(task = "login", user_id = user.id);

    Ok(Json(LoginResponse { token }))
}

/// Check the current session token
#[utoipa::path(
    get,
    path = "/api/auth/verify",
    responses(
        (status = 200, description = "Token is valid", body = VerifyResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn verify(
    State(state): State<ApiState>,
    Extension(claims): Extension<Claims>,
) -> ApiResponse<Json<VerifyResponse>> {
    let user = state
        .repo
        .user
        .find_by_id(claims.id)
        .await
        .into_response("500-001")?;

    let Some(user) = user else {
        return Err(ApiError::AuthError("User no longer exists".to_string()));
    };

    Ok(Json(VerifyResponse {
        valid: true,
        user: UserResp::from(user),
    }))
}

#[cfg(test)]
mod test {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use super::*;
    use crate::testing::{bearer_for, send, TestApp};

    #[tokio::test]
    async fn test_login() {
        // Arrange
        let app = TestApp::new().await;
        app.create_admin().await;

        // Act
        let (status, body) = send(
            &app.router(),
            Method::POST,
            "/api/auth/login",
            Some(json!({
                "email": "admin@palaceschool.edu",
                "password": "admin123"
            })),
            None,
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        let token = body["token"].as_str().unwrap();
        let claims = app.state.keys.decode(token).unwrap();
        assert_eq!(claims.email, "admin@palaceschool.edu");
        assert_eq!(claims.name, "Admin User");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[tokio::test]
    async fn test_login_with_wrong_password() {
        // Arrange
        let app = TestApp::new().await;
        app.create_admin().await;

        // Act
        let (status, body) = send(
            &app.router(),
            Method::POST,
            "/api/auth/login",
            Some(json!({
                "email": "admin@palaceschool.edu",
                "password": "admin124"
            })),
            None,
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], INVALID_CREDENTIALS);
        assert!(body.get("token").is_none());
    }

    #[tokio::test]
    async fn test_login_with_unknown_email() {
        let app = TestApp::new().await;

        let (status, body) = send(
            &app.router(),
            Method::POST,
            "/api/auth/login",
            Some(json!({ "email": "nobody@example.com", "password": "x" })),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn test_login_with_malformed_body() {
        let app = TestApp::new().await;

        let (status, _) = send(
            &app.router(),
            Method::POST,
            "/api/auth/login",
            Some(json!({ "email": "admin@palaceschool.edu" })),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_verify() {
        // Arrange
        let app = TestApp::new().await;
        let user = app.create_admin().await;
        let token = bearer_for(&app, &user);

        // Act
        let (status, body) = send(
            &app.router(),
            Method::GET,
            "/api/auth/verify",
            None,
            Some(&token),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], true);
        assert_eq!(body["user"]["email"], "admin@palaceschool.edu");
        assert_eq!(body["user"]["id"], user.id);
    }

    #[tokio::test]
    async fn test_verify_rejects_bad_tokens() {
        // Arrange
        let app = TestApp::new().await;
        let user = app.create_admin().await;
        let expired = app
            .state
            .keys
            .encode(&Claims::new(&user, Duration::hours(-2)))
            .unwrap();
        let foreign = Keys::new(b"another secret")
            .encode(&Claims::new(&user, Duration::hours(1)))
            .unwrap();

        // Act
        let mut statuses = vec![];
        for token in [
            None,
            Some("garbage"),
            Some(expired.as_str()),
            Some(foreign.as_str()),
        ] {
            let (status, body) = send(
                &app.router(),
                Method::GET,
                "/api/auth/verify",
                None,
                token.map(|t| format!("Bearer {}", t)).as_deref(),
            )
            .await;
            assert!(body["message"].is_string());
            statuses.push(status);
        }

        // Assert
        assert!(statuses.iter().all(|s| *s == StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn test_keys_round_trip() {
        let keys = Keys::new(b"secret");
        let user = UserEntity {
            id: 7,
            name: "Admin User".to_string(),
            email: "admin@palaceschool.edu".to_string(),
            ..Default::default()
        };
        let claims = Claims::new(&user, Duration::hours(1));

        let decoded = keys.decode(&keys.encode(&claims).unwrap()).unwrap();

        assert_eq!(decoded, claims);
    }
}
