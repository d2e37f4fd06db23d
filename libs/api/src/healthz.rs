use axum::http::StatusCode;

pub(super) async fn get_root() -> &'static str {
    "Server is running!"
}

pub(super) async fn get_health() -> StatusCode {
    StatusCode::OK
}
