use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use test_utils::builder::TestBuilder;
use tower::ServiceExt;
use tower_sessions::SessionManagerLayer;

use crate::server::error::AppError;


/// Session cookie from a response, ready to send back as a `Cookie` header.
fn session_cookie(response: &axum::response::Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

/// Application state pointing at addresses nothing listens on.
fn test_state(production: bool) -> crate::server::state::AppState {
    use crate::server::{config::Config, startup};
    use url::Url;

    let unreachable = Url::parse("http://127.0.0.1:9").unwrap();
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        port: 3000,
        ingress_url: Url::parse("http://localhost:3000").unwrap(),
        production,
        session_expiry_minutes: 120,
        hmpps_auth_url: unreachable.clone(),
        api_client_id: "client".to_string(),
        api_client_secret: "secret".to_string(),
        activities_api_url: unreachable.clone(),
        prison_api_url: unreachable.clone(),
        manage_users_api_url: unreachable,
        api_timeout_seconds: 5,
    };

    startup::build_state(&config).unwrap()
}
