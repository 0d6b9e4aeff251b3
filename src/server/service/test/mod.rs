use std::sync::{Arc, Mutex};

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::Value;
use test_utils::{builder::TestBuilder, context::TestContext, fixture};
use url::Url;

use crate::server::{
    config::Config,
    error::AppError,
    model::user::AuthenticatedUser,
    state::ApiUrls,
};

mod allocation;
mod appointment;

fn user() -> AuthenticatedUser {
    AuthenticatedUser {
        username: fixture::users::DEFAULT_USERNAME.to_string(),
        display_name: "John Smith".to_string(),
        active_case_load_id: fixture::activities::DEFAULT_PRISON_CODE.to_string(),
        token: fixture::users::DEFAULT_TOKEN.to_string(),
    }
}

fn api_urls(test: &TestContext) -> ApiUrls {
    ApiUrls {
        activities: Url::parse(&test.activities_api_url()).unwrap(),
        prison: Url::parse(&test.prison_api_url()).unwrap(),
        manage_users: Url::parse(&test.manage_users_api_url()).unwrap(),
    }
}

fn config(test: &TestContext) -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        port: 3000,
        ingress_url: Url::parse("http://localhost:3000").unwrap(),
        production: false,
        session_expiry_minutes: 120,
        hmpps_auth_url: Url::parse(&format!("{}/auth", test.auth_url())).unwrap(),
        api_client_id: "activities-ui".to_string(),
        api_client_secret: "secret".to_string(),
        activities_api_url: Url::parse(&test.activities_api_url()).unwrap(),
        prison_api_url: Url::parse(&test.prison_api_url()).unwrap(),
        manage_users_api_url: Url::parse(&test.manage_users_api_url()).unwrap(),
        api_timeout_seconds: 5,
    }
}

/// Prison API knowing `A1234BC` (John Smith, booking 1, Standard) and
/// `B2345CD` (Jane Doe, booking 2, Basic).
fn prison_api() -> Router {
    Router::new()
        .route(
            "/api/bookings/offenderNo/{number}",
            get(|Path(number): Path<String>| async move {
                match number.as_str() {
                    "A1234BC" => {
                        Json(fixture::prison::inmate_detail("A1234BC", 1, "John", "Smith"))
                            .into_response()
                    }
                    "B2345CD" => {
                        Json(fixture::prison::inmate_detail("B2345CD", 2, "Jane", "Doe"))
                            .into_response()
                    }
                    _ => StatusCode::NOT_FOUND.into_response(),
                }
            }),
        )
        .route(
            "/api/bookings/{booking_id}/iepSummary",
            get(|Path(booking_id): Path<i64>| async move {
                let level = if booking_id == 1 { "Standard" } else { "Basic" };
                Json(fixture::prison::iep_summary(level))
            }),
        )
}

/// Records the JSON body of the last request a mock handler received.
#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Option<Value>>>);

impl Recorder {
    fn record(&self, body: Value) {
        *self.0.lock().unwrap() = Some(body);
    }

    fn last(&self) -> Option<Value> {
        self.0.lock().unwrap().clone()
    }
}

fn not_found() -> Response {
    StatusCode::NOT_FOUND.into_response()
}
