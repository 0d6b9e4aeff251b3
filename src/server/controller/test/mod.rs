use axum::{
    body::Body,
    extract::Path,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::{Duration, NaiveDate};
use serde_json::Value;
use test_utils::{builder::TestBuilder, context::TestContext, fixture};
use tower::ServiceExt;
use tower_sessions::SessionManagerLayer;
use url::Url;

use crate::server::{config::Config, error::AppError, router::router, startup::build_state};

mod allocation;
mod auth;

/// Router under test plus the browser's session cookie.
///
/// Every response's `Set-Cookie` replaces the stored cookie so requests behave
/// like one browser session.
struct TestApp {
    router: Router,
    cookie: Option<String>,
}

impl TestApp {
    async fn new(test: &mut TestContext) -> Self {
        let state = build_state(&config(test)).unwrap();
        let store = test.session_store().await.unwrap();
        let session = SessionManagerLayer::new(store).with_secure(false);

        Self {
            router: router(state, session),
            cookie: None,
        }
    }

    async fn send(&mut self, mut request: Request<Body>) -> Response {
        if let Some(cookie) = &self.cookie {
            request
                .headers_mut()
                .insert(header::COOKIE, cookie.parse().unwrap());
        }

        let response = self.router.clone().oneshot(request).await.unwrap();

        if let Some(cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
        {
            self.cookie = Some(cookie.to_string());
        }

        response
    }

    async fn get(&mut self, uri: &str) -> Response {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn post(&mut self, uri: &str, form: &str) -> Response {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Runs the OAuth sign-in flow against the mock auth server.
    ///
    /// Returns the callback response.
    async fn sign_in(&mut self) -> Response {
        let response = self.get("/sign-in").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let authorize = Url::parse(&location(&response)).unwrap();
        let (_, csrf_state) = authorize
            .query_pairs()
            .find(|(key, _)| key == "state")
            .unwrap();

        self.get(&format!(
            "/sign-in/callback?code=auth-code&state={}",
            csrf_state
        ))
        .await
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

/// Test builder with the auth server and manage users API mocked for sign-in.
fn builder() -> TestBuilder {
    TestBuilder::new()
        .with_auth_server(Router::new().route(
            "/auth/oauth/token",
            post(|| async { Json(fixture::users::token_response(fixture::users::DEFAULT_TOKEN)) }),
        ))
        .with_manage_users_api(Router::new().route(
            "/users/me",
            get(|| async {
                Json(fixture::users::user_me(
                    fixture::users::DEFAULT_USERNAME,
                    "John Smith",
                    Some(fixture::activities::DEFAULT_PRISON_CODE),
                ))
            }),
        ))
}

/// Prison API knowing `A1234BC` (John Smith, Standard) and `B2345CD` (Jane Doe, Basic).
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

fn location(response: &Response) -> String {
    response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string()
}

async fn json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// `dd/mm/yyyy` form value and date `days` from today.
fn days_from_today(days: i64) -> (String, NaiveDate) {
    let date = chrono::Local::now().date_naive() + Duration::days(days);
    (date.format("%d/%m/%Y").to_string(), date)
}
