//! Error types and HTTP response handling.
//!
//! `AppError` is the top-level error returned by every handler. Its
//! `IntoResponse` implementation produces a plain JSON body and attaches one of
//! the marker extensions below; the terminal `handle_errors` middleware reads
//! the marker and produces the final response (flash + redirect, sign-out, or
//! the error view).

pub mod auth;
pub mod config;
pub mod upstream;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::{
        error::{auth::AuthError, config::ConfigError, upstream::UpstreamError},
        model::form::ValidationErrors,
    },
};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application and provides
/// automatic conversion to HTTP responses. Most variants use `#[from]` for automatic
/// error conversion.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication error.
    ///
    /// Missing sign-in results in a sign-out redirect; other variants render the
    /// error view.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Non-success response from an upstream API.
    ///
    /// 401/403 force a sign-out; any other status is passed through to the
    /// error view.
    #[error(transparent)]
    UpstreamErr(#[from] UpstreamError),

    /// Field-level failures detected by a handler after the form parsed.
    ///
    /// Flashed to the session and redirected back to the form.
    #[error("{0}")]
    Validation(ValidationErrors),

    /// The journey addressed by the request path holds no state for this
    /// journey type, e.g. it was evicted or already submitted.
    #[error("Journey {0} has no state for this step")]
    JourneyNotFound(String),

    /// Database error from the session store connection.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Session store operation error.
    #[error(transparent)]
    SessionErr(#[from] tower_sessions::session::Error),

    /// Transport error talking to an upstream API.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    #[error(transparent)]
    UrlErr(#[from] url::ParseError),

    #[error(transparent)]
    SerdeErr(#[from] serde_json::Error),

    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Resource not found error.
    ///
    /// Results in 404 Not Found with the provided error message.
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error.
    ///
    /// Results in 400 Bad Request with the provided error message.
    #[error("{0}")]
    BadRequest(String),

    /// Internal server error with custom message.
    ///
    /// Results in 500 Internal Server Error. The provided message is logged
    /// but a generic message is returned to the client.
    #[error("{0}")]
    InternalError(String),
}

/// Response marker: render the error view with this status and message.
///
/// `stack` is the error's display chain; the middleware drops it in production.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorPage {
    pub status: StatusCode,
    pub message: String,
    pub stack: String,
}

/// Response marker: clear the session and send the user to sign in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignOut;

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 303 See Other - `JourneyNotFound`, back to the home page
/// - 400 Bad Request - `Validation` (with `ValidationErrors` marker) and `BadRequest`
/// - 401 Unauthorized - Missing sign-in and upstream 401/403 (with `SignOut` marker)
/// - 404 Not Found - For `NotFound` variant
/// - Upstream status - Other upstream failures
/// - 500 Internal Server Error - For all other error types
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::UpstreamErr(err) => err.into_response(),
            Self::Validation(errors) => {
                let mut response = (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorDto {
                        error: errors.to_string(),
                    }),
                )
                    .into_response();
                response.extensions_mut().insert(errors);
                response
            }
            Self::JourneyNotFound(journey_id) => {
                tracing::debug!("No journey state for {}, returning home", journey_id);
                Redirect::to("/").into_response()
            }
            Self::NotFound(msg) => error_page(StatusCode::NOT_FOUND, msg.clone(), msg),
            Self::BadRequest(msg) => error_page(StatusCode::BAD_REQUEST, msg.clone(), msg),
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                error_page(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    msg,
                )
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Builds a JSON error response carrying the `ErrorPage` marker.
pub fn error_page(status: StatusCode, message: String, stack: String) -> Response {
    let mut response = (
        status,
        Json(ErrorDto {
            error: message.clone(),
        }),
    )
        .into_response();
    response.extensions_mut().insert(ErrorPage {
        status,
        message,
        stack,
    });
    response
}

/// Builds a 401 response carrying the `SignOut` marker.
pub fn sign_out_response() -> Response {
    let mut response = (
        StatusCode::UNAUTHORIZED,
        Json(ErrorDto {
            error: "Sign in required".to_string(),
        }),
    )
        .into_response();
    response.extensions_mut().insert(SignOut);
    response
}

/// Joins an error and its sources into one line per cause.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut chain = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        chain.push_str("\ncaused by: ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}

/// Wrapper type for converting any error into a 500 Internal Server Error response.
///
/// Logs the error and returns a generic "Internal server error" message to the
/// client. The full chain travels in the `ErrorPage` marker.
pub struct InternalServerError<E>(pub E);

impl<E: std::error::Error> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        let stack = error_chain(&self.0);
        tracing::error!("{}", stack);

        error_page(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
            stack,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_carries_field_errors() {
        let errors = ValidationErrors::single("categoryCode", "Select a category");
        let response = AppError::Validation(errors.clone()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.extensions().get::<ValidationErrors>(), Some(&errors));
    }

    #[test]
    fn upstream_unauthorised_signs_out() {
        let response = AppError::from(UpstreamError::new("Activities", "GET", "/schedules/1", 403))
            .into_response();

        assert!(response.extensions().get::<SignOut>().is_some());
    }

    #[test]
    fn upstream_status_is_passed_through() {
        let response = AppError::from(UpstreamError::new("Prison", "GET", "/api/bookings", 404))
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let page = response.extensions().get::<ErrorPage>().unwrap();
        assert_eq!(page.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn unexpected_errors_are_generic() {
        let err = serde_json::from_str::<u32>("x").unwrap_err();
        let response = AppError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let page = response.extensions().get::<ErrorPage>().unwrap();
        assert_eq!(page.message, "Internal server error");
        assert!(!page.stack.is_empty());
    }

    #[test]
    fn missing_journey_returns_home() {
        let response = AppError::JourneyNotFound("J1".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/");
    }
}
