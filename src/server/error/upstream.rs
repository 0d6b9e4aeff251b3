use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::server::error::{error_page, sign_out_response};

/// Non-success response from an upstream REST API.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{api} API {method} {path} responded with {status}")]
pub struct UpstreamError {
    /// Which upstream API answered
    pub api: &'static str,
    pub method: String,
    pub path: String,
    /// HTTP status returned by the upstream API
    pub status: u16,
}

impl UpstreamError {
    pub fn new(api: &'static str, method: &str, path: &str, status: u16) -> Self {
        Self {
            api,
            method: method.to_string(),
            path: path.to_string(),
            status,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// Converts upstream failures into HTTP responses.
///
/// # Returns
/// - 401 Unauthorized with the `SignOut` marker - Upstream 401 or 403
/// - 404 Not Found - Upstream 404
/// - Upstream status - Any other upstream 4xx/5xx; unrecognised codes become 500
impl IntoResponse for UpstreamError {
    fn into_response(self) -> Response {
        match self.status {
            401 | 403 => {
                tracing::info!("{}, signing user out", self);
                sign_out_response()
            }
            404 => error_page(StatusCode::NOT_FOUND, "Not found".to_string(), self.to_string()),
            status => {
                tracing::warn!("{}", self);
                let status = StatusCode::from_u16(status)
                    .ok()
                    .filter(|status| status.is_client_error() || status.is_server_error())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                error_page(status, "Something went wrong".to_string(), self.to_string())
            }
        }
    }
}
