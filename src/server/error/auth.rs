use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::{error_page, sign_out_response};

#[derive(Error, Debug)]
pub enum AuthError {
    /// No signed-in user in the session.
    ///
    /// Results in a sign-out redirect to `/sign-in`.
    #[error("No signed-in user in session")]
    UserNotInSession,

    /// CSRF state validation failed during the sign-in callback.
    ///
    /// The state token in the callback URL does not match the token stored in
    /// the session. Results in a 400 Bad Request response.
    #[error("Failed to sign in user due to CSRF state mismatch")]
    CsrfValidationFailed,

    /// Authorization code exchange with the auth server failed.
    #[error("Failed to exchange authorization code: {0}")]
    TokenExchange(String),

    /// The user has no active caseload so cannot work in any prison.
    #[error("User {0} has no active caseload")]
    NoActiveCaseload(String),
}

/// Converts authentication errors into HTTP responses.
///
/// # Returns
/// - 401 Unauthorized with the `SignOut` marker - For `UserNotInSession`
/// - 400 Bad Request - For `CsrfValidationFailed`
/// - 403 Forbidden - For `NoActiveCaseload`
/// - 500 Internal Server Error - For `TokenExchange`
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let stack = self.to_string();
        match self {
            Self::UserNotInSession => sign_out_response(),
            Self::CsrfValidationFailed => error_page(
                StatusCode::BAD_REQUEST,
                "There was an issue signing you in, please try again.".to_string(),
                stack,
            ),
            Self::NoActiveCaseload(_) => error_page(
                StatusCode::FORBIDDEN,
                "You do not have access to a prison. Contact your local system administrator."
                    .to_string(),
                stack,
            ),
            Self::TokenExchange(_) => {
                dioxus_logger::tracing::error!("{}", stack);
                error_page(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "There was an issue signing you in, please try again.".to_string(),
                    stack,
                )
            }
        }
    }
}
