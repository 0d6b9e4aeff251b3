use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    service::auth::AuthService,
    state::AppState,
};

/// Query parameters for the OAuth callback endpoint.
///
/// # Fields
/// - `state` - CSRF protection token that must match the value stored in the session
/// - `code` - Authorization code used to exchange for access tokens
#[derive(Deserialize)]
pub struct CallbackParams {
    /// CSRF state token to be validated against the session value.
    pub state: String,
    /// Authorization code from HMPPS Auth for token exchange.
    pub code: String,
}

pub async fn sign_in(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = AuthService::new(
        &state.http_client,
        &state.oauth_client,
        &state.api_urls.manage_users,
    );

    let (url, csrf_token) = auth_service.login_url();

    AuthSession::new(&session)
        .set_csrf_token(csrf_token.secret().clone())
        .await?;

    Ok(Redirect::to(url.as_str()))
}

pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    params: Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    let auth_session = AuthSession::new(&session);
    let auth_service = AuthService::new(
        &state.http_client,
        &state.oauth_client,
        &state.api_urls.manage_users,
    );

    validate_csrf(&auth_session, &params.0.state).await?;

    let user = auth_service.callback(params.0.code).await?;

    auth_session.cycle_id().await?;
    auth_session.set_user(&user).await?;

    let return_to = auth_session
        .take_return_to()
        .await?
        .filter(|path| is_local_path(path))
        .unwrap_or_else(|| "/".to_string());

    Ok(Redirect::to(&return_to))
}

pub async fn sign_out(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).clear().await;

    Ok(Redirect::to(state.auth_logout_url.as_str()))
}

async fn validate_csrf(auth_session: &AuthSession<'_>, csrf_state: &str) -> Result<(), AppError> {
    if let Some(state) = auth_session.take_csrf_token().await? {
        if state == csrf_state {
            return Ok(());
        }
    }

    Err(AppError::AuthErr(AuthError::CsrfValidationFailed))
}

fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//")
}
