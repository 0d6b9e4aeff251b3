use axum::{extract::Request, middleware::Next, response::Response};
use tower_sessions::Session;

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::user::AuthenticatedUser,
};

pub struct AuthGuard<'a> {
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Returns the signed-in user.
    ///
    /// # Returns
    /// - `Ok(AuthenticatedUser)` - A user is signed in
    /// - `Err(AppError::AuthErr(AuthError::UserNotInSession))` - Nobody is signed in
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn require(&self) -> Result<AuthenticatedUser, AppError> {
        let Some(user) = AuthSession::new(self.session).get_user().await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        Ok(user)
    }
}

/// Rejects requests without a signed-in user and attaches the user to the
/// request extensions for handlers to extract with `Extension<AuthenticatedUser>`.
pub async fn require_sign_in(
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = AuthGuard::new(&session).require().await?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
