use dioxus_logger::tracing;
use oauth2::{AuthorizationCode, CsrfToken, TokenResponse};
use url::Url;

use crate::server::{
    data::manage_users::ManageUsersApiClient,
    error::{auth::AuthError, AppError},
    model::user::AuthenticatedUser,
    state::OAuth2Client,
};

/// Service for the HMPPS Auth authorization-code sign-in flow.
pub struct AuthService<'a> {
    /// HTTP client for the token exchange and user lookup.
    pub http_client: &'a reqwest::Client,
    /// OAuth2 client configured for HMPPS Auth.
    pub oauth_client: &'a OAuth2Client,
    pub manage_users_url: &'a Url,
}

impl<'a> AuthService<'a> {
    /// Creates a new AuthService instance.
    ///
    /// # Arguments
    /// - `http_client` - Reference to the HTTP client
    /// - `oauth_client` - Reference to the configured OAuth2 client
    /// - `manage_users_url` - Manage users API root URL
    pub fn new(
        http_client: &'a reqwest::Client,
        oauth_client: &'a OAuth2Client,
        manage_users_url: &'a Url,
    ) -> Self {
        Self {
            http_client,
            oauth_client,
            manage_users_url,
        }
    }

    /// Builds the authorization URL and its CSRF state token.
    pub fn login_url(&self) -> (Url, CsrfToken) {
        self.oauth_client.authorize_url(CsrfToken::new_random).url()
    }

    /// Completes sign-in.
    ///
    /// Exchanges the authorization code for an access token, then looks the
    /// user up in the manage users API.
    ///
    /// # Arguments
    /// - `authorization_code` - Code from the callback query string
    ///
    /// # Returns
    /// - `Ok(AuthenticatedUser)` - User with token and active caseload
    /// - `Err(AppError::AuthErr(AuthError::TokenExchange(_)))` - Code exchange failed
    /// - `Err(AppError::AuthErr(AuthError::NoActiveCaseload(_)))` - User cannot work in any prison
    /// - `Err(AppError::UpstreamErr(_))` - User lookup failed
    pub async fn callback(&self, authorization_code: String) -> Result<AuthenticatedUser, AppError> {
        let token = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(authorization_code))
            .request_async(self.http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;
        let access_token = token.access_token().secret().to_string();

        let details = ManageUsersApiClient::new(self.http_client, self.manage_users_url, &access_token)
            .get_user_me()
            .await?;

        let Some(active_case_load_id) = details.active_case_load_id else {
            return Err(AuthError::NoActiveCaseload(details.username).into());
        };

        tracing::info!("User {} signed in at {}", details.username, active_case_load_id);

        Ok(AuthenticatedUser {
            username: details.username,
            display_name: details.name,
            active_case_load_id,
            token: access_token,
        })
    }
}
