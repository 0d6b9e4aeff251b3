//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and then cloned for each
//! request handler through Axum's state extraction. It holds:
//! - HTTP client for the upstream APIs
//! - OAuth2 client for HMPPS Auth sign-in
//! - Base URLs of the activities, prison and manage users APIs
//! - Auth server logout URL and the production flag for error rendering

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use url::Url;

/// Type alias for the OAuth2 client configured for HMPPS Auth.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Base URLs of the upstream REST APIs.
#[derive(Clone, Debug)]
pub struct ApiUrls {
    pub activities: Url,
    pub prison: Url,
    pub manage_users: Url,
}

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone: `reqwest::Client` uses an `Arc` internally
/// and the OAuth client and URLs are small values.
#[derive(Clone)]
pub struct AppState {
    /// HTTP client for upstream API requests.
    ///
    /// Configured without redirects and with the API timeout.
    pub http_client: reqwest::Client,

    /// OAuth2 client for the HMPPS Auth authorization-code flow.
    pub oauth_client: OAuth2Client,

    pub api_urls: ApiUrls,

    /// Where `/sign-out` sends the browser after clearing the session.
    pub auth_logout_url: Url,

    /// Hides error stacks from the error view when set.
    pub production: bool,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `http_client` - HTTP client for upstream API requests
    /// - `oauth_client` - OAuth2 client for HMPPS Auth
    /// - `api_urls` - Upstream API base URLs
    /// - `auth_logout_url` - Auth server logout endpoint
    /// - `production` - Whether error stacks are hidden
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(
        http_client: reqwest::Client,
        oauth_client: OAuth2Client,
        api_urls: ApiUrls,
        auth_logout_url: Url,
        production: bool,
    ) -> Self {
        Self {
            http_client,
            oauth_client,
            api_urls,
            auth_logout_url,
            production,
        }
    }
}
