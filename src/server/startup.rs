use std::time::Duration as StdDuration;

use oauth2::{AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use sea_orm::DatabaseConnection;
use time::Duration;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    config::Config,
    error::AppError,
    state::{ApiUrls, AppState, OAuth2Client},
};

/// Connects to the Sqlite database holding the session table.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database
/// - `Err(AppError::DbErr(_))` - Failed to connect to database
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Ok(db)
}

/// Builds the session layer backed by the Sqlite session store.
///
/// Creates the session table if it does not exist. Sessions expire after the
/// configured period of inactivity and the cookie is only marked secure in
/// production.
///
/// # Arguments
/// - `db` - Database connection whose pool backs the session store
/// - `config` - Application configuration for expiry and cookie security
///
/// # Returns
/// - `Ok(SessionManagerLayer)` - Layer to add to the router
/// - `Err(AppError::SessionErr(_))` - Failed to create the session table
pub async fn connect_to_session(
    db: &DatabaseConnection,
    config: &Config,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    let pool = db.get_sqlite_connection_pool().clone();
    let session_store = SqliteStore::new(pool);

    session_store
        .migrate()
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create session table: {}", e)))?;

    let session = SessionManagerLayer::new(session_store)
        .with_secure(config.production)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(
            config.session_expiry_minutes,
        )));

    Ok(session)
}

/// Creates the HTTP client used for upstream API calls.
///
/// Redirects are not followed and every request is bounded by the configured
/// timeout.
pub fn setup_reqwest_client(config: &Config) -> Result<reqwest::Client, AppError> {
    let client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(StdDuration::from_secs(config.api_timeout_seconds))
        .build()?;

    Ok(client)
}

/// Creates the OAuth2 client for the HMPPS Auth authorization-code flow.
pub fn setup_oauth_client(config: &Config) -> Result<OAuth2Client, AppError> {
    let client = oauth2::basic::BasicClient::new(ClientId::new(config.api_client_id.clone()))
        .set_client_secret(ClientSecret::new(config.api_client_secret.clone()))
        .set_auth_uri(AuthUrl::from_url(config.auth_authorize_url()?))
        .set_token_uri(TokenUrl::from_url(config.auth_token_url()?))
        .set_redirect_uri(RedirectUrl::from_url(config.sign_in_callback_url()?));

    Ok(client)
}

/// Builds the shared application state from configuration.
pub fn build_state(config: &Config) -> Result<AppState, AppError> {
    Ok(AppState::new(
        setup_reqwest_client(config)?,
        setup_oauth_client(config)?,
        ApiUrls {
            activities: config.activities_api_url.clone(),
            prison: config.prison_api_url.clone(),
            manage_users: config.manage_users_api_url.clone(),
        },
        config.auth_logout_url()?,
        config.production,
    ))
}
