use std::str::FromStr;

use url::Url;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SESSION_EXPIRY_MINUTES: i64 = 120;
const DEFAULT_API_TIMEOUT_SECONDS: u64 = 20;

pub struct Config {
    pub database_url: String,
    pub port: u16,

    /// Public base URL of this service, used to build the OAuth redirect.
    pub ingress_url: Url,
    pub production: bool,
    pub session_expiry_minutes: i64,

    pub hmpps_auth_url: Url,
    pub api_client_id: String,
    pub api_client_secret: String,

    pub activities_api_url: Url,
    pub prison_api_url: Url,
    pub manage_users_api_url: Url,
    pub api_timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            port: parsed_or("PORT", DEFAULT_PORT)?,
            ingress_url: url("INGRESS_URL")?,
            production: std::env::var("ENVIRONMENT")
                .map(|env| env.eq_ignore_ascii_case("production"))
                .unwrap_or(false),
            session_expiry_minutes: parsed_or(
                "SESSION_EXPIRY_MINUTES",
                DEFAULT_SESSION_EXPIRY_MINUTES,
            )?,
            hmpps_auth_url: url("HMPPS_AUTH_URL")?,
            api_client_id: required("API_CLIENT_ID")?,
            api_client_secret: required("API_CLIENT_SECRET")?,
            activities_api_url: url("ACTIVITIES_API_URL")?,
            prison_api_url: url("PRISON_API_URL")?,
            manage_users_api_url: url("MANAGE_USERS_API_URL")?,
            api_timeout_seconds: parsed_or("API_TIMEOUT_SECONDS", DEFAULT_API_TIMEOUT_SECONDS)?,
        })
    }

    /// Authorization endpoint of the HMPPS Auth server.
    pub fn auth_authorize_url(&self) -> Result<Url, AppError> {
        Ok(with_trailing_slash(&self.hmpps_auth_url).join("oauth/authorize")?)
    }

    pub fn auth_token_url(&self) -> Result<Url, AppError> {
        Ok(with_trailing_slash(&self.hmpps_auth_url).join("oauth/token")?)
    }

    /// Auth server logout endpoint, returning the user to this service afterwards.
    pub fn auth_logout_url(&self) -> Result<Url, AppError> {
        let mut url = with_trailing_slash(&self.hmpps_auth_url).join("sign-out")?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.api_client_id)
            .append_pair("redirect_uri", self.ingress_url.as_str());
        Ok(url)
    }

    /// OAuth redirect back to `/sign-in/callback` on this service.
    pub fn sign_in_callback_url(&self) -> Result<Url, AppError> {
        Ok(with_trailing_slash(&self.ingress_url).join("sign-in/callback")?)
    }
}

/// Returns `url` with a trailing `/` on its path so `join` appends rather than
/// replaces the last segment.
pub fn with_trailing_slash(url: &Url) -> Url {
    let mut url = url.clone();
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn url(name: &str) -> Result<Url, ConfigError> {
    let value = required(name)?;
    Url::parse(&value).map_err(|e| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

fn parsed_or<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(value) => value.parse().map_err(|e: T::Err| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}
