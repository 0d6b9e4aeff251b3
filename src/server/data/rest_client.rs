use dioxus_logger::tracing;
use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::server::{
    config::with_trailing_slash,
    error::{upstream::UpstreamError, AppError},
};

/// JSON client for one upstream API, authenticated with a bearer token.
///
/// Non-success responses become `UpstreamError` carrying the API name, method,
/// path and status. There are no retries.
pub struct RestClient<'a> {
    api: &'static str,
    http: &'a reqwest::Client,
    base_url: Url,
    token: &'a str,
}

impl<'a> RestClient<'a> {
    /// Creates a new RestClient instance.
    ///
    /// # Arguments
    /// - `api` - API name used in errors and logs
    /// - `http` - Shared HTTP client
    /// - `base_url` - Root URL of the API; paths are resolved beneath it
    /// - `token` - Bearer token sent with every request
    pub fn new(api: &'static str, http: &'a reqwest::Client, base_url: &Url, token: &'a str) -> Self {
        Self {
            api,
            http,
            base_url: with_trailing_slash(base_url),
            token,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self.send::<()>(Method::GET, path, None).await?;
        Ok(response.json().await?)
    }

    /// Like `get`, but a 404 becomes `Ok(None)`.
    pub async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, AppError> {
        match self.send::<()>(Method::GET, path, None).await {
            Ok(response) => Ok(Some(response.json().await?)),
            Err(AppError::UpstreamErr(err)) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let response = self.send(Method::POST, path, Some(body)).await?;
        Ok(response.json().await?)
    }

    /// Sends a PUT and discards the response body.
    pub async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<(), AppError> {
        self.send(Method::PUT, path, Some(body)).await?;
        Ok(())
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, AppError> {
        let path = path.trim_start_matches('/');
        let url = self.base_url.join(path)?;

        tracing::debug!("{} API {} {}", self.api, method, url);

        let mut request = self.http.request(method.clone(), url).bearer_auth(self.token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let err = UpstreamError::new(self.api, method.as_str(), &format!("/{}", path), status.as_u16());
            tracing::warn!("{}", err);
            return Err(err.into());
        }

        Ok(response)
    }
}
