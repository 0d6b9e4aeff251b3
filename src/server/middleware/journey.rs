use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, RawPathParams},
    http::request::Parts,
};
use uuid::Uuid;

use crate::server::model::journey::DEFAULT_JOURNEY_ID;

const JOURNEY_ID_PARAM: &str = "journey_id";

/// Journey identifier taken from the `{journey_id}` path segment.
///
/// Routes without that segment share the `default` journey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyId(pub String);

impl JourneyId {
    /// Fresh identifier for a journey being started.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for JourneyId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let journey_id = RawPathParams::from_request_parts(parts, state)
            .await
            .ok()
            .and_then(|params| {
                params
                    .iter()
                    .find(|(name, _)| *name == JOURNEY_ID_PARAM)
                    .map(|(_, value)| value.to_string())
            })
            .filter(|value| !value.is_empty());

        Ok(Self(
            journey_id.unwrap_or_else(|| DEFAULT_JOURNEY_ID.to_string()),
        ))
    }
}
