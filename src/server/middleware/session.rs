//! Type-safe session management wrappers.
//!
//! Each struct wraps the same underlying `Session` but exposes only the methods
//! relevant to its concern:
//! - `AuthSession` - Signed-in user, OAuth CSRF state and the post sign-in return path
//! - `JourneySession` - Per-journey wizard state, addressed by journey id
//! - `FlashSession` - One-shot form feedback carried across a redirect

use chrono::Utc;
use dioxus_logger::tracing;
use serde_json::Value;
use tower_sessions::Session;

use crate::server::{
    error::AppError,
    model::{
        form::{FormFeedback, FormValues, ValidationErrors},
        journey::{JourneyData, JourneyMap},
        user::AuthenticatedUser,
    },
};

const SESSION_AUTH_USER: &str = "auth:user";
const SESSION_AUTH_CSRF_TOKEN: &str = "auth:csrf_token";
const SESSION_AUTH_RETURN_TO: &str = "auth:return_to";

const SESSION_JOURNEY_DATA: &str = "journey:data";

const SESSION_FLASH_VALIDATION_ERRORS: &str = "flash:validation_errors";
const SESSION_FLASH_FORM_RESPONSES: &str = "flash:form_responses";
const SESSION_FLASH_SUCCESS_MESSAGE: &str = "flash:success_message";

/// Authentication session management.
///
/// Handles the signed-in user and the temporary state of the OAuth sign-in flow.
pub struct AuthSession<'a> {
    /// The underlying tower-sessions Session instance.
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    /// Creates a new AuthSession wrapper.
    ///
    /// # Arguments
    /// - `session` - Reference to the tower-sessions Session to wrap
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores the signed-in user.
    ///
    /// # Returns
    /// - `Ok(())` - User successfully stored
    /// - `Err(AppError::SessionErr(_))` - Failed to store in session
    pub async fn set_user(&self, user: &AuthenticatedUser) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_USER, user).await?;
        Ok(())
    }

    /// Retrieves the signed-in user.
    ///
    /// # Returns
    /// - `Ok(Some(user))` - User is signed in
    /// - `Ok(None)` - No user in session
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn get_user(&self) -> Result<Option<AuthenticatedUser>, AppError> {
        Ok(self.session.get(SESSION_AUTH_USER).await?)
    }

    pub async fn set_csrf_token(&self, token: String) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_CSRF_TOKEN, token).await?;
        Ok(())
    }

    /// Retrieves and removes the CSRF token.
    ///
    /// Each token can only be checked once.
    pub async fn take_csrf_token(&self) -> Result<Option<String>, AppError> {
        Ok(self.session.remove(SESSION_AUTH_CSRF_TOKEN).await?)
    }

    /// Remembers where to send the user once sign-in completes.
    pub async fn set_return_to(&self, path: String) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_RETURN_TO, path).await?;
        Ok(())
    }

    pub async fn take_return_to(&self) -> Result<Option<String>, AppError> {
        Ok(self.session.remove(SESSION_AUTH_RETURN_TO).await?)
    }

    /// Issues a new session id, keeping the data.
    ///
    /// Called once the user signs in so a pre-sign-in session id cannot be reused.
    pub async fn cycle_id(&self) -> Result<(), AppError> {
        self.session.cycle_id().await?;
        Ok(())
    }

    /// Clears all data from the session.
    pub async fn clear(&self) {
        self.session.clear().await;
    }
}

/// Journey state for one journey id.
///
/// Reads and writes the session's `JourneyMap`, touching only the entry for
/// `journey_id`. Writes to other journeys in the same session are never
/// visible here.
pub struct JourneySession<'a> {
    session: &'a Session,
    journey_id: &'a str,
}

impl<'a> JourneySession<'a> {
    /// Creates a new JourneySession wrapper.
    ///
    /// # Arguments
    /// - `session` - Reference to the tower-sessions Session to wrap
    /// - `journey_id` - Journey addressed by the request
    pub fn new(session: &'a Session, journey_id: &'a str) -> Self {
        Self {
            session,
            journey_id,
        }
    }

    pub fn journey_id(&self) -> &str {
        self.journey_id
    }

    /// Loads the journey map, treating missing or malformed data as empty.
    async fn load(&self) -> Result<JourneyMap, AppError> {
        let raw: Option<Value> = self.session.get(SESSION_JOURNEY_DATA).await?;

        let Some(raw) = raw else {
            return Ok(JourneyMap::new());
        };

        match serde_json::from_value(raw) {
            Ok(map) => Ok(map),
            Err(e) => {
                tracing::debug!("Discarding malformed journey data: {}", e);
                Ok(JourneyMap::new())
            }
        }
    }

    async fn save(&self, map: &JourneyMap) -> Result<(), AppError> {
        self.session.insert(SESSION_JOURNEY_DATA, map).await?;
        Ok(())
    }

    /// Reads this journey's state of type `T`.
    ///
    /// # Returns
    /// - `Ok(Some(T))` - State was found
    /// - `Ok(None)` - Journey not tracked, slot never written, or the stored
    ///   value no longer matches `T`
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn get<T: JourneyData>(&self) -> Result<Option<T>, AppError> {
        let map = self.load().await?;

        let Some(value) = map.get(self.journey_id, T::SLOT) else {
            return Ok(None);
        };

        match serde_json::from_value(value.clone()) {
            Ok(data) => Ok(Some(data)),
            Err(e) => {
                tracing::debug!(
                    "Discarding malformed {} for journey {}: {}",
                    T::SLOT.key(),
                    self.journey_id,
                    e
                );
                Ok(None)
            }
        }
    }

    /// Reads this journey's state, or fails with `JourneyNotFound`.
    pub async fn require<T: JourneyData>(&self) -> Result<T, AppError> {
        self.get()
            .await?
            .ok_or_else(|| AppError::JourneyNotFound(self.journey_id.to_string()))
    }

    /// Writes this journey's state of type `T`.
    ///
    /// Creating a journey beyond the per-session limit silently evicts the
    /// journey created longest ago.
    pub async fn set<T: JourneyData>(&self, data: &T) -> Result<(), AppError> {
        let mut map = self.load().await?;

        let value = serde_json::to_value(data)?;
        if let Some(evicted) = map.set(self.journey_id, T::SLOT, value, Utc::now()) {
            tracing::debug!("Evicted journey {} to make room for {}", evicted, self.journey_id);
        }

        self.save(&map).await
    }

    /// Removes this journey's state of type `T`.
    pub async fn clear<T: JourneyData>(&self) -> Result<(), AppError> {
        let mut map = self.load().await?;
        map.clear(self.journey_id, T::SLOT);
        self.save(&map).await
    }
}

/// One-shot form feedback.
///
/// Values set here survive exactly one redirect: `take` reads and removes them.
pub struct FlashSession<'a> {
    session: &'a Session,
}

impl<'a> FlashSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores field failures and the values that were submitted.
    ///
    /// # Arguments
    /// - `errors` - Failures to show against each field
    /// - `values` - Submitted values, echoed back so the form can be re-filled
    pub async fn set_validation_failure(
        &self,
        errors: &ValidationErrors,
        values: &FormValues,
    ) -> Result<(), AppError> {
        self.set_validation_errors(errors).await?;
        self.session
            .insert(SESSION_FLASH_FORM_RESPONSES, values.to_json())
            .await?;
        Ok(())
    }

    /// Stores field failures without echoed values.
    pub async fn set_validation_errors(&self, errors: &ValidationErrors) -> Result<(), AppError> {
        self.session
            .insert(SESSION_FLASH_VALIDATION_ERRORS, errors)
            .await?;
        Ok(())
    }

    /// Stores a success banner for the next page.
    pub async fn set_success(&self, message: String) -> Result<(), AppError> {
        self.session
            .insert(SESSION_FLASH_SUCCESS_MESSAGE, message)
            .await?;
        Ok(())
    }

    /// Reads and removes every flash key.
    ///
    /// # Returns
    /// - `Ok(FormFeedback)` - Whatever was flashed; empty if nothing was
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn take(&self) -> Result<FormFeedback, AppError> {
        let validation_errors = self
            .session
            .remove::<ValidationErrors>(SESSION_FLASH_VALIDATION_ERRORS)
            .await?
            .unwrap_or_default();
        let form_responses = self.session.remove(SESSION_FLASH_FORM_RESPONSES).await?;
        let success_message = self.session.remove(SESSION_FLASH_SUCCESS_MESSAGE).await?;

        Ok(FormFeedback {
            validation_errors,
            form_responses,
            success_message,
        })
    }
}
