//! Signed-in user held in the session.

use serde::{Deserialize, Serialize};

use crate::model::user::UserDto;

/// User established by the sign-in callback.
///
/// Stored in the session and attached to every authenticated request. The
/// access token is forwarded as the bearer credential on upstream API calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub username: String,
    pub display_name: String,
    /// Prison code the user is currently working in.
    pub active_case_load_id: String,
    pub token: String,
}

impl AuthenticatedUser {
    pub fn into_dto(self) -> UserDto {
        UserDto {
            username: self.username,
            display_name: self.display_name,
            active_case_load_id: self.active_case_load_id,
        }
    }
}
