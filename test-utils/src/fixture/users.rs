//! Manage users API and HMPPS Auth fixtures.

use serde_json::{json, Value};

pub const DEFAULT_USERNAME: &str = "SMITH_J";
pub const DEFAULT_TOKEN: &str = "test-access-token";

/// `/users/me` body. Pass `None` for a user without an active caseload.
pub fn user_me(username: &str, name: &str, active_case_load_id: Option<&str>) -> Value {
    json!({
        "username": username,
        "name": name,
        "activeCaseLoadId": active_case_load_id
    })
}

/// OAuth2 token endpoint response.
pub fn token_response(access_token: &str) -> Value {
    json!({
        "access_token": access_token,
        "token_type": "bearer",
        "expires_in": 1200
    })
}
