use serde::{Deserialize, Serialize};

use crate::server::model::form::FormFeedback;

/// Manage users API `/users/me` payload.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailsDto {
    pub username: String,
    pub name: String,
    pub active_case_load_id: Option<String>,
}

/// Signed-in user as exposed to views. The access token is never serialized.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub username: String,
    pub display_name: String,
    pub active_case_load_id: String,
}

/// Home page view for the signed-in user.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct HomeDto {
    pub user: UserDto,
    #[serde(flatten)]
    pub feedback: FormFeedback,
}
