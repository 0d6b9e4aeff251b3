use url::Url;

use crate::{
    model::user::UserDetailsDto,
    server::{data::rest_client::RestClient, error::AppError},
};

/// Manage users API client.
pub struct ManageUsersApiClient<'a> {
    rest: RestClient<'a>,
}

impl<'a> ManageUsersApiClient<'a> {
    pub fn new(http: &'a reqwest::Client, base_url: &Url, token: &'a str) -> Self {
        Self {
            rest: RestClient::new("Manage users", http, base_url, token),
        }
    }

    /// Details of the user the token was issued to.
    pub async fn get_user_me(&self) -> Result<UserDetailsDto, AppError> {
        self.rest.get("users/me").await
    }
}
