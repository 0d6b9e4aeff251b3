use url::Url;

use crate::{
    model::prison::{IncentiveSummary, InmateDetail},
    server::{data::rest_client::RestClient, error::AppError},
};

/// Prison API client for prisoner lookups.
pub struct PrisonApiClient<'a> {
    rest: RestClient<'a>,
}

impl<'a> PrisonApiClient<'a> {
    pub fn new(http: &'a reqwest::Client, base_url: &Url, token: &'a str) -> Self {
        Self {
            rest: RestClient::new("Prison", http, base_url, token),
        }
    }

    /// Finds a prisoner by prisoner number.
    ///
    /// # Returns
    /// - `Ok(Some(InmateDetail))` - Prisoner found
    /// - `Ok(None)` - No prisoner with this number
    /// - `Err(AppError)` - Any other upstream failure
    pub async fn get_inmate_detail(
        &self,
        prisoner_number: &str,
    ) -> Result<Option<InmateDetail>, AppError> {
        self.rest
            .get_optional(&format!("api/bookings/offenderNo/{}", prisoner_number))
            .await
    }

    /// Current incentive level description for a booking, if one is recorded.
    pub async fn get_incentive_level(&self, booking_id: i64) -> Result<Option<String>, AppError> {
        let summary: Option<IncentiveSummary> = self
            .rest
            .get_optional(&format!("api/bookings/{}/iepSummary", booking_id))
            .await?;

        Ok(summary.map(|summary| summary.iep_level))
    }
}
