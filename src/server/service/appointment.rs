//! Appointment creation business logic.

use serde_json::Value;

use crate::{
    model::activities::{AppointmentCategorySummary, AppointmentLocationSummary, AppointmentSeries},
    server::{
        data::{activities::ActivitiesApiClient, prison::PrisonApiClient},
        error::AppError,
        model::{
            appointment::{CreateAppointmentJourney, JourneyPrisoner},
            user::AuthenticatedUser,
        },
        state::ApiUrls,
    },
};

/// Service providing business logic for creating appointments.
pub struct AppointmentService<'a> {
    http_client: &'a reqwest::Client,
    api_urls: &'a ApiUrls,
    user: &'a AuthenticatedUser,
}

impl<'a> AppointmentService<'a> {
    /// Creates a new AppointmentService instance.
    ///
    /// # Arguments
    /// - `http_client` - Shared HTTP client
    /// - `api_urls` - Upstream API root URLs
    /// - `user` - Signed-in user whose token and caseload are used
    pub fn new(
        http_client: &'a reqwest::Client,
        api_urls: &'a ApiUrls,
        user: &'a AuthenticatedUser,
    ) -> Self {
        Self {
            http_client,
            api_urls,
            user,
        }
    }

    fn activities(&self) -> ActivitiesApiClient<'a> {
        ActivitiesApiClient::new(self.http_client, &self.api_urls.activities, &self.user.token)
    }

    /// Looks up the prisoner the appointment is for.
    ///
    /// # Returns
    /// - `Ok(Some(JourneyPrisoner))` - Prisoner exists
    /// - `Ok(None)` - No prisoner with this number
    /// - `Err(AppError)` - Prison API failure
    pub async fn find_prisoner(
        &self,
        prisoner_number: &str,
    ) -> Result<Option<JourneyPrisoner>, AppError> {
        let prisoner = PrisonApiClient::new(self.http_client, &self.api_urls.prison, &self.user.token)
            .get_inmate_detail(prisoner_number)
            .await?;

        Ok(prisoner.map(|prisoner| JourneyPrisoner {
            name: prisoner.full_name(),
            cell_location: prisoner.assigned_living_unit.map(|unit| unit.description),
            number: prisoner.offender_no,
        }))
    }

    pub async fn get_categories(&self) -> Result<Vec<AppointmentCategorySummary>, AppError> {
        self.activities().get_appointment_categories().await
    }

    /// Appointment locations in the user's active caseload.
    pub async fn get_locations(&self) -> Result<Vec<AppointmentLocationSummary>, AppError> {
        self.activities()
            .get_appointment_locations(&self.user.active_case_load_id)
            .await
    }

    /// Finds a listed category by code.
    pub async fn find_category(
        &self,
        code: &str,
    ) -> Result<Option<AppointmentCategorySummary>, AppError> {
        Ok(self
            .get_categories()
            .await?
            .into_iter()
            .find(|category| category.code == code))
    }

    /// Finds a listed location by id.
    pub async fn find_location(
        &self,
        location_id: i64,
    ) -> Result<Option<AppointmentLocationSummary>, AppError> {
        Ok(self
            .get_locations()
            .await?
            .into_iter()
            .find(|location| location.id == location_id))
    }

    /// Creates the appointment series described by a completed journey.
    ///
    /// # Returns
    /// - `Ok(AppointmentSeries)` - Series created in the user's prison
    /// - `Err(AppError::BadRequest(_))` - The journey is missing answers
    /// - `Err(AppError::UpstreamErr(_))` - The activities API rejected the series
    pub async fn create(&self, journey: &CreateAppointmentJourney) -> Result<AppointmentSeries, AppError> {
        let request = journey
            .to_request(&self.user.active_case_load_id)
            .ok_or_else(|| AppError::BadRequest("Appointment details are incomplete".to_string()))?;

        self.activities().create_appointment_series(&request).await
    }

    pub async fn get_details(&self, appointment_id: i64) -> Result<Value, AppError> {
        self.activities().get_appointment_details(appointment_id).await
    }
}
