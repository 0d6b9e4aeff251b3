//! Activities API client.
//!
//! Covers appointment categories, locations and series, activity schedules and
//! allocations, and scheduled instances with their attendance records.

use serde_json::Value;
use url::Url;

use crate::{
    model::activities::{
        ActivitySchedule, Allocation, AllocationCreateRequest, AppointmentCategorySummary,
        AppointmentLocationSummary, AppointmentSeries, AppointmentSeriesCreateRequest,
        AttendanceUpdateRequest, ScheduledInstance,
    },
    server::{data::rest_client::RestClient, error::AppError},
};

pub struct ActivitiesApiClient<'a> {
    rest: RestClient<'a>,
}

impl<'a> ActivitiesApiClient<'a> {
    /// Creates a new ActivitiesApiClient instance.
    ///
    /// # Arguments
    /// - `http` - Shared HTTP client
    /// - `base_url` - Activities API root URL
    /// - `token` - Signed-in user's access token
    pub fn new(http: &'a reqwest::Client, base_url: &Url, token: &'a str) -> Self {
        Self {
            rest: RestClient::new("Activities", http, base_url, token),
        }
    }

    pub async fn get_appointment_categories(
        &self,
    ) -> Result<Vec<AppointmentCategorySummary>, AppError> {
        self.rest.get("appointment-categories").await
    }

    /// Locations appointments can be held at in a prison.
    ///
    /// # Arguments
    /// - `prison_code` - Prison the user is working in
    pub async fn get_appointment_locations(
        &self,
        prison_code: &str,
    ) -> Result<Vec<AppointmentLocationSummary>, AppError> {
        self.rest
            .get(&format!("appointment-locations/{}", prison_code))
            .await
    }

    /// Creates an appointment series, returning the created series.
    pub async fn create_appointment_series(
        &self,
        request: &AppointmentSeriesCreateRequest,
    ) -> Result<AppointmentSeries, AppError> {
        self.rest.post("appointment-series", request).await
    }

    /// Appointment details, passed through to the view untouched.
    pub async fn get_appointment_details(&self, appointment_id: i64) -> Result<Value, AppError> {
        self.rest
            .get(&format!("appointments/{}/details", appointment_id))
            .await
    }

    /// Activity schedule including the activity and its pay rates.
    pub async fn get_schedule(&self, schedule_id: i64) -> Result<ActivitySchedule, AppError> {
        self.rest.get(&format!("schedules/{}", schedule_id)).await
    }

    /// Allocates a prisoner to a schedule.
    ///
    /// # Arguments
    /// - `schedule_id` - Schedule being allocated to
    /// - `request` - Prisoner, pay band and dates
    ///
    /// # Returns
    /// - `Ok(Allocation)` - The created allocation
    /// - `Err(AppError::UpstreamErr(_))` - The API rejected the allocation
    pub async fn allocate(
        &self,
        schedule_id: i64,
        request: &AllocationCreateRequest,
    ) -> Result<Allocation, AppError> {
        self.rest
            .post(&format!("schedules/{}/allocations", schedule_id), request)
            .await
    }

    pub async fn get_scheduled_instance(
        &self,
        instance_id: i64,
    ) -> Result<ScheduledInstance, AppError> {
        self.rest
            .get(&format!("scheduled-instances/{}", instance_id))
            .await
    }

    pub async fn update_attendances(
        &self,
        updates: &[AttendanceUpdateRequest],
    ) -> Result<(), AppError> {
        self.rest.put("attendances", &updates).await
    }
}
