//! Allocation business logic.

use crate::server::{
    data::{activities::ActivitiesApiClient, prison::PrisonApiClient},
    error::AppError,
    model::{
        allocation::{AllocateJourney, AllocationConfirmation, AllocationPrisoner},
        user::AuthenticatedUser,
    },
    state::ApiUrls,
};

/// Service providing business logic for allocating prisoners to activities.
pub struct AllocationService<'a> {
    http_client: &'a reqwest::Client,
    api_urls: &'a ApiUrls,
    user: &'a AuthenticatedUser,
}

impl<'a> AllocationService<'a> {
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

    /// Seeds an allocation journey.
    ///
    /// Loads the prisoner, their incentive level and the schedule with its pay
    /// rates. Lookups run one after another.
    ///
    /// # Arguments
    /// - `prisoner_number` - Prisoner being allocated
    /// - `schedule_id` - Schedule being allocated to
    ///
    /// # Returns
    /// - `Ok(AllocateJourney)` - Journey with pay rates for the prisoner's level
    /// - `Err(AppError::NotFound(_))` - No such prisoner
    /// - `Err(AppError::UpstreamErr(_))` - Upstream lookup failed
    pub async fn start(
        &self,
        prisoner_number: &str,
        schedule_id: i64,
    ) -> Result<AllocateJourney, AppError> {
        let prison = PrisonApiClient::new(self.http_client, &self.api_urls.prison, &self.user.token);

        let Some(inmate) = prison.get_inmate_detail(prisoner_number).await? else {
            return Err(AppError::NotFound(format!(
                "Prisoner {} not found",
                prisoner_number
            )));
        };
        let incentive_level = prison.get_incentive_level(inmate.booking_id).await?;

        let schedule = self.activities().get_schedule(schedule_id).await?;

        let prisoner = AllocationPrisoner {
            name: inmate.full_name(),
            number: inmate.offender_no,
            incentive_level,
        };

        Ok(AllocateJourney::new(prisoner, schedule))
    }

    /// Submits a completed allocation journey.
    ///
    /// # Returns
    /// - `Ok(AllocationConfirmation)` - Summary for the confirmation page
    /// - `Err(AppError::BadRequest(_))` - Pay band or start date missing
    /// - `Err(AppError::UpstreamErr(_))` - The activities API rejected the allocation
    pub async fn submit(&self, journey: &AllocateJourney) -> Result<AllocationConfirmation, AppError> {
        let request = journey
            .to_request()
            .ok_or_else(|| AppError::BadRequest("Allocation details are incomplete".to_string()))?;

        let allocation = self
            .activities()
            .allocate(journey.activity.schedule_id, &request)
            .await?;

        Ok(AllocationConfirmation {
            allocation_id: allocation.id,
            prisoner_name: journey.prisoner.name.clone(),
            prisoner_number: journey.prisoner.number.clone(),
            activity_name: journey.activity.name.clone(),
            start_date: request.start_date,
            end_date: request.end_date,
        })
    }
}
