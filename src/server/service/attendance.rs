//! Attendance recording business logic.

use crate::{
    model::{
        activities::AttendanceUpdateRequest,
        attendance::{AttendanceListView, AttendanceRowView},
    },
    server::{
        data::{activities::ActivitiesApiClient, prison::PrisonApiClient},
        error::AppError,
        model::{form::{FormFeedback, ValidationErrors}, user::AuthenticatedUser},
        state::ApiUrls,
    },
};

const ATTENDED_STATUS: &str = "COMPLETED";
const ATTENDED_REASON: &str = "ATTENDED";

pub struct AttendanceService<'a> {
    http_client: &'a reqwest::Client,
    api_urls: &'a ApiUrls,
    user: &'a AuthenticatedUser,
}

impl<'a> AttendanceService<'a> {
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

    /// Builds the attendance list for a scheduled instance.
    ///
    /// Each attendance row is joined with the prisoner's name and cell from the
    /// prison API. Prisoners the prison API does not know are listed without a
    /// name.
    ///
    /// # Arguments
    /// - `instance_id` - Scheduled instance to list
    /// - `feedback` - Flash feedback to show on the list
    pub async fn get_attendance_list(
        &self,
        instance_id: i64,
        feedback: FormFeedback,
    ) -> Result<AttendanceListView, AppError> {
        let instance = self.activities().get_scheduled_instance(instance_id).await?;
        let prison = PrisonApiClient::new(self.http_client, &self.api_urls.prison, &self.user.token);

        let mut attendances = Vec::with_capacity(instance.attendances.len());
        for attendance in instance.attendances {
            let prisoner = prison.get_inmate_detail(&attendance.prisoner_number).await?;

            attendances.push(AttendanceRowView {
                attendance_id: attendance.id,
                prisoner_name: prisoner.as_ref().map(|p| p.full_name()),
                cell_location: prisoner
                    .and_then(|p| p.assigned_living_unit)
                    .map(|unit| unit.description),
                prisoner_number: attendance.prisoner_number,
                status: attendance.status,
                attendance_reason: attendance.attendance_reason.map(|reason| reason.code),
            });
        }

        Ok(AttendanceListView {
            instance_id: instance.id,
            activity_name: instance.activity_schedule.description,
            date: instance.date,
            start_time: instance.start_time,
            end_time: instance.end_time,
            cancelled: instance.cancelled,
            attendances,
            feedback,
        })
    }

    /// Marks the selected attendances as attended.
    ///
    /// # Arguments
    /// - `instance_id` - Scheduled instance the attendances belong to
    /// - `attendance_ids` - Attendances ticked on the list; repeats are updated once
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of distinct attendances updated
    /// - `Err(AppError::Validation(_))` - An id is not on this instance's list
    /// - `Err(AppError::UpstreamErr(_))` - The activities API rejected the update
    pub async fn mark_attended(
        &self,
        instance_id: i64,
        attendance_ids: &[i64],
    ) -> Result<usize, AppError> {
        let activities = self.activities();
        let instance = activities.get_scheduled_instance(instance_id).await?;

        let listed = attendance_ids
            .iter()
            .all(|id| instance.attendances.iter().any(|a| a.id == *id));
        if !listed {
            return Err(AppError::Validation(ValidationErrors::single(
                "selectedAttendances",
                "Select people from the attendance list",
            )));
        }

        let mut unique_ids: Vec<i64> = Vec::with_capacity(attendance_ids.len());
        for id in attendance_ids {
            if !unique_ids.contains(id) {
                unique_ids.push(*id);
            }
        }

        let updates: Vec<AttendanceUpdateRequest> = unique_ids
            .iter()
            .map(|id| AttendanceUpdateRequest {
                id: *id,
                prison_code: self.user.active_case_load_id.clone(),
                status: ATTENDED_STATUS.to_string(),
                attendance_reason: Some(ATTENDED_REASON.to_string()),
            })
            .collect();

        activities.update_attendances(&updates).await?;

        Ok(updates.len())
    }
}
