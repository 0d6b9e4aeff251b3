//! View models for the appointment creation journey.
//!
//! Each GET step returns one of these. The journey answers so far are echoed
//! back so the step can be pre-filled, together with any flash feedback from a
//! failed submission.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    model::activities::{AppointmentCategorySummary, AppointmentLocationSummary},
    server::model::{
        appointment::CreateAppointmentJourney, form::FormFeedback, recurrence::RepeatFrequency,
    },
};

/// Steps that need nothing beyond the journey itself.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentStepView {
    pub journey_id: String,
    pub journey: CreateAppointmentJourney,
    #[serde(flatten)]
    pub feedback: FormFeedback,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStepView {
    pub journey_id: String,
    pub journey: CreateAppointmentJourney,
    pub categories: Vec<AppointmentCategorySummary>,
    #[serde(flatten)]
    pub feedback: FormFeedback,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocationStepView {
    pub journey_id: String,
    pub journey: CreateAppointmentJourney,
    pub locations: Vec<AppointmentLocationSummary>,
    #[serde(flatten)]
    pub feedback: FormFeedback,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RepeatFrequencyStepView {
    pub journey_id: String,
    pub journey: CreateAppointmentJourney,
    pub frequencies: Vec<RepeatFrequency>,
    pub max_number_of_appointments: u32,
    #[serde(flatten)]
    pub feedback: FormFeedback,
}

/// Summary shown before the series is created.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentCheckAnswersView {
    pub journey_id: String,
    pub journey: CreateAppointmentJourney,
    /// Date of the last occurrence in the series
    pub end_date: Option<NaiveDate>,
    pub number_of_appointments: u32,
    #[serde(flatten)]
    pub feedback: FormFeedback,
}

/// Appointment details as returned by the activities API, plus the success
/// banner set on creation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDetailsView {
    pub appointment: Value,
    #[serde(flatten)]
    pub feedback: FormFeedback,
}
