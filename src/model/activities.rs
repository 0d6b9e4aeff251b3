//! Activities API request and response payloads.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::server::model::recurrence::RepeatFrequency;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentCategorySummary {
    pub code: String,
    pub description: String,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentLocationSummary {
    pub id: i64,
    pub prison_code: String,
    pub description: String,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentSeriesSchedule {
    pub frequency: RepeatFrequency,
    pub number_of_appointments: u32,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentSeriesCreateRequest {
    pub appointment_type: String,
    pub prison_code: String,
    pub prisoner_numbers: Vec<String>,
    pub category_code: String,
    pub internal_location_id: i64,
    pub in_cell: bool,
    pub start_date: NaiveDate,
    #[serde(
        serialize_with = "serialize_time_as_hh_mm",
        deserialize_with = "deserialize_time_from_hh_mm"
    )]
    pub start_time: NaiveTime,
    #[serde(
        serialize_with = "serialize_optional_time_as_hh_mm",
        deserialize_with = "deserialize_optional_time_from_hh_mm",
        default
    )]
    pub end_time: Option<NaiveTime>,
    pub schedule: Option<AppointmentSeriesSchedule>,
    pub extra_information: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentSeries {
    pub id: i64,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PrisonPayBand {
    pub id: i64,
    pub alias: String,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPay {
    pub incentive_level: String,
    pub prison_pay_band: PrisonPayBand,
    pub rate: Option<i32>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    pub id: i64,
    pub summary: String,
    #[serde(default)]
    pub pay: Vec<ActivityPay>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySchedule {
    pub id: i64,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub activity: ActivitySummary,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AllocationCreateRequest {
    pub prisoner_number: String,
    pub pay_band_id: i64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub id: i64,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceReason {
    pub code: String,
    pub description: String,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: i64,
    pub prisoner_number: String,
    pub status: String,
    pub attendance_reason: Option<AttendanceReason>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledInstanceSchedule {
    pub id: i64,
    pub description: String,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledInstance {
    pub id: i64,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub cancelled: bool,
    pub activity_schedule: ScheduledInstanceSchedule,
    #[serde(default)]
    pub attendances: Vec<Attendance>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceUpdateRequest {
    pub id: i64,
    pub prison_code: String,
    pub status: String,
    pub attendance_reason: Option<String>,
}

fn serialize_time_as_hh_mm<S>(value: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&value.format("%H:%M").to_string())
}

fn deserialize_time_from_hh_mm<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value = String::deserialize(deserializer)?;
    NaiveTime::parse_from_str(&value, "%H:%M").map_err(D::Error::custom)
}

fn serialize_optional_time_as_hh_mm<S>(
    value: &Option<NaiveTime>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match value {
        Some(time) => serializer.serialize_some(&time.format("%H:%M").to_string()),
        None => serializer.serialize_none(),
    }
}

fn deserialize_optional_time_from_hh_mm<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveTime>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    Option::<String>::deserialize(deserializer)?
        .map(|value| NaiveTime::parse_from_str(&value, "%H:%M").map_err(D::Error::custom))
        .transpose()
}
