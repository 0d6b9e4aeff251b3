//! View models for recording attendance.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::server::model::form::FormFeedback;

/// One prisoner's attendance row.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRowView {
    pub attendance_id: i64,
    pub prisoner_number: String,
    /// `None` when the prison API has no record of the prisoner
    pub prisoner_name: Option<String>,
    pub cell_location: Option<String>,
    pub status: String,
    pub attendance_reason: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceListView {
    pub instance_id: i64,
    pub activity_name: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub cancelled: bool,
    pub attendances: Vec<AttendanceRowView>,
    #[serde(flatten)]
    pub feedback: FormFeedback,
}
