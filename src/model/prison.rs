//! Prison API response payloads.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AssignedLivingUnit {
    pub description: String,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InmateDetail {
    pub offender_no: String,
    pub booking_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub agency_id: String,
    pub assigned_living_unit: Option<AssignedLivingUnit>,
}

impl InmateDetail {
    /// Display name in "First Last" form.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct IncentiveSummary {
    pub iep_level: String,
}
