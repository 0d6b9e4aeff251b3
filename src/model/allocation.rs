//! View models for the allocation journey.

use serde::{Deserialize, Serialize};

use crate::server::model::{
    allocation::{AllocateJourney, AllocationConfirmation},
    form::FormFeedback,
};

/// Every allocation step renders from the journey; the pay band step reads
/// the offered rates from `journey.payRates`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationStepView {
    pub journey_id: String,
    pub journey: AllocateJourney,
    #[serde(flatten)]
    pub feedback: FormFeedback,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationConfirmationView {
    pub confirmation: AllocationConfirmation,
    #[serde(flatten)]
    pub feedback: FormFeedback,
}
