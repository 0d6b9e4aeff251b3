//! Prison API fixtures.

use serde_json::{json, Value};

/// Inmate detail for a prisoner in cell `MDI-1-1-001`.
pub fn inmate_detail(prisoner_number: &str, booking_id: i64, first_name: &str, last_name: &str) -> Value {
    json!({
        "offenderNo": prisoner_number,
        "bookingId": booking_id,
        "firstName": first_name,
        "lastName": last_name,
        "agencyId": "MDI",
        "assignedLivingUnit": { "description": "1-1-001" }
    })
}

pub fn iep_summary(level: &str) -> Value {
    json!({ "iepLevel": level })
}
