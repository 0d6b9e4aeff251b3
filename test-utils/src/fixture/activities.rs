//! Activities API fixtures.

use serde_json::{json, Value};

/// Default prison code used across fixtures.
pub const DEFAULT_PRISON_CODE: &str = "MDI";

/// Pay band ids offered by `schedule`.
pub const BASIC_PAY_BAND_ID: i64 = 11;
pub const STANDARD_PAY_BAND_ID: i64 = 12;
pub const ENHANCED_PAY_BAND_ID: i64 = 13;

/// Two appointment categories: `CHAP` (Chaplaincy) and `GYMW` (Gym - Weights).
pub fn appointment_categories() -> Value {
    json!([
        { "code": "CHAP", "description": "Chaplaincy" },
        { "code": "GYMW", "description": "Gym - Weights" }
    ])
}

/// Two appointment locations with ids 26149 and 26150.
pub fn appointment_locations(prison_code: &str) -> Value {
    json!([
        { "id": 26149, "prisonCode": prison_code, "description": "Chapel" },
        { "id": 26150, "prisonCode": prison_code, "description": "Gym" }
    ])
}

pub fn appointment_series(id: i64) -> Value {
    json!({ "id": id })
}

pub fn appointment_details(id: i64) -> Value {
    json!({
        "id": id,
        "category": { "code": "CHAP", "description": "Chaplaincy" },
        "startDate": "2030-01-01",
        "startTime": "09:00"
    })
}

/// Activity schedule with pay rates at the Basic and Standard incentive levels.
///
/// # Arguments
/// - `id` - Schedule id; the activity id is `id + 100`
/// - `start_date` - Schedule start, `YYYY-MM-DD`
/// - `end_date` - Optional schedule end, `YYYY-MM-DD`
pub fn schedule(id: i64, start_date: &str, end_date: Option<&str>) -> Value {
    json!({
        "id": id,
        "description": "Maths level 1",
        "startDate": start_date,
        "endDate": end_date,
        "activity": {
            "id": id + 100,
            "summary": "Maths",
            "pay": [
                {
                    "incentiveLevel": "Basic",
                    "prisonPayBand": { "id": BASIC_PAY_BAND_ID, "alias": "Low" },
                    "rate": 75
                },
                {
                    "incentiveLevel": "Standard",
                    "prisonPayBand": { "id": STANDARD_PAY_BAND_ID, "alias": "Medium" },
                    "rate": 125
                },
                {
                    "incentiveLevel": "Standard",
                    "prisonPayBand": { "id": ENHANCED_PAY_BAND_ID, "alias": "High" },
                    "rate": 150
                }
            ]
        }
    })
}

pub fn allocation(id: i64) -> Value {
    json!({ "id": id })
}

/// Scheduled instance with one `WAITING` attendance per `(id, prisoner number)` pair.
pub fn scheduled_instance(id: i64, attendances: &[(i64, &str)]) -> Value {
    let attendances: Vec<Value> = attendances
        .iter()
        .map(|(attendance_id, prisoner_number)| {
            json!({
                "id": attendance_id,
                "prisonerNumber": prisoner_number,
                "status": "WAITING",
                "attendanceReason": null
            })
        })
        .collect();

    json!({
        "id": id,
        "date": "2030-01-01",
        "startTime": "09:00",
        "endTime": "12:00",
        "cancelled": false,
        "activitySchedule": { "id": 1, "description": "Maths level 1" },
        "attendances": attendances
    })
}
