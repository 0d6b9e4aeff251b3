use axum::{response::IntoResponse, Json};

use crate::model::api::HealthDto;

/// Liveness probe.
pub async fn get_health() -> impl IntoResponse {
    Json(HealthDto {
        status: "UP".to_string(),
    })
}
