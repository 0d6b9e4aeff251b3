use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
    Extension, Json,
};
use tower_sessions::Session;

use crate::server::{
    error::AppError,
    middleware::{session::FlashSession, validation::ValidatedForm},
    model::{attendance::AttendedForm, user::AuthenticatedUser},
    service::attendance::AttendanceService,
    state::AppState,
};

fn attendance_list_path(instance_id: i64) -> String {
    format!(
        "/activities/attendance/activities/{}/attendance-list",
        instance_id
    )
}

/// Attendance list for a scheduled instance with prisoner names.
pub async fn get_attendance_list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    session: Session,
    Path(instance_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let feedback = FlashSession::new(&session).take().await?;

    let view = AttendanceService::new(&state.http_client, &state.api_urls, &user)
        .get_attendance_list(instance_id, feedback)
        .await?;

    Ok(Json(view))
}

/// Marks the ticked attendances as attended and returns to the list.
pub async fn post_attended(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    session: Session,
    Path(instance_id): Path<i64>,
    ValidatedForm(form): ValidatedForm<AttendedForm>,
) -> Result<impl IntoResponse, AppError> {
    let count = AttendanceService::new(&state.http_client, &state.api_urls, &user)
        .mark_attended(instance_id, &form.attendance_ids)
        .await?;

    FlashSession::new(&session)
        .set_success(format!(
            "You've saved attendance details for {} people",
            count
        ))
        .await?;

    Ok(Redirect::to(&attendance_list_path(instance_id)))
}
