use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    controller::{
        allocation, appointment,
        attendance::{get_attendance_list, post_attended},
        auth::{callback, sign_in, sign_out},
        health::get_health,
        home::get_home,
    },
    middleware::{auth::require_sign_in, error::handle_errors},
    state::AppState,
};

/// Builds the application router.
///
/// Sign-in and health routes are public; everything else requires a signed-in
/// user. Errors from any route pass through `handle_errors`, which needs the
/// session layer beneath the trace layer.
pub fn router(state: AppState, session: SessionManagerLayer<SqliteStore>) -> Router {
    let appointments = Router::new()
        .route(
            "/appointments/create/start-individual",
            get(appointment::start_individual),
        )
        .route(
            "/appointments/create/{journey_id}/select-prisoner",
            get(appointment::get_select_prisoner).post(appointment::post_select_prisoner),
        )
        .route(
            "/appointments/create/{journey_id}/category",
            get(appointment::get_category).post(appointment::post_category),
        )
        .route(
            "/appointments/create/{journey_id}/location",
            get(appointment::get_location).post(appointment::post_location),
        )
        .route(
            "/appointments/create/{journey_id}/date-and-time",
            get(appointment::get_date_and_time).post(appointment::post_date_and_time),
        )
        .route(
            "/appointments/create/{journey_id}/repeat",
            get(appointment::get_repeat).post(appointment::post_repeat),
        )
        .route(
            "/appointments/create/{journey_id}/repeat-frequency-and-count",
            get(appointment::get_repeat_frequency_and_count)
                .post(appointment::post_repeat_frequency_and_count),
        )
        .route(
            "/appointments/create/{journey_id}/extra-information",
            get(appointment::get_extra_information).post(appointment::post_extra_information),
        )
        .route(
            "/appointments/create/{journey_id}/check-answers",
            get(appointment::get_check_answers).post(appointment::post_check_answers),
        )
        .route(
            "/appointments/{appointment_id}",
            get(appointment::get_appointment_details),
        );

    let allocations = Router::new()
        .route(
            "/activities/allocations/create/prisoner/{prisoner_number}",
            get(allocation::start_allocation),
        )
        .route(
            "/activities/allocations/{journey_id}/pay-band",
            get(allocation::get_pay_band).post(allocation::post_pay_band),
        )
        .route(
            "/activities/allocations/{journey_id}/start-date",
            get(allocation::get_start_date).post(allocation::post_start_date),
        )
        .route(
            "/activities/allocations/{journey_id}/end-date-option",
            get(allocation::get_end_date_option).post(allocation::post_end_date_option),
        )
        .route(
            "/activities/allocations/{journey_id}/end-date",
            get(allocation::get_end_date).post(allocation::post_end_date),
        )
        .route(
            "/activities/allocations/{journey_id}/check-answers",
            get(allocation::get_check_answers).post(allocation::post_check_answers),
        )
        .route(
            "/activities/allocations/{journey_id}/confirmation",
            get(allocation::get_confirmation),
        );

    let protected = Router::new()
        .route("/", get(get_home))
        .merge(appointments)
        .merge(allocations)
        .route(
            "/activities/attendance/activities/{instance_id}/attendance-list",
            get(get_attendance_list),
        )
        .route(
            "/activities/attendance/activities/{instance_id}/attended",
            axum::routing::post(post_attended),
        )
        .route_layer(middleware::from_fn(require_sign_in));

    Router::new()
        .route("/sign-in", get(sign_in))
        .route("/sign-in/callback", get(callback))
        .route("/sign-out", get(sign_out))
        .route("/health", get(get_health))
        .merge(protected)
        .layer(middleware::from_fn_with_state(state.clone(), handle_errors))
        .layer(session)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
