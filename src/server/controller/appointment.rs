//! Appointment creation journey handlers.
//!
//! Every step lives under `/appointments/create/{journey_id}/`. GET handlers
//! render from the journey state; POST handlers validate, record the answer and
//! move on (or back to check answers when a change link was followed).

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
    Extension, Json,
};
use tower_sessions::Session;

use crate::{
    model::appointment::{
        AppointmentCheckAnswersView, AppointmentDetailsView, AppointmentStepView,
        CategoryStepView, LocationStepView, RepeatFrequencyStepView,
    },
    server::{
        controller::param::{StepQuery, StepRedirect},
        error::AppError,
        middleware::{
            journey::JourneyId,
            session::{FlashSession, JourneySession},
            validation::ValidatedForm,
        },
        model::{
            appointment::{
                CategoryForm, CreateAppointmentJourney, DateAndTimeForm, ExtraInformationForm,
                LocationForm, RepeatForm, RepeatFrequencyAndCountForm, SelectPrisonerForm,
                MAX_NUMBER_OF_APPOINTMENTS,
            },
            form::{ValidationErrors, YesNo},
            recurrence::RepeatFrequency,
            user::AuthenticatedUser,
        },
        service::appointment::AppointmentService,
        state::AppState,
    },
};

const CREATE_APPOINTMENT_BASE: &str = "/appointments/create";

fn steps(journey_id: &JourneyId, query: StepQuery) -> StepRedirect<'_> {
    StepRedirect::new(CREATE_APPOINTMENT_BASE, journey_id, query)
}

/// Loads the journey and the pending flash feedback for a plain step view.
///
/// Flash feedback is taken first so it is consumed even when the journey has
/// gone and the request is redirected away.
async fn step_view(session: &Session, journey_id: &JourneyId) -> Result<AppointmentStepView, AppError> {
    let feedback = FlashSession::new(session).take().await?;
    let journey = JourneySession::new(session, journey_id.as_str())
        .require::<CreateAppointmentJourney>()
        .await?;

    Ok(AppointmentStepView {
        journey_id: journey_id.0.clone(),
        journey,
        feedback,
    })
}

/// Starts a new individual appointment journey under a fresh journey id.
pub async fn start_individual(session: Session) -> Result<impl IntoResponse, AppError> {
    let journey_id = JourneyId::generate();

    JourneySession::new(&session, journey_id.as_str())
        .set(&CreateAppointmentJourney::individual())
        .await?;

    Ok(steps(&journey_id, StepQuery::default()).next("select-prisoner"))
}

pub async fn get_select_prisoner(
    session: Session,
    journey_id: JourneyId,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(step_view(&session, &journey_id).await?))
}

/// Records the prisoner after looking them up in the prison API.
///
/// An unknown prisoner number is reported against `prisonerNumber`.
pub async fn post_select_prisoner(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    session: Session,
    journey_id: JourneyId,
    Query(query): Query<StepQuery>,
    ValidatedForm(form): ValidatedForm<SelectPrisonerForm>,
) -> Result<impl IntoResponse, AppError> {
    let journeys = JourneySession::new(&session, journey_id.as_str());
    let mut journey = journeys.require::<CreateAppointmentJourney>().await?;

    let Some(prisoner) = AppointmentService::new(&state.http_client, &state.api_urls, &user)
        .find_prisoner(&form.prisoner_number)
        .await?
    else {
        return Err(AppError::Validation(ValidationErrors::single(
            "prisonerNumber",
            "The prisoner could not be found",
        )));
    };

    journey.prisoner = Some(prisoner);
    journeys.set(&journey).await?;

    Ok(steps(&journey_id, query).next("category"))
}

pub async fn get_category(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    session: Session,
    journey_id: JourneyId,
) -> Result<impl IntoResponse, AppError> {
    let view = step_view(&session, &journey_id).await?;
    let categories = AppointmentService::new(&state.http_client, &state.api_urls, &user)
        .get_categories()
        .await?;

    Ok(Json(CategoryStepView {
        journey_id: view.journey_id,
        journey: view.journey,
        categories,
        feedback: view.feedback,
    }))
}

pub async fn post_category(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    session: Session,
    journey_id: JourneyId,
    Query(query): Query<StepQuery>,
    ValidatedForm(form): ValidatedForm<CategoryForm>,
) -> Result<impl IntoResponse, AppError> {
    let journeys = JourneySession::new(&session, journey_id.as_str());
    let mut journey = journeys.require::<CreateAppointmentJourney>().await?;

    let Some(category) = AppointmentService::new(&state.http_client, &state.api_urls, &user)
        .find_category(&form.category_code)
        .await?
    else {
        return Err(AppError::Validation(ValidationErrors::single(
            "categoryCode",
            "Select a category",
        )));
    };

    journey.category = Some(category);
    journeys.set(&journey).await?;

    Ok(steps(&journey_id, query).next("location"))
}

pub async fn get_location(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    session: Session,
    journey_id: JourneyId,
) -> Result<impl IntoResponse, AppError> {
    let view = step_view(&session, &journey_id).await?;
    let locations = AppointmentService::new(&state.http_client, &state.api_urls, &user)
        .get_locations()
        .await?;

    Ok(Json(LocationStepView {
        journey_id: view.journey_id,
        journey: view.journey,
        locations,
        feedback: view.feedback,
    }))
}

pub async fn post_location(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    session: Session,
    journey_id: JourneyId,
    Query(query): Query<StepQuery>,
    ValidatedForm(form): ValidatedForm<LocationForm>,
) -> Result<impl IntoResponse, AppError> {
    let journeys = JourneySession::new(&session, journey_id.as_str());
    let mut journey = journeys.require::<CreateAppointmentJourney>().await?;

    let Some(location) = AppointmentService::new(&state.http_client, &state.api_urls, &user)
        .find_location(form.location_id)
        .await?
    else {
        return Err(AppError::Validation(ValidationErrors::single(
            "locationId",
            "Select a location",
        )));
    };

    journey.location = Some(location);
    journeys.set(&journey).await?;

    Ok(steps(&journey_id, query).next("date-and-time"))
}

pub async fn get_date_and_time(
    session: Session,
    journey_id: JourneyId,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(step_view(&session, &journey_id).await?))
}

pub async fn post_date_and_time(
    session: Session,
    journey_id: JourneyId,
    Query(query): Query<StepQuery>,
    ValidatedForm(form): ValidatedForm<DateAndTimeForm>,
) -> Result<impl IntoResponse, AppError> {
    let journeys = JourneySession::new(&session, journey_id.as_str());
    let mut journey = journeys.require::<CreateAppointmentJourney>().await?;

    journey.start_date = Some(form.start_date);
    journey.start_time = Some(form.start_time);
    journey.end_time = form.end_time;
    journeys.set(&journey).await?;

    Ok(steps(&journey_id, query).next("repeat"))
}

pub async fn get_repeat(
    session: Session,
    journey_id: JourneyId,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(step_view(&session, &journey_id).await?))
}

/// Records whether the appointment repeats.
///
/// `YES` continues to the frequency step; when changing the answer from check
/// answers it only detours there if no frequency has been chosen yet. `NO`
/// discards any frequency and count.
pub async fn post_repeat(
    session: Session,
    journey_id: JourneyId,
    Query(query): Query<StepQuery>,
    ValidatedForm(form): ValidatedForm<RepeatForm>,
) -> Result<Redirect, AppError> {
    let journeys = JourneySession::new(&session, journey_id.as_str());
    let mut journey = journeys.require::<CreateAppointmentJourney>().await?;

    journey.repeat = Some(form.repeat);
    if form.repeat == YesNo::No {
        journey.frequency = None;
        journey.number_of_appointments = None;
    }
    journeys.set(&journey).await?;

    let steps = steps(&journey_id, query);
    Ok(match form.repeat {
        YesNo::Yes if journey.schedule().is_none() => steps.detour("repeat-frequency-and-count"),
        YesNo::Yes => steps.next("repeat-frequency-and-count"),
        YesNo::No => steps.next("extra-information"),
    })
}

pub async fn get_repeat_frequency_and_count(
    session: Session,
    journey_id: JourneyId,
) -> Result<impl IntoResponse, AppError> {
    let view = step_view(&session, &journey_id).await?;

    Ok(Json(RepeatFrequencyStepView {
        journey_id: view.journey_id,
        journey: view.journey,
        frequencies: RepeatFrequency::ALL.to_vec(),
        max_number_of_appointments: MAX_NUMBER_OF_APPOINTMENTS,
        feedback: view.feedback,
    }))
}

pub async fn post_repeat_frequency_and_count(
    session: Session,
    journey_id: JourneyId,
    Query(query): Query<StepQuery>,
    ValidatedForm(form): ValidatedForm<RepeatFrequencyAndCountForm>,
) -> Result<impl IntoResponse, AppError> {
    let journeys = JourneySession::new(&session, journey_id.as_str());
    let mut journey = journeys.require::<CreateAppointmentJourney>().await?;

    journey.frequency = Some(form.frequency);
    journey.number_of_appointments = Some(form.number_of_appointments);
    journeys.set(&journey).await?;

    Ok(steps(&journey_id, query).next("extra-information"))
}

pub async fn get_extra_information(
    session: Session,
    journey_id: JourneyId,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(step_view(&session, &journey_id).await?))
}

pub async fn post_extra_information(
    session: Session,
    journey_id: JourneyId,
    Query(query): Query<StepQuery>,
    ValidatedForm(form): ValidatedForm<ExtraInformationForm>,
) -> Result<impl IntoResponse, AppError> {
    let journeys = JourneySession::new(&session, journey_id.as_str());
    let mut journey = journeys.require::<CreateAppointmentJourney>().await?;

    journey.extra_information = form.extra_information;
    journeys.set(&journey).await?;

    Ok(steps(&journey_id, query).next("check-answers"))
}

/// Summary of every answer plus the date of the last appointment.
pub async fn get_check_answers(
    session: Session,
    journey_id: JourneyId,
) -> Result<impl IntoResponse, AppError> {
    let view = step_view(&session, &journey_id).await?;

    let number_of_appointments = view
        .journey
        .schedule()
        .map(|schedule| schedule.number_of_appointments)
        .unwrap_or(1);

    Ok(Json(AppointmentCheckAnswersView {
        end_date: view.journey.end_date(),
        number_of_appointments,
        journey_id: view.journey_id,
        journey: view.journey,
        feedback: view.feedback,
    }))
}

/// Creates the appointment series and ends the journey.
pub async fn post_check_answers(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    session: Session,
    journey_id: JourneyId,
) -> Result<impl IntoResponse, AppError> {
    let journeys = JourneySession::new(&session, journey_id.as_str());
    let journey = journeys.require::<CreateAppointmentJourney>().await?;

    let series = AppointmentService::new(&state.http_client, &state.api_urls, &user)
        .create(&journey)
        .await?;

    journeys.clear::<CreateAppointmentJourney>().await?;

    let prisoner_name = journey
        .prisoner
        .map(|prisoner| prisoner.name)
        .unwrap_or_default();
    FlashSession::new(&session)
        .set_success(format!(
            "You have successfully created an appointment for {}",
            prisoner_name
        ))
        .await?;

    Ok(Redirect::to(&format!("/appointments/{}", series.id)))
}

pub async fn get_appointment_details(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    session: Session,
    Path(appointment_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let feedback = FlashSession::new(&session).take().await?;
    let appointment = AppointmentService::new(&state.http_client, &state.api_urls, &user)
        .get_details(appointment_id)
        .await?;

    Ok(Json(AppointmentDetailsView {
        appointment,
        feedback,
    }))
}
