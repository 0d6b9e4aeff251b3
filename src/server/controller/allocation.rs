//! Allocation journey handlers under `/activities/allocations`.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
    Extension, Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::allocation::{AllocationConfirmationView, AllocationStepView},
    server::{
        controller::param::{StepQuery, StepRedirect},
        error::AppError,
        middleware::{
            journey::JourneyId,
            session::{FlashSession, JourneySession},
            validation::ValidatedForm,
        },
        model::{
            allocation::{
                AllocateJourney, AllocationConfirmation, EndDateForm, EndDateOptionForm,
                PayBandForm, StartDateForm,
            },
            form::{today, ValidationErrors, YesNo},
            user::AuthenticatedUser,
        },
        service::allocation::AllocationService,
        state::AppState,
    },
};

const ALLOCATION_BASE: &str = "/activities/allocations";

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StartAllocationQuery {
    pub schedule_id: i64,
}

fn steps(journey_id: &JourneyId, query: StepQuery) -> StepRedirect<'_> {
    StepRedirect::new(ALLOCATION_BASE, journey_id, query)
}

async fn step_view(session: &Session, journey_id: &JourneyId) -> Result<AllocationStepView, AppError> {
    let feedback = FlashSession::new(session).take().await?;
    let journey = JourneySession::new(session, journey_id.as_str())
        .require::<AllocateJourney>()
        .await?;

    Ok(AllocationStepView {
        journey_id: journey_id.0.clone(),
        journey,
        feedback,
    })
}

/// Seeds a new allocation journey for a prisoner and schedule.
pub async fn start_allocation(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    session: Session,
    Path(prisoner_number): Path<String>,
    Query(params): Query<StartAllocationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let journey = AllocationService::new(&state.http_client, &state.api_urls, &user)
        .start(&prisoner_number, params.schedule_id)
        .await?;

    let journey_id = JourneyId::generate();
    JourneySession::new(&session, journey_id.as_str())
        .set(&journey)
        .await?;

    Ok(steps(&journey_id, StepQuery::default()).next("pay-band"))
}

/// Pay rates offered are in `journey.payRates`.
pub async fn get_pay_band(
    session: Session,
    journey_id: JourneyId,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(step_view(&session, &journey_id).await?))
}

pub async fn post_pay_band(
    session: Session,
    journey_id: JourneyId,
    Query(query): Query<StepQuery>,
    ValidatedForm(form): ValidatedForm<PayBandForm>,
) -> Result<impl IntoResponse, AppError> {
    let journeys = JourneySession::new(&session, journey_id.as_str());
    let mut journey = journeys.require::<AllocateJourney>().await?;

    let Some(pay) = journey.find_pay_rate(form.pay_band_id).cloned() else {
        return Err(AppError::Validation(ValidationErrors::single(
            "payBand",
            "Select a pay rate",
        )));
    };

    journey.pay = Some(pay);
    journeys.set(&journey).await?;

    Ok(steps(&journey_id, query).next("start-date"))
}

pub async fn get_start_date(
    session: Session,
    journey_id: JourneyId,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(step_view(&session, &journey_id).await?))
}

/// A later start than the chosen end date sends the user back to the end date.
pub async fn post_start_date(
    session: Session,
    journey_id: JourneyId,
    Query(query): Query<StepQuery>,
    ValidatedForm(form): ValidatedForm<StartDateForm>,
) -> Result<Redirect, AppError> {
    let journeys = JourneySession::new(&session, journey_id.as_str());
    let mut journey = journeys.require::<AllocateJourney>().await?;

    journey
        .validate_start_date(form.start_date, today())
        .map_err(AppError::Validation)?;

    let end_date_dropped = journey.set_start_date(form.start_date);
    journeys.set(&journey).await?;

    let steps = steps(&journey_id, query);
    Ok(if end_date_dropped {
        steps.detour("end-date")
    } else {
        steps.next("end-date-option")
    })
}

pub async fn get_end_date_option(
    session: Session,
    journey_id: JourneyId,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(step_view(&session, &journey_id).await?))
}

/// `YES` asks for the end date; `NO` drops any end date and goes to check answers.
pub async fn post_end_date_option(
    session: Session,
    journey_id: JourneyId,
    Query(query): Query<StepQuery>,
    ValidatedForm(form): ValidatedForm<EndDateOptionForm>,
) -> Result<Redirect, AppError> {
    let journeys = JourneySession::new(&session, journey_id.as_str());
    let mut journey = journeys.require::<AllocateJourney>().await?;

    journey.end_date_option = Some(form.end_date_option);
    if form.end_date_option == YesNo::No {
        journey.end_date = None;
    }
    journeys.set(&journey).await?;

    let steps = steps(&journey_id, query);
    Ok(match form.end_date_option {
        YesNo::Yes if journey.end_date.is_none() => steps.detour("end-date"),
        YesNo::Yes => steps.next("end-date"),
        YesNo::No => steps.next("check-answers"),
    })
}

pub async fn get_end_date(
    session: Session,
    journey_id: JourneyId,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(step_view(&session, &journey_id).await?))
}

pub async fn post_end_date(
    session: Session,
    journey_id: JourneyId,
    Query(query): Query<StepQuery>,
    ValidatedForm(form): ValidatedForm<EndDateForm>,
) -> Result<impl IntoResponse, AppError> {
    let journeys = JourneySession::new(&session, journey_id.as_str());
    let mut journey = journeys.require::<AllocateJourney>().await?;

    journey
        .validate_end_date(form.end_date)
        .map_err(AppError::Validation)?;

    journey.end_date = Some(form.end_date);
    journeys.set(&journey).await?;

    Ok(steps(&journey_id, query).next("check-answers"))
}

pub async fn get_check_answers(
    session: Session,
    journey_id: JourneyId,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(step_view(&session, &journey_id).await?))
}

/// Submits the allocation, swapping the journey for its confirmation.
pub async fn post_check_answers(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    session: Session,
    journey_id: JourneyId,
) -> Result<impl IntoResponse, AppError> {
    let journeys = JourneySession::new(&session, journey_id.as_str());
    let journey = journeys.require::<AllocateJourney>().await?;

    let confirmation = AllocationService::new(&state.http_client, &state.api_urls, &user)
        .submit(&journey)
        .await?;

    journeys.clear::<AllocateJourney>().await?;
    journeys.set(&confirmation).await?;

    FlashSession::new(&session)
        .set_success(format!(
            "You have allocated {} to {}",
            confirmation.prisoner_name, confirmation.activity_name
        ))
        .await?;

    Ok(Redirect::to(&format!(
        "{}/{}/confirmation",
        ALLOCATION_BASE,
        journey_id.as_str()
    )))
}

pub async fn get_confirmation(
    session: Session,
    journey_id: JourneyId,
) -> Result<impl IntoResponse, AppError> {
    let feedback = FlashSession::new(&session).take().await?;
    let confirmation = JourneySession::new(&session, journey_id.as_str())
        .require::<AllocationConfirmation>()
        .await?;

    Ok(Json(AllocationConfirmationView {
        confirmation,
        feedback,
    }))
}
