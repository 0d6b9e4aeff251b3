use chrono::{NaiveDate, NaiveTime};

use super::*;
use crate::server::{
    model::{
        appointment::{CreateAppointmentJourney, JourneyPrisoner},
        form::YesNo,
        recurrence::RepeatFrequency,
    },
    service::appointment::AppointmentService,
};

fn activities_api(recorder: Recorder) -> Router {
    Router::new()
        .route(
            "/appointment-categories",
            get(|| async { Json(fixture::activities::appointment_categories()) }),
        )
        .route(
            "/appointment-locations/{prison_code}",
            get(|Path(prison_code): Path<String>| async move {
                Json(fixture::activities::appointment_locations(&prison_code))
            }),
        )
        .route(
            "/appointment-series",
            post(move |Json(body): Json<Value>| async move {
                recorder.record(body);
                Json(fixture::activities::appointment_series(55))
            }),
        )
}

/// Journey answered up to check answers, repeating weekly four times.
async fn completed_journey(service: &AppointmentService<'_>) -> CreateAppointmentJourney {
    CreateAppointmentJourney {
        prisoner: service.find_prisoner("A1234BC").await.unwrap(),
        category: service.find_category("CHAP").await.unwrap(),
        location: service.find_location(26149).await.unwrap(),
        start_date: NaiveDate::from_ymd_opt(2030, 1, 7),
        start_time: NaiveTime::from_hms_opt(9, 0, 0),
        end_time: NaiveTime::from_hms_opt(10, 30, 0),
        repeat: Some(YesNo::Yes),
        frequency: Some(RepeatFrequency::Weekly),
        number_of_appointments: Some(4),
        ..CreateAppointmentJourney::individual()
    }
}

/// Tests a known prisoner is mapped for the journey.
///
/// Expected: Ok(Some) with full name and cell
#[tokio::test]
async fn finds_prisoner() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_prison_api(prison_api())
        .build()
        .await
        .unwrap();
    let (http, urls, user) = (reqwest::Client::new(), api_urls(&test), user());

    let prisoner = AppointmentService::new(&http, &urls, &user)
        .find_prisoner("A1234BC")
        .await?;

    assert_eq!(
        prisoner,
        Some(JourneyPrisoner {
            number: "A1234BC".to_string(),
            name: "John Smith".to_string(),
            cell_location: Some("1-1-001".to_string()),
        })
    );

    Ok(())
}

/// Tests an unknown prisoner number.
///
/// Expected: Ok(None)
#[tokio::test]
async fn unknown_prisoner_is_none() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_prison_api(prison_api())
        .build()
        .await
        .unwrap();
    let (http, urls, user) = (reqwest::Client::new(), api_urls(&test), user());

    let prisoner = AppointmentService::new(&http, &urls, &user)
        .find_prisoner("Z9999ZZ")
        .await?;

    assert_eq!(prisoner, None);

    Ok(())
}

/// Tests locations come from the user's active caseload.
///
/// Expected: every location is in MDI
#[tokio::test]
async fn locations_use_active_caseload() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activities_api(activities_api(Recorder::default()))
        .build()
        .await
        .unwrap();
    let (http, urls, user) = (reqwest::Client::new(), api_urls(&test), user());

    let locations = AppointmentService::new(&http, &urls, &user)
        .get_locations()
        .await?;

    assert_eq!(locations.len(), 2);
    assert!(locations.iter().all(|l| l.prison_code == "MDI"));

    Ok(())
}

/// Tests category and location lookups only accept listed values.
///
/// Expected: listed values found, others None
#[tokio::test]
async fn finds_only_listed_category_and_location() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activities_api(activities_api(Recorder::default()))
        .build()
        .await
        .unwrap();
    let (http, urls, user) = (reqwest::Client::new(), api_urls(&test), user());
    let service = AppointmentService::new(&http, &urls, &user);

    assert_eq!(
        service.find_category("GYMW").await?.map(|c| c.description),
        Some("Gym - Weights".to_string())
    );
    assert_eq!(service.find_category("NOPE").await?, None);
    assert!(service.find_location(26150).await?.is_some());
    assert_eq!(service.find_location(1).await?, None);

    Ok(())
}

/// Tests creating a repeating appointment series.
///
/// Expected: Ok(series) and the request carries prison, prisoner and schedule
#[tokio::test]
async fn creates_appointment_series() -> Result<(), AppError> {
    let recorder = Recorder::default();
    let test = TestBuilder::new()
        .with_activities_api(activities_api(recorder.clone()))
        .with_prison_api(prison_api())
        .build()
        .await
        .unwrap();
    let (http, urls, user) = (reqwest::Client::new(), api_urls(&test), user());
    let service = AppointmentService::new(&http, &urls, &user);

    let journey = completed_journey(&service).await;
    let series = service.create(&journey).await?;

    assert_eq!(series.id, 55);
    let body = recorder.last().unwrap();
    assert_eq!(body["appointmentType"], "INDIVIDUAL");
    assert_eq!(body["prisonCode"], "MDI");
    assert_eq!(body["prisonerNumbers"], serde_json::json!(["A1234BC"]));
    assert_eq!(body["categoryCode"], "CHAP");
    assert_eq!(body["internalLocationId"], 26149);
    assert_eq!(body["startDate"], "2030-01-07");
    assert_eq!(body["startTime"], "09:00");
    assert_eq!(body["endTime"], "10:30");
    assert_eq!(body["schedule"]["frequency"], "WEEKLY");
    assert_eq!(body["schedule"]["numberOfAppointments"], 4);

    Ok(())
}

/// Tests an incomplete journey is refused before calling the API.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn incomplete_journey_is_refused() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let (http, urls, user) = (reqwest::Client::new(), api_urls(&test), user());

    let result = AppointmentService::new(&http, &urls, &user)
        .create(&CreateAppointmentJourney::individual())
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}
