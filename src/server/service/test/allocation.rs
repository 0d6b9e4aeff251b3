use chrono::NaiveDate;

use super::*;
use crate::server::service::allocation::AllocationService;

fn activities_api(recorder: Recorder) -> Router {
    Router::new()
        .route(
            "/schedules/{id}",
            get(|Path(id): Path<i64>| async move {
                if id == 404 {
                    return not_found();
                }
                Json(fixture::activities::schedule(id, "2024-01-01", Some("2031-12-31")))
                    .into_response()
            }),
        )
        .route(
            "/schedules/{id}/allocations",
            post(move |Json(body): Json<Value>| async move {
                recorder.record(body);
                Json(fixture::activities::allocation(99))
            }),
        )
}

/// Tests a journey is seeded with the prisoner's pay rates.
///
/// Expected: Ok(journey) offering only the Standard rates
#[tokio::test]
async fn start_filters_pay_by_incentive_level() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activities_api(activities_api(Recorder::default()))
        .with_prison_api(prison_api())
        .build()
        .await
        .unwrap();
    let (http, urls, user) = (reqwest::Client::new(), api_urls(&test), user());

    let journey = AllocationService::new(&http, &urls, &user)
        .start("A1234BC", 7)
        .await?;

    assert_eq!(journey.prisoner.name, "John Smith");
    assert_eq!(journey.prisoner.incentive_level.as_deref(), Some("Standard"));
    assert_eq!(journey.activity.schedule_id, 7);
    assert_eq!(journey.activity.activity_id, 107);
    assert_eq!(journey.activity.name, "Maths");
    let bands: Vec<i64> = journey.pay_rates.iter().map(|p| p.prison_pay_band.id).collect();
    assert_eq!(
        bands,
        vec![
            fixture::activities::STANDARD_PAY_BAND_ID,
            fixture::activities::ENHANCED_PAY_BAND_ID
        ]
    );

    Ok(())
}

/// Tests every rate is offered when the incentive level is unknown.
///
/// Expected: Ok(journey) with all three rates
#[tokio::test]
async fn start_offers_all_pay_without_incentive_level() -> Result<(), AppError> {
    let prison = Router::new()
        .route(
            "/api/bookings/offenderNo/{number}",
            get(|| async { Json(fixture::prison::inmate_detail("C3456DE", 3, "Sam", "Jones")) }),
        )
        .route("/api/bookings/{booking_id}/iepSummary", get(|| async { not_found() }));
    let test = TestBuilder::new()
        .with_activities_api(activities_api(Recorder::default()))
        .with_prison_api(prison)
        .build()
        .await
        .unwrap();
    let (http, urls, user) = (reqwest::Client::new(), api_urls(&test), user());

    let journey = AllocationService::new(&http, &urls, &user)
        .start("C3456DE", 7)
        .await?;

    assert_eq!(journey.prisoner.incentive_level, None);
    assert_eq!(journey.pay_rates.len(), 3);

    Ok(())
}

/// Tests starting for an unknown prisoner.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn start_fails_for_unknown_prisoner() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activities_api(activities_api(Recorder::default()))
        .with_prison_api(prison_api())
        .build()
        .await
        .unwrap();
    let (http, urls, user) = (reqwest::Client::new(), api_urls(&test), user());

    let result = AllocationService::new(&http, &urls, &user)
        .start("Z9999ZZ", 7)
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests a missing schedule surfaces the upstream 404.
///
/// Expected: Err(UpstreamErr) with status 404
#[tokio::test]
async fn start_fails_for_unknown_schedule() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activities_api(activities_api(Recorder::default()))
        .with_prison_api(prison_api())
        .build()
        .await
        .unwrap();
    let (http, urls, user) = (reqwest::Client::new(), api_urls(&test), user());

    let result = AllocationService::new(&http, &urls, &user)
        .start("A1234BC", 404)
        .await;

    assert!(matches!(result, Err(AppError::UpstreamErr(e)) if e.is_not_found()));

    Ok(())
}

/// Tests submitting a completed journey.
///
/// Expected: Ok(confirmation) and the allocation request carries the answers
#[tokio::test]
async fn submit_creates_allocation() -> Result<(), AppError> {
    let recorder = Recorder::default();
    let test = TestBuilder::new()
        .with_activities_api(activities_api(recorder.clone()))
        .with_prison_api(prison_api())
        .build()
        .await
        .unwrap();
    let (http, urls, user) = (reqwest::Client::new(), api_urls(&test), user());
    let service = AllocationService::new(&http, &urls, &user);

    let mut journey = service.start("A1234BC", 7).await?;
    journey.pay = journey
        .find_pay_rate(fixture::activities::STANDARD_PAY_BAND_ID)
        .cloned();
    journey.start_date = NaiveDate::from_ymd_opt(2030, 3, 1);

    let confirmation = service.submit(&journey).await?;

    assert_eq!(confirmation.allocation_id, 99);
    assert_eq!(confirmation.prisoner_name, "John Smith");
    assert_eq!(confirmation.activity_name, "Maths");
    assert_eq!(confirmation.end_date, None);

    let body = recorder.last().unwrap();
    assert_eq!(body["prisonerNumber"], "A1234BC");
    assert_eq!(body["payBandId"], fixture::activities::STANDARD_PAY_BAND_ID);
    assert_eq!(body["startDate"], "2030-03-01");

    Ok(())
}

/// Tests submitting before a pay rate is chosen.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn submit_refuses_incomplete_journey() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activities_api(activities_api(Recorder::default()))
        .with_prison_api(prison_api())
        .build()
        .await
        .unwrap();
    let (http, urls, user) = (reqwest::Client::new(), api_urls(&test), user());
    let service = AllocationService::new(&http, &urls, &user);

    let journey = service.start("A1234BC", 7).await?;
    let result = service.submit(&journey).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}
