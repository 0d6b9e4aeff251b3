use std::sync::{Arc, Mutex};

use super::*;

fn activities_api(seen: Arc<Mutex<Option<Value>>>) -> Router {
    Router::new()
        .route(
            "/schedules/{id}",
            get(|Path(id): Path<i64>| async move {
                Json(fixture::activities::schedule(id, "2024-01-01", None))
            }),
        )
        .route(
            "/schedules/{id}/allocations",
            post(move |Json(body): Json<Value>| async move {
                *seen.lock().unwrap() = Some(body);
                Json(fixture::activities::allocation(99))
            }),
        )
}

/// Signs in and starts an allocation, returning the journey's step base path.
async fn start(app: &mut TestApp) -> String {
    app.sign_in().await;

    let response = app
        .get("/activities/allocations/create/prisoner/A1234BC?scheduleId=7")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    location(&response)
        .strip_suffix("/pay-band")
        .unwrap()
        .to_string()
}

/// Tests a whole allocation without an end date.
///
/// Expected: allocation created with the chosen band and start, confirmation flashed
#[tokio::test]
async fn allocates_prisoner() -> Result<(), AppError> {
    let seen: Arc<Mutex<Option<Value>>> = Arc::default();
    let mut test = builder()
        .with_activities_api(activities_api(seen.clone()))
        .with_prison_api(prison_api())
        .build()
        .await
        .unwrap();
    let mut app = TestApp::new(&mut test).await;
    let base = start(&mut app).await;
    let (start_date, start) = days_from_today(7);

    let view = json(app.get(&format!("{}/pay-band", base)).await).await;
    assert_eq!(view["journey"]["prisoner"]["incentiveLevel"], "Standard");
    assert_eq!(view["journey"]["payRates"].as_array().unwrap().len(), 2);

    let response = app
        .post(
            &format!("{}/pay-band", base),
            &format!("payBand={}", fixture::activities::STANDARD_PAY_BAND_ID),
        )
        .await;
    assert_eq!(location(&response), format!("{}/start-date", base));

    let response = app
        .post(&format!("{}/start-date", base), &format!("startDate={}", start_date))
        .await;
    assert_eq!(location(&response), format!("{}/end-date-option", base));

    let response = app
        .post(&format!("{}/end-date-option", base), "endDateOption=NO")
        .await;
    assert_eq!(location(&response), format!("{}/check-answers", base));

    let response = app.post(&format!("{}/check-answers", base), "").await;
    assert_eq!(location(&response), format!("{}/confirmation", base));

    let body = seen.lock().unwrap().clone().unwrap();
    assert_eq!(body["prisonerNumber"], "A1234BC");
    assert_eq!(body["payBandId"], fixture::activities::STANDARD_PAY_BAND_ID);
    assert_eq!(body["startDate"], start.format("%Y-%m-%d").to_string());
    assert!(body["endDate"].is_null());

    let view = json(app.get(&format!("{}/confirmation", base)).await).await;
    assert_eq!(view["confirmation"]["allocationId"], 99);
    assert_eq!(view["successMessage"], "You have allocated John Smith to Maths");

    let response = app.get(&format!("{}/check-answers", base)).await;
    assert_eq!(location(&response), "/");

    Ok(())
}

/// Tests a pay band not offered at the prisoner's incentive level.
///
/// Expected: 303 back with a pay rate error
#[tokio::test]
async fn rejects_pay_band_for_other_level() -> Result<(), AppError> {
    let mut test = builder()
        .with_activities_api(activities_api(Arc::default()))
        .with_prison_api(prison_api())
        .build()
        .await
        .unwrap();
    let mut app = TestApp::new(&mut test).await;
    let base = start(&mut app).await;

    let response = app
        .post(
            &format!("{}/pay-band", base),
            &format!("payBand={}", fixture::activities::BASIC_PAY_BAND_ID),
        )
        .await;
    assert_eq!(location(&response), format!("{}/pay-band", base));

    let view = json(app.get(&format!("{}/pay-band", base)).await).await;
    assert_eq!(view["validationErrors"][0]["message"], "Select a pay rate");
    assert_eq!(
        view["formResponses"]["payBand"],
        fixture::activities::BASIC_PAY_BAND_ID.to_string()
    );
    assert!(view["journey"]["pay"].is_null());

    Ok(())
}

/// Tests a start date that is not in the future.
///
/// Expected: 303 back with a future date error
#[tokio::test]
async fn rejects_start_date_today() -> Result<(), AppError> {
    let mut test = builder()
        .with_activities_api(activities_api(Arc::default()))
        .with_prison_api(prison_api())
        .build()
        .await
        .unwrap();
    let mut app = TestApp::new(&mut test).await;
    let base = start(&mut app).await;
    let (today, _) = days_from_today(0);

    let response = app
        .post(&format!("{}/start-date", base), &format!("startDate={}", today))
        .await;
    assert_eq!(location(&response), format!("{}/start-date", base));

    let view = json(app.get(&format!("{}/start-date", base)).await).await;
    assert_eq!(
        view["validationErrors"][0]["message"],
        "Enter a date in the future"
    );

    Ok(())
}

/// Tests choosing an end date routes through the end date step.
///
/// Expected: end-date-option YES goes to end-date, an earlier end date is refused
#[tokio::test]
async fn end_date_must_follow_start_date() -> Result<(), AppError> {
    let mut test = builder()
        .with_activities_api(activities_api(Arc::default()))
        .with_prison_api(prison_api())
        .build()
        .await
        .unwrap();
    let mut app = TestApp::new(&mut test).await;
    let base = start(&mut app).await;
    let (start_date, _) = days_from_today(10);
    let (early_end, _) = days_from_today(5);
    let (end_date, _) = days_from_today(40);

    app.post(&format!("{}/start-date", base), &format!("startDate={}", start_date))
        .await;

    let response = app
        .post(&format!("{}/end-date-option", base), "endDateOption=YES")
        .await;
    assert_eq!(location(&response), format!("{}/end-date", base));

    let response = app
        .post(&format!("{}/end-date", base), &format!("endDate={}", early_end))
        .await;
    assert_eq!(location(&response), format!("{}/end-date", base));
    let view = json(app.get(&format!("{}/end-date", base)).await).await;
    assert_eq!(
        view["validationErrors"][0]["message"],
        "Enter a date on or after the allocation start date"
    );

    let response = app
        .post(&format!("{}/end-date", base), &format!("endDate={}", end_date))
        .await;
    assert_eq!(location(&response), format!("{}/check-answers", base));

    Ok(())
}

/// Tests moving the start date past the chosen end date from check answers.
///
/// Expected: detour to end-date keeping preserveHistory, submitted end follows start
#[tokio::test]
async fn later_start_date_asks_for_end_date_again() -> Result<(), AppError> {
    let seen: Arc<Mutex<Option<Value>>> = Arc::default();
    let mut test = builder()
        .with_activities_api(activities_api(seen.clone()))
        .with_prison_api(prison_api())
        .build()
        .await
        .unwrap();
    let mut app = TestApp::new(&mut test).await;
    let base = start(&mut app).await;
    let (start_date, _) = days_from_today(7);
    let (end_date, _) = days_from_today(10);
    let (later_start_date, later_start) = days_from_today(20);
    let (later_end_date, later_end) = days_from_today(30);

    app.post(
        &format!("{}/pay-band", base),
        &format!("payBand={}", fixture::activities::STANDARD_PAY_BAND_ID),
    )
    .await;
    app.post(&format!("{}/start-date", base), &format!("startDate={}", start_date))
        .await;
    app.post(&format!("{}/end-date-option", base), "endDateOption=YES")
        .await;
    let response = app
        .post(&format!("{}/end-date", base), &format!("endDate={}", end_date))
        .await;
    assert_eq!(location(&response), format!("{}/check-answers", base));

    let response = app
        .post(
            &format!("{}/start-date?preserveHistory=true", base),
            &format!("startDate={}", later_start_date),
        )
        .await;
    assert_eq!(
        location(&response),
        format!("{}/end-date?preserveHistory=true", base)
    );

    let view = json(app.get(&format!("{}/end-date", base)).await).await;
    assert!(view["journey"]["endDate"].is_null());

    let response = app
        .post(
            &format!("{}/end-date?preserveHistory=true", base),
            &format!("endDate={}", later_end_date),
        )
        .await;
    assert_eq!(location(&response), format!("{}/check-answers", base));

    app.post(&format!("{}/check-answers", base), "").await;

    let body = seen.lock().unwrap().clone().unwrap();
    assert_eq!(body["startDate"], later_start.format("%Y-%m-%d").to_string());
    assert_eq!(body["endDate"], later_end.format("%Y-%m-%d").to_string());

    Ok(())
}

/// Tests allocating a prisoner the prison API does not know.
///
/// Expected: 404 error view
#[tokio::test]
async fn unknown_prisoner_is_not_found() -> Result<(), AppError> {
    let mut test = builder()
        .with_activities_api(activities_api(Arc::default()))
        .with_prison_api(prison_api())
        .build()
        .await
        .unwrap();
    let mut app = TestApp::new(&mut test).await;
    app.sign_in().await;

    let response = app
        .get("/activities/allocations/create/prisoner/Z9999ZZ?scheduleId=7")
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json(response).await["status"], 404);

    Ok(())
}
