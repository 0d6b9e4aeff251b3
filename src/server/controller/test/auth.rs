use super::*;

/// Tests the health check needs no sign-in.
///
/// Expected: 200 {"status":"UP"}
#[tokio::test]
async fn health_is_public() -> Result<(), AppError> {
    let mut test = TestBuilder::new().build().await.unwrap();
    let mut app = TestApp::new(&mut test).await;

    let response = app.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json(response).await["status"], "UP");

    Ok(())
}

/// Tests protected pages send anonymous users to sign in.
///
/// Expected: 303 to /sign-in
#[tokio::test]
async fn anonymous_request_redirects_to_sign_in() -> Result<(), AppError> {
    let mut test = TestBuilder::new().build().await.unwrap();
    let mut app = TestApp::new(&mut test).await;

    let response = app.get("/").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/sign-in");

    Ok(())
}

/// Tests sign-in redirects to the auth server's authorize endpoint.
///
/// Expected: 303 to /auth/oauth/authorize with a state parameter
#[tokio::test]
async fn sign_in_redirects_to_auth_server() -> Result<(), AppError> {
    let mut test = builder().build().await.unwrap();
    let auth_url = test.auth_url();
    let mut app = TestApp::new(&mut test).await;

    let response = app.get("/sign-in").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let target = location(&response);
    assert!(target.starts_with(&format!("{}/auth/oauth/authorize", auth_url)));
    assert!(target.contains("state="));

    Ok(())
}

/// Tests the full sign-in flow.
///
/// Expected: callback redirects home, home shows the signed-in user
#[tokio::test]
async fn sign_in_flow_establishes_user() -> Result<(), AppError> {
    let mut test = builder().build().await.unwrap();
    let mut app = TestApp::new(&mut test).await;

    let response = app.sign_in().await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let response = app.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let home = json(response).await;
    assert_eq!(home["user"]["username"], fixture::users::DEFAULT_USERNAME);
    assert_eq!(home["user"]["activeCaseLoadId"], "MDI");

    Ok(())
}

/// Tests sign-in returns the user to the page they first asked for.
///
/// Expected: callback redirects to the original path
#[tokio::test]
async fn sign_in_returns_to_requested_page() -> Result<(), AppError> {
    let mut test = builder().build().await.unwrap();
    let mut app = TestApp::new(&mut test).await;

    let response = app
        .get("/activities/attendance/activities/5/attendance-list")
        .await;
    assert_eq!(location(&response), "/sign-in");

    let response = app.sign_in().await;

    assert_eq!(
        location(&response),
        "/activities/attendance/activities/5/attendance-list"
    );

    Ok(())
}

/// Tests a callback whose state does not match the session.
///
/// Expected: 400 error view
#[tokio::test]
async fn callback_rejects_mismatched_state() -> Result<(), AppError> {
    let mut test = builder().build().await.unwrap();
    let mut app = TestApp::new(&mut test).await;

    app.get("/sign-in").await;
    let response = app
        .get("/sign-in/callback?code=auth-code&state=forged")
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let page = json(response).await;
    assert_eq!(page["status"], 400);

    Ok(())
}

/// Tests signing out ends the session.
///
/// Expected: 303 to the auth server's sign-out, then protected pages need sign-in again
#[tokio::test]
async fn sign_out_clears_session() -> Result<(), AppError> {
    let mut test = builder().build().await.unwrap();
    let auth_url = test.auth_url();
    let mut app = TestApp::new(&mut test).await;
    app.sign_in().await;

    let response = app.get("/sign-out").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with(&format!("{}/auth/sign-out", auth_url)));

    let response = app.get("/").await;
    assert_eq!(location(&response), "/sign-in");

    Ok(())
}
