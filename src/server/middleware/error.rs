use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use dioxus_logger::tracing;
use tower_sessions::Session;

use crate::{
    model::api::ErrorPageDto,
    server::{
        error::{ErrorPage, InternalServerError, SignOut},
        middleware::{
            session::{AuthSession, FlashSession},
            validation::{back_location, SubmittedForm},
        },
        model::form::ValidationErrors,
        state::AppState,
    },
};

/// Terminal error handler.
///
/// Inspects the marker extension left by `AppError::into_response`:
/// - `ValidationErrors` - Flashed with the submitted values when a
///   `ValidatedForm` recorded them, then 303 back to the submitting page
/// - `SignOut` - Session cleared, GET paths remembered as the return path, 303 to `/sign-in`
/// - `ErrorPage` - Error view with status and message; the stack only outside production
///
/// Responses without a marker pass through untouched.
pub async fn handle_errors(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let location = request
        .uri()
        .path_and_query()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());
    let back = back_location(request.headers(), request.uri());
    let submitted = SubmittedForm::default();
    request.extensions_mut().insert(submitted.clone());

    let response = next.run(request).await;

    if let Some(errors) = response.extensions().get::<ValidationErrors>() {
        let flash = FlashSession::new(&session);
        let flashed = match submitted.values() {
            Some(values) => flash.set_validation_failure(errors, values).await,
            None => flash.set_validation_errors(errors).await,
        };
        if let Err(e) = flashed {
            return InternalServerError(e).into_response();
        }
        return Redirect::to(&back).into_response();
    }

    if response.extensions().get::<SignOut>().is_some() {
        let auth_session = AuthSession::new(&session);
        auth_session.clear().await;

        if method == Method::GET {
            if let Err(e) = auth_session.set_return_to(location).await {
                return InternalServerError(e).into_response();
            }
        }

        tracing::debug!("Signed out, redirecting to sign in");
        return Redirect::to("/sign-in").into_response();
    }

    if let Some(page) = response.extensions().get::<ErrorPage>().cloned() {
        let body = ErrorPageDto {
            status: page.status.as_u16(),
            message: page.message,
            stack: (!state.production).then_some(page.stack),
        };
        return (page.status, Json(body)).into_response();
    }

    response
}
