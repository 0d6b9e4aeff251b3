use std::sync::{Arc, OnceLock};

use axum::{
    extract::{FromRequest, FromRequestParts, Request},
    http::{header::REFERER, HeaderMap, Uri},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use dioxus_logger::tracing;
use tower_sessions::Session;
use url::Url;

use crate::server::{
    middleware::session::FlashSession,
    model::form::{FormInput, FormValues},
};

/// Form body parsed and validated into `T`.
///
/// On validation failure the field errors and submitted values are flashed to
/// the session and the request is answered with a 303 back to the page the
/// form was posted from (see `back_location`), so the GET handler can
/// re-render the form. Must be the last
/// extractor of a handler since it consumes the body.
pub struct ValidatedForm<T>(pub T);

/// Request extension through which `ValidatedForm` hands the submitted values
/// back to the error layer.
///
/// Lets a validation failure raised by the handler itself (an unknown prisoner,
/// a date outside the schedule) echo the submitted values like an extractor
/// failure does.
#[derive(Clone, Default)]
pub struct SubmittedForm(Arc<OnceLock<FormValues>>);

impl SubmittedForm {
    pub fn record(&self, values: &FormValues) {
        let _ = self.0.set(values.clone());
    }

    pub fn values(&self) -> Option<&FormValues> {
        self.0.get()
    }
}

impl<S, T> FromRequest<S> for ValidatedForm<T>
where
    S: Send + Sync,
    T: FormInput + Send,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        let session = Session::from_request_parts(&mut parts, state)
            .await
            .map_err(IntoResponse::into_response)?;
        let back = back_location(&parts.headers, &parts.uri);
        let submitted = parts.extensions.get::<SubmittedForm>().cloned();

        let Form(values) = Form::<FormValues>::from_request(Request::from_parts(parts, body), state)
            .await
            .map_err(IntoResponse::into_response)?;

        if let Some(submitted) = submitted {
            submitted.record(&values);
        }

        match T::parse(&values) {
            Ok(form) => Ok(Self(form)),
            Err(errors) => {
                tracing::debug!("{} on {}", errors, back);

                FlashSession::new(&session)
                    .set_validation_failure(&errors, &values)
                    .await
                    .map_err(IntoResponse::into_response)?;

                Err(Redirect::to(&back).into_response())
            }
        }
    }
}

/// Where to send the browser after a failed submission.
///
/// The path and query of the `Referer` header when present, otherwise the
/// request's own path and query. Only the path is ever taken from the
/// referer so the redirect stays on this service.
pub fn back_location(headers: &HeaderMap, uri: &Uri) -> String {
    let referer = headers
        .get(REFERER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| {
            if value.starts_with('/') && !value.starts_with("//") {
                return Some(value.to_string());
            }
            let url = Url::parse(value).ok()?;
            Some(match url.query() {
                Some(query) => format!("{}?{}", url.path(), query),
                None => url.path().to_string(),
            })
        });

    referer.unwrap_or_else(|| {
        uri.path_and_query()
            .map(|path| path.as_str().to_string())
            .unwrap_or_else(|| "/".to_string())
    })
}
