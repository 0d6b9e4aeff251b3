use axum::{response::IntoResponse, Extension, Json};
use tower_sessions::Session;

use crate::{
    model::user::HomeDto,
    server::{error::AppError, middleware::session::FlashSession, model::user::AuthenticatedUser},
};

/// Landing page with any pending flash feedback.
pub async fn get_home(
    Extension(user): Extension<AuthenticatedUser>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let feedback = FlashSession::new(&session).take().await?;

    Ok(Json(HomeDto {
        user: user.into_dto(),
        feedback,
    }))
}
