mod model;
mod server;

use dioxus_logger::tracing::{self, Level};
use tokio::net::TcpListener;

use crate::server::{config::Config, error::AppError, router, startup};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let level = if config.production {
        Level::INFO
    } else {
        Level::DEBUG
    };
    if let Err(e) = dioxus_logger::init(level) {
        eprintln!("Failed to initialise logger: {}", e);
    }

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db, &config).await?;
    let state = startup::build_state(&config)?;

    let app = router::router(state, session);

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!("Starting server on port {}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
