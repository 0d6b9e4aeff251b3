use thiserror::Error;

/// Errors raised while setting up a test environment.
#[derive(Error, Debug)]
pub enum TestError {
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    /// Failed to bind or inspect a mock API listener.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Session(#[from] tower_sessions::session::Error),
}
