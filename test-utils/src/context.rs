use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;
use time::Duration;
use tower_sessions::{Expiry, Session};
use tower_sessions_sqlx_store::SqliteStore;

use crate::{error::TestError, mock::MockApi};

/// Address nothing listens on, used for APIs a test did not mock.
const UNREACHABLE_URL: &str = "http://127.0.0.1:9";

/// Test context containing the session database, a session and the running mock APIs.
///
/// The database and session are created lazily on first access and persist for
/// the lifetime of the test context. Mock APIs stop when the context is dropped.
#[derive(Default)]
pub struct TestContext {
    /// Optional connection to an in-memory SQLite instance holding the session table.
    pub db: Option<DatabaseConnection>,

    /// Optional session instance backed by `session_store`.
    pub session: Option<Session>,

    /// Session store over `db`, created alongside the session.
    pub session_store: Option<SqliteStore>,

    pub activities_api: Option<MockApi>,
    pub prison_api: Option<MockApi>,
    pub manage_users_api: Option<MockApi>,
    pub auth_server: Option<MockApi>,
}

impl TestContext {
    /// Creates a new empty test context with no database or mocks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets or creates the in-memory SQLite database connection.
    ///
    /// The pool is limited to one connection so every query sees the same
    /// in-memory database.
    ///
    /// # Returns
    /// - `Ok(&DatabaseConnection)` - Reference to the database connection
    /// - `Err(TestError::Database)` - Failed to connect to in-memory SQLite database
    pub async fn database(&mut self) -> Result<&DatabaseConnection, TestError> {
        match self.db {
            Some(ref db) => Ok(db),
            None => {
                let mut opt = ConnectOptions::new("sqlite::memory:");
                opt.max_connections(1).min_connections(1).sqlx_logging(false);

                let db = Database::connect(opt).await?;

                let db_ref = self.db.insert(db);

                Ok(&*db_ref)
            }
        }
    }

    /// Gets or creates the session store with its table migrated.
    ///
    /// # Returns
    /// - `Ok(SqliteStore)` - Clone of the store, sharing the test database
    /// - `Err(TestError::Database)` - Failed to create the session table
    pub async fn session_store(&mut self) -> Result<SqliteStore, TestError> {
        if let Some(ref store) = self.session_store {
            return Ok(store.clone());
        }

        let db = self.database().await?;
        let store = SqliteStore::new(db.get_sqlite_connection_pool().clone());

        store
            .migrate()
            .await
            .map_err(|e| sea_orm::DbErr::Custom(e.to_string()))?;

        Ok(self.session_store.insert(store).clone())
    }

    /// Gets or creates the test session instance.
    ///
    /// # Returns
    /// - `Ok(&Session)` - Reference to the session instance
    /// - `Err(TestError::Database)` - Failed to initialize database connection or session table
    ///
    /// # Example
    /// ```rust,ignore
    /// let mut test = TestContext::new();
    /// let session = test.session().await?;
    ///
    /// session.insert("journey:data", json!({})).await?;
    /// ```
    pub async fn session(&mut self) -> Result<&Session, TestError> {
        match self.session {
            Some(ref session) => Ok(session),
            None => {
                let store = self.session_store().await?;

                let session = Session::new(
                    None,
                    Arc::new(store),
                    Some(Expiry::OnInactivity(Duration::minutes(120))),
                );

                let session_ref = self.session.insert(session);

                Ok(&*session_ref)
            }
        }
    }

    pub fn activities_api_url(&self) -> String {
        url_of(&self.activities_api)
    }

    pub fn prison_api_url(&self) -> String {
        url_of(&self.prison_api)
    }

    pub fn manage_users_api_url(&self) -> String {
        url_of(&self.manage_users_api)
    }

    pub fn auth_url(&self) -> String {
        url_of(&self.auth_server)
    }
}

fn url_of(mock: &Option<MockApi>) -> String {
    mock.as_ref()
        .map(MockApi::url)
        .unwrap_or_else(|| UNREACHABLE_URL.to_string())
}
