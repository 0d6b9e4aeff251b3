use axum::Router;

use crate::{context::TestContext, error::TestError, mock::MockApi};

/// Builder for creating test contexts with mock upstream APIs.
///
/// Register a router for each upstream API the code under test calls, then
/// call `build()` to start the mocks. APIs left unregistered resolve to an
/// address nothing listens on, so unexpected calls fail fast.
///
/// # Example
///
/// ```rust,ignore
/// let test = TestBuilder::new()
///     .with_activities_api(activities_routes)
///     .with_manage_users_api(users_routes)
///     .build()
///     .await?;
/// ```
#[derive(Default)]
pub struct TestBuilder {
    activities_api: Option<Router>,
    prison_api: Option<Router>,
    manage_users_api: Option<Router>,
    auth_server: Option<Router>,
}

impl TestBuilder {
    /// Creates a new test builder with no mock APIs configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `router` as the activities API.
    pub fn with_activities_api(mut self, router: Router) -> Self {
        self.activities_api = Some(router);
        self
    }

    /// Serves `router` as the prison API.
    pub fn with_prison_api(mut self, router: Router) -> Self {
        self.prison_api = Some(router);
        self
    }

    /// Serves `router` as the manage users API.
    pub fn with_manage_users_api(mut self, router: Router) -> Self {
        self.manage_users_api = Some(router);
        self
    }

    /// Serves `router` as the HMPPS Auth server (token endpoint).
    pub fn with_auth_server(mut self, router: Router) -> Self {
        self.auth_server = Some(router);
        self
    }

    /// Starts every registered mock and returns the test context.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Mocks are running; database and session are created lazily
    /// - `Err(TestError::Io)` - A mock failed to bind its port
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut context = TestContext::new();

        context.activities_api = start(self.activities_api).await?;
        context.prison_api = start(self.prison_api).await?;
        context.manage_users_api = start(self.manage_users_api).await?;
        context.auth_server = start(self.auth_server).await?;

        Ok(context)
    }
}

async fn start(router: Option<Router>) -> Result<Option<MockApi>, TestError> {
    match router {
        Some(router) => Ok(Some(MockApi::start(router).await?)),
        None => Ok(None),
    }
}
