use std::net::SocketAddr;

use axum::Router;
use tokio::{net::TcpListener, task::JoinHandle};

use crate::error::TestError;

/// A mock upstream API: an axum router served on `127.0.0.1` at an ephemeral port.
///
/// The server task is aborted when the mock is dropped.
pub struct MockApi {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl MockApi {
    /// Binds an ephemeral port and starts serving `router` on it.
    ///
    /// # Arguments
    /// - `router` - Routes mimicking the upstream endpoints under test
    ///
    /// # Returns
    /// - `Ok(MockApi)` - Server is accepting connections
    /// - `Err(TestError::Io)` - Failed to bind the listener
    pub async fn start(router: Router) -> Result<Self, TestError> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self { addr, handle })
    }

    /// Base URL of the running mock, without a trailing slash.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
