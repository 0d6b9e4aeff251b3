//! Activities Management Test Utils
//!
//! Shared testing utilities for the activities management service. Provides an
//! in-memory SQLite session store, programmable mock upstream APIs and JSON
//! fixtures for upstream payloads.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder registering mock upstream APIs
//! - **TestContext**: Test environment holding the database, session and running mocks
//! - **MockApi**: An axum router served on an ephemeral local port
//! - **fixture**: JSON bodies shaped like the upstream API responses
//! - **TestError**: Error types that can occur during test setup
//!
//! # Usage
//!
//! ```rust,ignore
//! use axum::{routing::get, Json, Router};
//! use test_utils::{builder::TestBuilder, fixture};
//!
//! #[tokio::test]
//! async fn looks_up_prisoner() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_prison_api(Router::new().route(
//!             "/api/bookings/offenderNo/{number}",
//!             get(|| async { Json(fixture::prison::inmate_detail("A1234BC", 1, "John", "Smith")) }),
//!         ))
//!         .build()
//!         .await?;
//!
//!     let url = test.prison_api_url();
//!     // Point the client under test at `url`...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod fixture;
pub mod mock;
