//! Server-side backend and business logic.
//!
//! # Architecture
//!
//! - **Controller Layer** (`controller/`) - HTTP handlers returning view models or redirects
//! - **Service Layer** (`service/`) - Business logic between controllers and the upstream APIs
//! - **Data Layer** (`data/`) - Typed clients for the activities, prison and manage users APIs
//! - **Model Layer** (`model/`) - Journey state, form schemas and recurrence rules
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Session wrappers, sign-in guard, form validation and error handling
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (HTTP and OAuth clients, API URLs)
//! - **Startup** (`startup`) - Initialization of the session store and clients
//! - **Router** (`router`) - Axum route configuration and middleware layers
//!
//! # Request Flow
//!
//! 1. **Router** receives the request; the session layer loads the session
//! 2. **Middleware** checks sign-in and extracts the journey id and form
//! 3. **Controller** reads journey state, calls a service, writes journey state
//! 4. **Service** calls the upstream clients with the user's token
//! 5. **Controller** returns a view model, or a redirect to the next step
//! 6. **Error middleware** turns failures into flash-and-redirect, sign-out or the error view

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
