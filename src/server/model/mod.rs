//! Server-side domain models.
//!
//! Journey state, form schemas and the pure rules the controllers and services
//! apply to them. Journey state derives serde because it lives in the session
//! between requests.

pub mod allocation;
pub mod appointment;
pub mod attendance;
pub mod form;
pub mod journey;
pub mod recurrence;
pub mod user;
