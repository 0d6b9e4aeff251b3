//! HTTP handlers.
//!
//! GET handlers return the view model for a page as JSON. POST handlers take a
//! validated form, update journey state or call a service, and answer with a
//! 303 redirect to the next page.

pub mod allocation;
pub mod appointment;
pub mod attendance;
pub mod auth;
pub mod health;
pub mod home;
pub mod param;

#[cfg(test)]
mod test;
