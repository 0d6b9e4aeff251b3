//! Business logic between controllers and the upstream API clients.
//!
//! Services are constructed per request from borrowed state and the signed-in
//! user. They call the upstream clients, apply journey rules and return domain
//! models or view models for the controllers.

pub mod allocation;
pub mod appointment;
pub mod attendance;
pub mod auth;

#[cfg(test)]
mod test;
