//! Upstream REST API clients.
//!
//! Each client wraps the shared `RestClient` for one API and exposes the
//! endpoints this service calls as typed methods. Clients are constructed per
//! request with the signed-in user's token, the same way repositories borrow
//! the shared connection.

pub mod activities;
pub mod manage_users;
pub mod prison;
pub mod rest_client;

#[cfg(test)]
mod test;
