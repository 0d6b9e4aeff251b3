//! Serializable types crossing the application boundary.
//!
//! Upstream API payloads (`activities`, `prison`, `user`) and the view models
//! returned by each journey step (`appointment`, `allocation`, `attendance`).

pub mod activities;
pub mod allocation;
pub mod api;
pub mod appointment;
pub mod attendance;
pub mod prison;
pub mod user;
