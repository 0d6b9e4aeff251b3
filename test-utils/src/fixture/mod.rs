//! JSON fixtures shaped like upstream API responses.
//!
//! Mock API handlers return these bodies. Each function fills in the fields
//! the service reads and leaves the rest out.
//!
//! # Example
//!
//! ```rust,ignore
//! use test_utils::fixture;
//!
//! let body = fixture::activities::schedule(1, "2024-01-01", None);
//! let prisoner = fixture::prison::inmate_detail("A1234BC", 1, "John", "Smith");
//! ```

pub mod activities;
pub mod prison;
pub mod users;
