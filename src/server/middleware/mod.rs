//! Request extractors and middleware.
//!
//! - `auth` - Sign-in guard and the `require_sign_in` layer
//! - `error` - Terminal error handler turning error markers into responses
//! - `journey` - Journey id extraction from the request path
//! - `session` - Type-safe session wrappers
//! - `validation` - Form validation with flash-and-redirect on failure

pub mod auth;
pub mod error;
pub mod journey;
pub mod session;
pub mod validation;

#[cfg(test)]
mod test;
