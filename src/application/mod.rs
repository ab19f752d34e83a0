//! Application layer (use-cases, policies).
//!
//! Validation and the register/list use-cases live here, independent of any
//! presentation layer. Front ends hand over a `RegistrationForm` and render
//! whatever comes back.

pub mod registration;
