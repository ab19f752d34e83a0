//! Domain types for the person registry
//! Defines the record shape and the errors surfaced to the user.

pub mod error;
pub mod person;

pub use error::*;
pub use person::*;
