//! Domain models for exceptional-service.

pub mod account;

pub use account::*;
