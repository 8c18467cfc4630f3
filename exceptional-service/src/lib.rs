//! Exceptional Service - reproducible exceptional-condition defects for security training.
//!
//! Every endpoint here is intentionally flawed: the ledger races, the
//! overflow evaluator wraps, and the token gate fails open. Do not deploy
//! this anywhere it can be reached by untrusted callers.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;
