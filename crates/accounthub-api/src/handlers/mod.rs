//! Request handlers.

pub mod account;
pub mod health;
