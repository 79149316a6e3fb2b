//! Registration, login, logout and session token handling.

pub mod register;
pub mod service;
pub mod session;

pub use register::RegisterInput;
pub use service::AccountService;
pub use session::{LoginInput, LoginOutcome};

#[cfg(test)]
pub(crate) mod testing;
