//! # accounthub-service
//!
//! Account workflows for AccountHub. Services follow constructor
//! injection: the user store, media uploader, hasher and JWT codec are
//! provided at construction time via `Arc` references.

pub mod account;
pub mod context;

pub use account::{AccountService, LoginInput, LoginOutcome, RegisterInput};
pub use context::RequestContext;
