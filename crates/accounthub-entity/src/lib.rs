//! # accounthub-entity
//!
//! Domain entity models for AccountHub. Database entities derive
//! `sqlx::FromRow`; response projections are separate types so that
//! secrets cannot be serialized by accident.

pub mod user;
