//! User domain entities.

pub mod model;
pub mod profile;

pub use model::{NewUser, User, normalize_username};
pub use profile::UserProfile;
