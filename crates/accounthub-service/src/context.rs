//! Request context carrying the authenticated user.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use accounthub_auth::AccessClaims;

/// Context for the current authenticated request.
///
/// Built from a validated access token and passed into service methods so
/// that every operation knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// Username from the access token.
    pub username: String,
    /// Email from the access token.
    pub email: String,
    /// Full name from the access token.
    pub fullname: String,
}

impl RequestContext {
    /// Creates a context for the given user.
    pub fn new(user_id: Uuid, username: String, email: String, fullname: String) -> Self {
        Self {
            user_id,
            username,
            email,
            fullname,
        }
    }

    /// Creates a context from validated access token claims.
    pub fn from_claims(claims: AccessClaims) -> Self {
        Self::new(claims.sub, claims.username, claims.email, claims.fullname)
    }
}
