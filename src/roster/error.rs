use leptos::prelude::ServerFnError;
use thiserror::Error;

use super::store::Relation;
use crate::auth::AuthError;

#[derive(Error, Debug)]
pub enum RosterError {
    /// Raw message from the backend, shown to the user as-is.
    #[error("{0}")]
    Backend(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no {relation} row with id {id}")]
    NotFound { relation: Relation, id: i64 },

    #[error("expected at most one {relation} row where {field} matches")]
    Ambiguous { relation: Relation, field: String },

    #[error("Sign in first")]
    NotSignedIn,

    #[error("Your account has no email address")]
    MissingEmail,

    #[error("Only coaches can do that")]
    Forbidden,

    #[error("Player name cannot be empty")]
    EmptyName,

    #[error("You are already a coach")]
    AlreadyCoach,
}

// Identity failures keep their own message; only a missing user means "Sign in first".
impl From<AuthError> for RosterError {
    fn from(e: AuthError) -> Self {
        RosterError::Backend(e.to_string())
    }
}

pub fn to_server_error(e: RosterError) -> ServerFnError {
    ServerFnError::ServerError(e.to_string())
}
