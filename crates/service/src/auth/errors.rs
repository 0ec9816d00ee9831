use thiserror::Error;

/// Failures while authenticating a bearer token
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authentication credentials were not provided")]
    MissingToken,
    #[error("invalid token: {0}")]
    TokenError(String),
    #[error("user not found")]
    UnknownUser,
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::MissingToken => 1001,
            AuthError::TokenError(_) => 1102,
            AuthError::UnknownUser => 1003,
            AuthError::Repository(_) => 1200,
        }
    }

    /// Whether the caller should see a 401 rather than a server error.
    pub fn is_unauthorized(&self) -> bool {
        !matches!(self, AuthError::Repository(_))
    }
}
