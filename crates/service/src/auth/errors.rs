use thiserror::Error;

/// Failures of the token service and the auth gate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No credentials were presented.
    #[error("unauthorized access")]
    Unauthorized,
    /// Credentials were presented but are malformed, wrongly signed or expired.
    #[error("invalid or expired token")]
    Forbidden,
    #[error("invalid claims: {0}")]
    InvalidClaims(String),
    #[error("token error: {0}")]
    TokenError(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Unauthorized => 1004,
            AuthError::Forbidden => 1005,
            AuthError::InvalidClaims(_) => 1001,
            AuthError::TokenError(_) => 1102,
        }
    }
}
