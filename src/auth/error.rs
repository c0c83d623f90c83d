//! Bearer token verification failures.
//!
//! Every variant is answered with 401; the `Display` text is the message
//! shown to the client and `code()` is the stable machine-readable reason.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No `Authorization` header, or a `Bearer` scheme without a token
    #[error("Not authorized, no token")]
    MissingToken,
    /// Header present but not of the form `Bearer <token>`
    #[error("Not authorized, malformed authorization header")]
    MalformedHeader,
    #[error("Not authorized, token failed (invalid signature)")]
    InvalidSignature,
    #[error("Not authorized, token expired")]
    TokenExpired,
    /// Token could not be decoded at all (bad encoding, wrong algorithm)
    #[error("Not authorized, token failed")]
    InvalidToken,
    /// Signature and expiry are fine but the user record is gone
    #[error("Not authorized, user not found")]
    UserNotFound,
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "MISSING_TOKEN",
            AuthError::MalformedHeader => "MALFORMED_HEADER",
            AuthError::InvalidSignature => "INVALID_SIGNATURE",
            AuthError::TokenExpired => "TOKEN_EXPIRED",
            AuthError::InvalidToken => "INVALID_TOKEN",
            AuthError::UserNotFound => "USER_NOT_FOUND",
        }
    }
}
