//! Bearer token issuance and verification.
//!
//! Tokens are HS256 JWTs signed with the process-wide secret from
//! `AppConfig`. They carry only the user's internal id and are valid for one
//! day; there is no refresh flow and no server-side session table.

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use tracing::{debug, error};

use super::error::AuthError;
use super::models::Claims;
use crate::common::ApiError;

/// Lifetime of an issued token
pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

const BEARER_SCHEME: &str = "Bearer";

/// Sign a token for the given user, valid for one day from now.
pub fn issue_token(secret: &str, user_id: &str) -> Result<String, ApiError> {
    issue_token_at(secret, user_id, Utc::now().timestamp())
}

/// Sign a token as if it had been issued at `issued_at` (unix seconds).
pub fn issue_token_at(secret: &str, user_id: &str, issued_at: i64) -> Result<String, ApiError> {
    let claims = Claims {
        id: user_id.to_string(),
        iat: issued_at.max(0) as usize,
        exp: (issued_at + TOKEN_TTL_SECS).max(0) as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        error!(error = %e, user_id = %user_id, "JWT encoding error");
        ApiError::InternalServer("failed to sign token".to_string())
    })
}

/// Check signature and expiry and return the embedded claims.
///
/// Signature is checked before expiry, so an expired token is only reported
/// as expired when it was genuinely signed with `secret`. No clock leeway is
/// granted: a token is rejected from the second after its `exp`.
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            debug!(error = %e, "JWT validation failed");
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::InvalidToken,
            }
        })
}

/// Pull the token out of an `Authorization` header value.
///
/// Only the literal two-part `Bearer <token>` form is accepted. A bare
/// `Bearer` with nothing after it counts as a missing token.
pub fn extract_bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let value = match header.map(str::trim) {
        None | Some("") => return Err(AuthError::MissingToken),
        Some(v) => v,
    };

    let mut parts = value.split(' ');
    let scheme = parts.next().unwrap_or_default();
    let token = parts.next();

    if scheme != BEARER_SCHEME {
        return Err(AuthError::MalformedHeader);
    }
    if parts.next().is_some() {
        return Err(AuthError::MalformedHeader);
    }

    match token {
        Some(t) if !t.is_empty() => Ok(t),
        _ => Err(AuthError::MissingToken),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "token-test-secret";

    #[test]
    fn test_issued_token_verifies_with_same_secret() {
        let token = issue_token(SECRET, "U_ABC12345").expect("should sign");
        let claims = verify_token(SECRET, &token).expect("should verify");

        assert_eq!(claims.id, "U_ABC12345");
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS as usize);
    }

    #[test]
    fn test_expiry_is_one_day_after_issuance() {
        let before = Utc::now().timestamp() as usize;
        let token = issue_token(SECRET, "U_1").expect("should sign");
        let after = Utc::now().timestamp() as usize;

        let claims = verify_token(SECRET, &token).expect("should verify");
        assert!(claims.exp >= before + TOKEN_TTL_SECS as usize);
        assert!(claims.exp <= after + TOKEN_TTL_SECS as usize);
    }

    #[test]
    fn test_wrong_secret_is_invalid_signature() {
        let token = issue_token(SECRET, "U_1").expect("should sign");
        assert_eq!(
            verify_token("another-secret", &token),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn test_expired_token_is_reported_as_expired() {
        let two_days_ago = Utc::now().timestamp() - 2 * TOKEN_TTL_SECS;
        let token = issue_token_at(SECRET, "U_1", two_days_ago).expect("should sign");
        assert_eq!(verify_token(SECRET, &token), Err(AuthError::TokenExpired));
    }

    #[test]
    fn test_token_just_past_expiry_is_rejected() {
        let issued = Utc::now().timestamp() - TOKEN_TTL_SECS - 5;
        let token = issue_token_at(SECRET, "U_1", issued).expect("should sign");
        assert_eq!(verify_token(SECRET, &token), Err(AuthError::TokenExpired));
    }

    #[test]
    fn test_token_just_before_expiry_is_accepted() {
        let issued = Utc::now().timestamp() - TOKEN_TTL_SECS + 60;
        let token = issue_token_at(SECRET, "U_1", issued).expect("should sign");
        assert!(verify_token(SECRET, &token).is_ok());
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        assert_eq!(
            verify_token(SECRET, "not.a.jwt"),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token(Some("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
        assert_eq!(extract_bearer_token(None), Err(AuthError::MissingToken));
        assert_eq!(extract_bearer_token(Some("")), Err(AuthError::MissingToken));
        assert_eq!(extract_bearer_token(Some("Bearer")), Err(AuthError::MissingToken));
        assert_eq!(extract_bearer_token(Some("Bearer ")), Err(AuthError::MissingToken));
        assert_eq!(
            extract_bearer_token(Some("abc.def.ghi")),
            Err(AuthError::MalformedHeader)
        );
        assert_eq!(
            extract_bearer_token(Some("Basic dXNlcjpwYXNz")),
            Err(AuthError::MalformedHeader)
        );
        assert_eq!(
            extract_bearer_token(Some("Bearer a b")),
            Err(AuthError::MalformedHeader)
        );
        assert_eq!(
            extract_bearer_token(Some("bearer abc")),
            Err(AuthError::MalformedHeader)
        );
    }
}
