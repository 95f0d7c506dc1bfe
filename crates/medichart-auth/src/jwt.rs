//! Token codec: issuing and verifying identity assertions.
//!
//! Assertions are HS256 JWTs. Verification recomputes the MAC over the
//! claim payload and compares in constant time (delegated to
//! `jsonwebtoken`/ring), then checks expiry with a configurable clock-skew
//! leeway. Every trusted key in the [`Keyring`] is tried, so tokens signed
//! before a key rotation keep verifying until they expire.
//!
//! # Example
//!
//! ```ignore
//! use medichart_auth::{Keyring, issue_token, verify_token};
//!
//! let keyring = Keyring::new(&config.secret, &config.previous_secrets)?;
//! let token = issue_token(&principal, &keyring, 3600)?;
//! let principal = verify_token(&token, &keyring, 30)?;
//! ```

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, Header, Validation, decode, encode, errors::ErrorKind as JwtErrorKind,
};
use thiserror::Error;
use tracing::debug;

use crate::claims::Claims;
use crate::keys::Keyring;
use crate::principal::Principal;

/// Failures of the token codec.
///
/// `Signing` is an issuer-side fault and fatal at startup when key material
/// is unavailable. The other three are verifier-side and all map to an
/// unauthenticated caller; they are kept distinct for logs and tests.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Key material unavailable or token could not be signed.
    #[error("token signing failed: {0}")]
    Signing(String),
    /// Signature does not match any trusted key.
    #[error("token signature is invalid")]
    InvalidSignature,
    /// Token expired beyond the configured leeway.
    #[error("token has expired")]
    Expired,
    /// Token could not be decoded at all.
    #[error("token is malformed")]
    Malformed,
}

/// Mints a signed identity assertion for `principal`, valid for `ttl_secs`
/// from now.
///
/// Signing always uses the keyring's current key.
pub fn issue_token(
    principal: &Principal,
    keyring: &Keyring,
    ttl_secs: i64,
) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = principal.to_claims(now, now + ttl_secs);

    encode(&Header::default(), &claims, &keyring.signing_key()?)
        .map_err(|e| AuthError::Signing(e.to_string()))
}

/// Verifies an identity assertion and builds the caller's [`Principal`].
///
/// The signature is checked against every trusted key; `leeway_secs` of
/// clock skew is tolerated on `exp` so drift between services does not
/// produce false expiry. The returned principal may still be unusable
/// (disabled/locked account); callers must gate on
/// [`Principal::is_usable`].
pub fn verify_token(
    token: &str,
    keyring: &Keyring,
    leeway_secs: u64,
) -> Result<Principal, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = leeway_secs;

    let mut saw_expired = false;
    let mut saw_malformed = false;

    for key in keyring.verification_keys()? {
        match decode::<Claims>(token, &key, &validation) {
            Ok(data) => {
                return Principal::from_claims(&data.claims).map_err(|_| {
                    debug!("identity assertion rejected: subject is not a user id");
                    AuthError::Malformed
                });
            }
            Err(err) => match err.kind() {
                JwtErrorKind::ExpiredSignature => saw_expired = true,
                JwtErrorKind::InvalidSignature => {}
                // Structural failures are identical for every key.
                _ => saw_malformed = true,
            },
        }
    }

    let err = if saw_expired {
        AuthError::Expired
    } else if saw_malformed {
        AuthError::Malformed
    } else {
        AuthError::InvalidSignature
    };
    debug!(error = %err, "identity assertion rejected");
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::principal::UserType;

    const SECRET: &str = "test-secret-key-at-least-32-characters-long";
    const ROTATED: &str = "rotated-secret-key-also-32-characters-plus";

    fn test_keyring() -> Keyring {
        Keyring::new(SECRET, &[]).unwrap()
    }

    fn nurse() -> Principal {
        Principal::new(
            11,
            "njackson",
            "nurse@clinic.example",
            UserType::Staff,
            vec!["ROLE_STAFF".to_string()],
            vec![
                "patient:read".to_string(),
                "appointment:create".to_string(),
            ],
        )
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let keyring = test_keyring();
        let token = issue_token(&nurse(), &keyring, 3600).unwrap();
        let principal = verify_token(&token, &keyring, 0).unwrap();

        assert_eq!(principal.user_id(), 11);
        assert_eq!(principal.username(), "njackson");
        assert_eq!(principal.user_type(), UserType::Staff);
        assert!(principal.has_role("ROLE_STAFF"));
        assert!(principal.has_permission("appointment:create"));
        assert!(principal.is_usable());
    }

    #[test]
    fn test_verify_preserves_status_flags() {
        let keyring = test_keyring();
        let disabled = nurse().with_enabled(false);
        let token = issue_token(&disabled, &keyring, 3600).unwrap();
        let principal = verify_token(&token, &keyring, 0).unwrap();
        assert!(!principal.is_usable());
    }

    #[test]
    fn test_verify_wrong_secret() {
        let token = issue_token(&nurse(), &test_keyring(), 3600).unwrap();
        let other = Keyring::new(ROTATED, &[]).unwrap();
        assert!(matches!(
            verify_token(&token, &other, 0),
            Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn test_verify_tampered_signature() {
        let keyring = test_keyring();
        let token = issue_token(&nurse(), &keyring, 3600).unwrap();

        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert!(matches!(
            verify_token(&tampered, &keyring, 0),
            Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn test_verify_tampered_payload() {
        let keyring = test_keyring();
        let token = issue_token(&nurse(), &keyring, 3600).unwrap();

        // Flip a character in the middle of the payload segment.
        let parts: Vec<&str> = token.split('.').collect();
        let mut payload: Vec<u8> = parts[1].bytes().collect();
        let mid = payload.len() / 2;
        payload[mid] = if payload[mid] == b'a' { b'b' } else { b'a' };
        let tampered = format!(
            "{}.{}.{}",
            parts[0],
            String::from_utf8(payload).unwrap(),
            parts[2]
        );

        assert!(matches!(
            verify_token(&tampered, &keyring, 0),
            Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn test_verify_garbage_is_malformed() {
        let keyring = test_keyring();
        assert!(matches!(
            verify_token("not-a-token", &keyring, 0),
            Err(AuthError::Malformed)
        ));
        assert!(matches!(
            verify_token("", &keyring, 0),
            Err(AuthError::Malformed)
        ));
    }

    #[test]
    fn test_verify_expired() {
        let keyring = test_keyring();
        let token = issue_token(&nurse(), &keyring, -10).unwrap();
        assert!(matches!(
            verify_token(&token, &keyring, 0),
            Err(AuthError::Expired)
        ));
    }

    #[test]
    fn test_leeway_tolerates_recent_expiry() {
        let keyring = test_keyring();
        let token = issue_token(&nurse(), &keyring, -10).unwrap();
        assert!(verify_token(&token, &keyring, 60).is_ok());
    }

    #[test]
    fn test_rotation_keeps_old_tokens_valid() {
        let keyring = test_keyring();
        let old_token = issue_token(&nurse(), &keyring, 3600).unwrap();

        keyring.rotate(ROTATED).unwrap();
        let new_token = issue_token(&nurse(), &keyring, 3600).unwrap();

        // Both generations verify against the rotated keyring.
        assert!(verify_token(&old_token, &keyring, 0).is_ok());
        assert!(verify_token(&new_token, &keyring, 0).is_ok());

        // A verifier that never trusted the old secret rejects the old token.
        let fresh = Keyring::new(ROTATED, &[]).unwrap();
        assert!(verify_token(&new_token, &fresh, 0).is_ok());
        assert!(matches!(
            verify_token(&old_token, &fresh, 0),
            Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn test_previous_secret_from_config_verifies() {
        let old = Keyring::new(SECRET, &[]).unwrap();
        let token = issue_token(&nurse(), &old, 3600).unwrap();

        // A peer deployed with the rotated secret and the old one listed as
        // previous still accepts in-flight tokens.
        let peer = Keyring::new(ROTATED, &[SECRET.to_string()]).unwrap();
        assert!(verify_token(&token, &peer, 0).is_ok());
    }

    #[test]
    fn test_expired_token_rejected_even_after_upstream_check() {
        // Downstream verification is independent: a token that passed
        // upstream while valid is still rejected once it expires.
        let keyring = test_keyring();
        let token = issue_token(&nurse(), &keyring, -1).unwrap();
        assert!(matches!(
            verify_token(&token, &keyring, 0),
            Err(AuthError::Expired)
        ));
    }
}
