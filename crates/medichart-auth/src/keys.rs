//! Keyring for token signing and verification.
//!
//! Verification trusts several keys at once so rotation needs no downtime:
//! a freshly rotated-in key signs every new token while tokens signed with
//! the previous key keep verifying until they expire. Signing always uses
//! the current key only.

use std::sync::RwLock;

use jsonwebtoken::{DecodingKey, EncodingKey};

use crate::jwt::AuthError;

const MIN_SECRET_LEN: usize = 32;

struct KeySet {
    signing: EncodingKey,
    /// Trusted verification keys, current first.
    trusted: Vec<DecodingKey>,
}

/// Shared, read-mostly key material, loaded once at process start.
///
/// Rotation swaps the whole key set behind the lock in one step; in-flight
/// verifications keep the set they already read.
pub struct Keyring {
    inner: RwLock<KeySet>,
}

impl Keyring {
    /// Builds a keyring from the current secret and any still-trusted
    /// previous secrets.
    ///
    /// Fails with [`AuthError::Signing`] when key material is missing or too
    /// weak; the issuing service treats that as fatal at startup.
    pub fn new(secret: &str, previous_secrets: &[String]) -> Result<Self, AuthError> {
        validate_secret(secret)?;

        let mut trusted = vec![DecodingKey::from_secret(secret.as_bytes())];
        for previous in previous_secrets {
            validate_secret(previous)?;
            trusted.push(DecodingKey::from_secret(previous.as_bytes()));
        }

        Ok(Self {
            inner: RwLock::new(KeySet {
                signing: EncodingKey::from_secret(secret.as_bytes()),
                trusted,
            }),
        })
    }

    /// Rotates to a new signing secret.
    ///
    /// The old keys stay in the trusted set, so tokens minted before the
    /// rotation verify until expiry. Removal of retired keys happens by
    /// restarting with a shorter `previous_secrets` list.
    pub fn rotate(&self, new_secret: &str) -> Result<(), AuthError> {
        validate_secret(new_secret)?;

        let mut inner = self
            .inner
            .write()
            .map_err(|_| AuthError::Signing("keyring lock poisoned".to_string()))?;
        inner.signing = EncodingKey::from_secret(new_secret.as_bytes());
        inner
            .trusted
            .insert(0, DecodingKey::from_secret(new_secret.as_bytes()));
        Ok(())
    }

    /// Current signing key.
    pub(crate) fn signing_key(&self) -> Result<EncodingKey, AuthError> {
        self.inner
            .read()
            .map(|inner| inner.signing.clone())
            .map_err(|_| AuthError::Signing("keyring lock poisoned".to_string()))
    }

    /// Every trusted verification key, current first.
    pub(crate) fn verification_keys(&self) -> Result<Vec<DecodingKey>, AuthError> {
        self.inner
            .read()
            .map(|inner| inner.trusted.clone())
            .map_err(|_| AuthError::Signing("keyring lock poisoned".to_string()))
    }
}

fn validate_secret(secret: &str) -> Result<(), AuthError> {
    if secret.len() < MIN_SECRET_LEN {
        return Err(AuthError::Signing(format!(
            "token secret must be at least {MIN_SECRET_LEN} bytes"
        )));
    }
    Ok(())
}
