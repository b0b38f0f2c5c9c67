//! HMAC-SHA256 token verifiers.

use std::fmt;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::Zeroize;

use crate::auth::ApiTokenError;

type HmacSha256 = Hmac<Sha256>;

/// Server-side key used to sign API token verifiers.
///
/// Only the signature of a token is stored, so a leaked `api_tokens` table
/// cannot be turned back into working tokens without this key.
#[derive(Clone)]
pub struct TokenHmacKey {
    bytes: Vec<u8>,
}

impl TokenHmacKey {
    /// Wrap raw key material. Empty keys are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ApiTokenError::InvalidKey`] when `bytes` is empty.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, ApiTokenError> {
        let bytes = bytes.into();

        if bytes.is_empty() {
            return Err(ApiTokenError::InvalidKey);
        }

        Ok(Self { bytes })
    }

    /// Sign `input`, returning the base64 verifier to store.
    ///
    /// # Errors
    ///
    /// Returns [`ApiTokenError::InvalidKey`] if the MAC cannot be keyed.
    pub fn sign(&self, input: &[u8]) -> Result<String, ApiTokenError> {
        let mut mac = self.mac()?;

        mac.update(input);

        Ok(BASE64.encode(mac.finalize().into_bytes()))
    }

    /// Check `input` against a stored verifier in constant time.
    ///
    /// # Errors
    ///
    /// Returns [`ApiTokenError::InvalidKey`] if the MAC cannot be keyed.
    pub fn verify(&self, input: &[u8], verifier: &str) -> Result<bool, ApiTokenError> {
        let Ok(expected) = BASE64.decode(verifier) else {
            return Ok(false);
        };

        let mut mac = self.mac()?;

        mac.update(input);

        Ok(mac.verify_slice(&expected).is_ok())
    }

    fn mac(&self) -> Result<HmacSha256, ApiTokenError> {
        HmacSha256::new_from_slice(&self.bytes).map_err(|_| ApiTokenError::InvalidKey)
    }
}

impl fmt::Debug for TokenHmacKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenHmacKey(**redacted**)")
    }
}

impl Drop for TokenHmacKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_input_verifies() {
        let key = TokenHmacKey::new("test-key").expect("key should be valid");
        let verifier = key.sign(b"payload").expect("sign should succeed");

        assert!(key.verify(b"payload", &verifier).expect("verify should run"));
    }

    #[test]
    fn different_input_or_key_does_not_verify() {
        let key = TokenHmacKey::new("test-key").expect("key should be valid");
        let other = TokenHmacKey::new("other-key").expect("key should be valid");
        let verifier = key.sign(b"payload").expect("sign should succeed");

        assert!(!key.verify(b"tampered", &verifier).expect("verify should run"));
        assert!(!other.verify(b"payload", &verifier).expect("verify should run"));
    }

    #[test]
    fn malformed_verifier_does_not_verify() {
        let key = TokenHmacKey::new("test-key").expect("key should be valid");

        assert!(!key.verify(b"payload", "not base64!").expect("verify should run"));
    }

    #[test]
    fn empty_key_is_rejected() {
        assert!(matches!(
            TokenHmacKey::new(Vec::new()),
            Err(ApiTokenError::InvalidKey)
        ));
    }

    #[test]
    fn debug_output_is_redacted() {
        let key = TokenHmacKey::new("super-secret").expect("key should be valid");

        assert_eq!(format!("{key:?}"), "TokenHmacKey(**redacted**)");
    }
}
