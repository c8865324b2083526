//! AES-256-GCM payload protection for stored token pairs.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use tokenward_core::error::AppError;
use tokenward_core::result::AppResult;

/// Length of the random nonce prepended to every sealed payload.
const NONCE_LEN: usize = 12;

/// Seals and opens byte payloads with AES-256-GCM.
#[derive(Clone)]
pub struct PayloadCipher {
    cipher: Aes256Gcm,
}

impl std::fmt::Debug for PayloadCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayloadCipher").finish_non_exhaustive()
    }
}

impl PayloadCipher {
    /// Creates a cipher from a raw 32-byte key.
    pub fn new(key_bytes: &[u8; 32]) -> Self {
        Self {
            cipher: Aes256Gcm::new(key_bytes.into()),
        }
    }

    /// Creates a cipher from a base64-encoded 32-byte key.
    pub fn from_base64(encoded: &str) -> AppResult<Self> {
        let decoded = STANDARD.decode(encoded.trim()).map_err(|e| {
            AppError::configuration(format!("storage.protection_key is not valid base64: {e}"))
        })?;

        let key: [u8; 32] = decoded.as_slice().try_into().map_err(|_| {
            AppError::configuration(format!(
                "storage.protection_key must decode to 32 bytes, got {}",
                decoded.len()
            ))
        })?;

        Ok(Self::new(&key))
    }

    /// Encrypts `plaintext`; the output is `nonce || ciphertext`.
    pub fn seal(&self, plaintext: &[u8]) -> AppResult<Vec<u8>> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|e| AppError::cryptography(format!("Failed to protect payload: {e}")))?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(sealed)
    }

    /// Decrypts a payload produced by [`seal`](Self::seal).
    ///
    /// Fails with a cryptography error when the payload is truncated,
    /// tampered with, or was sealed under another key.
    pub fn open(&self, sealed: &[u8]) -> AppResult<Vec<u8>> {
        if sealed.len() < NONCE_LEN {
            return Err(AppError::cryptography(
                "Protected payload is too short to carry a nonce",
            ));
        }

        let (nonce, ciphertext) = sealed.split_at(NONCE_LEN);
        self.cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|e| AppError::cryptography(format!("Failed to unprotect payload: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use tokenward_core::error::ErrorKind;

    use super::*;

    #[test]
    fn test_seal_then_open() {
        let cipher = PayloadCipher::new(&[7u8; 32]);
        let sealed = cipher.seal(b"token-pair").unwrap();
        assert_ne!(&sealed[NONCE_LEN..], b"token-pair");
        assert_eq!(cipher.open(&sealed).unwrap(), b"token-pair");
    }

    #[test]
    fn test_nonce_is_random() {
        let cipher = PayloadCipher::new(&[7u8; 32]);
        assert_ne!(cipher.seal(b"x").unwrap(), cipher.seal(b"x").unwrap());
    }

    #[test]
    fn test_other_key_cannot_open() {
        let sealed = PayloadCipher::new(&[1u8; 32]).seal(b"secret").unwrap();
        let err = PayloadCipher::new(&[2u8; 32]).open(&sealed).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Cryptography);
    }

    #[test]
    fn test_truncated_payload() {
        let cipher = PayloadCipher::new(&[1u8; 32]);
        assert!(cipher.open(&[0u8; 4]).unwrap_err().is_cryptographic());
    }

    #[test]
    fn test_from_base64_rejects_short_key() {
        let err = PayloadCipher::from_base64("c2hvcnQ=").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
        assert!(PayloadCipher::from_base64("%%%").is_err());
    }

    #[test]
    fn test_from_base64_default_key() {
        let config = tokenward_core::config::StorageConfig::default();
        assert!(PayloadCipher::from_base64(&config.protection_key).is_ok());
    }
}
