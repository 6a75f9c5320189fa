//! Envelope cipher: seal a single string value under a passphrase.
//!
//! ```text
//! key      = SHA-256(passphrase)
//! nonce    = 12 random bytes (fresh per call)
//! ct, tag  = AES-256-GCM(key, nonce, plaintext, aad = "")
//! envelope = base64(nonce || ct || tag)
//! ```

use core::fmt;

use crate::error::{DecryptionError, SealError};
use crate::wire::{self, MIN_ENVELOPE_BYTES, NONCE_BYTES, TAG_BYTES};
use crate::{aead, kdf};

/// Encrypt `plaintext` under `passphrase` and return the base64 envelope.
///
/// Two calls with identical inputs produce different envelopes.
pub fn seal(plaintext: &str, passphrase: &str) -> Result<String, SealError> {
    let key = kdf::derive_key(passphrase);
    let nonce = aead::nonce()?;
    let (ciphertext, tag) = aead::aead_seal(&key, &nonce, plaintext.as_bytes())?;
    let envelope = wire::to_text(&wire::encode_wire(&nonce, &ciphertext, &tag));

    tracing::debug!(plaintext_bytes = plaintext.len(), "sealed envelope");
    Ok(envelope)
}

/// Decrypt an envelope produced by [`seal`] (or any compatible
/// implementation).
///
/// # Error Behavior
///
/// - bad base64 or fewer than 28 decoded bytes: `MalformedEnvelope`
/// - wrong passphrase or any modified byte: `AuthenticationTagMismatch`
/// - plaintext is not UTF-8: `Encoding`
pub fn open(envelope: &str, passphrase: &str) -> Result<String, DecryptionError> {
    let bytes = wire::from_text(envelope)?;
    let parts = wire::decode_wire(&bytes)?;
    let key = kdf::derive_key(passphrase);
    let plaintext = aead::aead_open(&key, parts.nonce, parts.ciphertext, parts.tag)?;

    String::from_utf8(plaintext).map_err(|_| DecryptionError::Encoding)
}

/// Stateless handle over [`seal`] / [`open`], for callers that inject the
/// cipher as a value.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvelopeCipher;

impl EnvelopeCipher {
    pub fn new() -> Self {
        Self
    }

    #[inline]
    pub fn seal(&self, plaintext: &str, passphrase: &str) -> Result<String, SealError> {
        seal(plaintext, passphrase)
    }

    #[inline]
    pub fn open(&self, envelope: &str, passphrase: &str) -> Result<String, DecryptionError> {
        open(envelope, passphrase)
    }
}

// ---------------------------------------------------------------------------
// Inspection utilities (for ops/debugging)
// ---------------------------------------------------------------------------

/// Envelope layout (extracted without decryption).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeInfo {
    /// Decoded envelope length
    pub total_bytes: usize,
    pub nonce_bytes: usize,
    /// Equal to the plaintext length (GCM is a stream mode)
    pub ciphertext_bytes: usize,
    pub tag_bytes: usize,
}

impl fmt::Display for EnvelopeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AES-256-GCM envelope | {} bytes (nonce {} + ciphertext {} + tag {})",
            self.total_bytes, self.nonce_bytes, self.ciphertext_bytes, self.tag_bytes
        )
    }
}

/// Inspect envelope layout without decrypting.
///
/// Does NOT reveal any secret information and needs no passphrase.
pub fn inspect(envelope: &str) -> Result<EnvelopeInfo, DecryptionError> {
    let bytes = wire::from_text(envelope)?;
    let parts = wire::decode_wire(&bytes)?;

    Ok(EnvelopeInfo {
        total_bytes: bytes.len(),
        nonce_bytes: NONCE_BYTES,
        ciphertext_bytes: parts.ciphertext.len(),
        tag_bytes: TAG_BYTES,
    })
}

/// Envelope text length for a plaintext of `plaintext_bytes` bytes.
pub fn sealed_len(plaintext_bytes: usize) -> usize {
    (MIN_ENVELOPE_BYTES + plaintext_bytes).div_ceil(3) * 4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inspect_reports_layout() {
        let env = seal("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa", "pass").unwrap();
        let info = inspect(&env).unwrap();
        assert_eq!(info.total_bytes, 28 + 34);
        assert_eq!(info.ciphertext_bytes, 34);
        assert_eq!(info.nonce_bytes, 12);
        assert_eq!(info.tag_bytes, 16);
    }

    #[test]
    fn sealed_len_matches_output() {
        for len in [0usize, 1, 2, 3, 34, 100] {
            let plaintext = "x".repeat(len);
            assert_eq!(seal(&plaintext, "p").unwrap().len(), sealed_len(len));
        }
    }

    #[test]
    fn cipher_handle_delegates() {
        let cipher = EnvelopeCipher::new();
        let env = cipher.seal("value", "pass").unwrap();
        assert_eq!(cipher.open(&env, "pass").unwrap(), "value");
    }

    #[test]
    fn invalid_utf8_plaintext_is_an_encoding_error() {
        let key = kdf::derive_key("pass");
        let nonce = aead::nonce().unwrap();
        let (ct, tag) = aead::aead_seal(&key, &nonce, &[0xff, 0xfe, 0xfd]).unwrap();
        let env = wire::to_text(&wire::encode_wire(&nonce, &ct, &tag));
        assert_eq!(open(&env, "pass").unwrap_err(), DecryptionError::Encoding);
    }
}
