//! Error types for the envelope cipher, the request signer and the
//! destination transform.
//!
//! None of these carry key material, passphrases or plaintext.

use thiserror::Error;

/// Failure to open an envelope.
///
/// Every variant is terminal: the core never retries and never returns
/// partial plaintext.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecryptionError {
    /// Input is not valid base64, or decodes to fewer than
    /// [`MIN_ENVELOPE_BYTES`](crate::wire::MIN_ENVELOPE_BYTES) bytes.
    #[error("malformed envelope")]
    MalformedEnvelope,

    /// GCM tag did not verify: wrong passphrase or tampered envelope.
    #[error("authentication tag mismatch")]
    AuthenticationTagMismatch,

    /// Tag verified but the plaintext is not UTF-8.
    #[error("decrypted value is not valid UTF-8")]
    Encoding,
}

/// Failure on the seal path (RNG unavailable or cipher failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("envelope sealing failed")]
pub struct SealError;

#[derive(Debug, Error)]
pub enum SigningError {
    /// Request body could not be rendered as JSON.
    #[error("request body is not serializable: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The MAC rejected the key. HMAC accepts any key length, so this is
    /// not expected in practice.
    #[error("invalid signing key")]
    InvalidKey,
}

/// A zero-knowledge destination failed to open during an inbound transform.
///
/// Indices are positions in the input slice and in that payment's
/// destination list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("destination {destination} of payment {payment} could not be opened: {source}")]
pub struct TransformError {
    pub payment: usize,
    pub destination: usize,
    #[source]
    pub source: DecryptionError,
}
