//! Envelope wire format
//!
//! Format:
//!   nonce[12] || ciphertext[len(plaintext)] || tag[16]
//!
//! Transported as standard base64 with padding. There is no header or
//! version byte; the layout is fixed and must stay byte-compatible with
//! other implementations of the same scheme.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::DecryptionError;

// ---------------------------------------------------------------------------
// Component sizes
// ---------------------------------------------------------------------------

pub const NONCE_BYTES: usize = 12;
pub const TAG_BYTES: usize = 16;
pub const KEY_BYTES: usize = 32;

/// Smallest valid envelope: nonce + tag around an empty ciphertext.
pub const MIN_ENVELOPE_BYTES: usize = NONCE_BYTES + TAG_BYTES; // 28

/// Borrowed view of a decoded envelope.
#[derive(Debug, Clone, Copy)]
pub struct WireComponents<'a> {
    pub nonce: &'a [u8; NONCE_BYTES],
    pub ciphertext: &'a [u8],
    pub tag: &'a [u8; TAG_BYTES],
}

pub fn decode_wire(data: &[u8]) -> Result<WireComponents<'_>, DecryptionError> {
    if data.len() < MIN_ENVELOPE_BYTES {
        return Err(DecryptionError::MalformedEnvelope);
    }

    let tag_start = data.len() - TAG_BYTES;

    let nonce: &[u8; NONCE_BYTES] = data[..NONCE_BYTES]
        .try_into()
        .map_err(|_| DecryptionError::MalformedEnvelope)?;

    let tag: &[u8; TAG_BYTES] = data[tag_start..]
        .try_into()
        .map_err(|_| DecryptionError::MalformedEnvelope)?;

    Ok(WireComponents {
        nonce,
        ciphertext: &data[NONCE_BYTES..tag_start],
        tag,
    })
}

pub fn encode_wire(nonce: &[u8; NONCE_BYTES], ciphertext: &[u8], tag: &[u8; TAG_BYTES]) -> Vec<u8> {
    let mut out = Vec::with_capacity(MIN_ENVELOPE_BYTES + ciphertext.len());
    out.extend_from_slice(nonce);
    out.extend_from_slice(ciphertext);
    out.extend_from_slice(tag);
    out
}

// ---------------------------------------------------------------------------
// Text encoding
// ---------------------------------------------------------------------------

pub fn to_text(envelope: &[u8]) -> String {
    STANDARD.encode(envelope)
}

pub fn from_text(text: &str) -> Result<Vec<u8>, DecryptionError> {
    STANDARD
        .decode(text)
        .map_err(|_| DecryptionError::MalformedEnvelope)
}
