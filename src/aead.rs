//! AEAD: AES-256-GCM, 96-bit nonce, 128-bit detached tag, no AAD.

use aes_gcm::{
    aead::{generic_array::typenum::Unsigned, AeadCore, AeadInPlace, KeyInit},
    Aes256Gcm, Key, Nonce, Tag,
};
use getrandom::getrandom;

use crate::error::{DecryptionError, SealError};
use crate::wire::{KEY_BYTES, NONCE_BYTES, TAG_BYTES};

// The wire layout slices the tag at a fixed offset.
const _: () = assert!(<<Aes256Gcm as AeadCore>::TagSize as Unsigned>::USIZE == TAG_BYTES);
const _: () = assert!(<<Aes256Gcm as AeadCore>::NonceSize as Unsigned>::USIZE == NONCE_BYTES);

/// Generate a random 12-byte nonce. Used during encryption only.
pub fn nonce() -> Result<[u8; NONCE_BYTES], SealError> {
    let mut n = [0u8; NONCE_BYTES];
    getrandom(&mut n).map_err(|_| SealError)?;
    Ok(n)
}

/// AEAD seal. Returns `(ciphertext, tag)`; ciphertext length equals
/// plaintext length.
pub fn aead_seal(
    key: &[u8; KEY_BYTES],
    nonce: &[u8; NONCE_BYTES],
    plaintext: &[u8],
) -> Result<(Vec<u8>, [u8; TAG_BYTES]), SealError> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(nonce), b"", &mut buffer)
        .map_err(|_| SealError)?;

    let mut out = [0u8; TAG_BYTES];
    out.copy_from_slice(&tag);
    Ok((buffer, out))
}

/// AEAD open. On tag failure the working buffer is dropped and nothing is
/// returned.
pub fn aead_open(
    key: &[u8; KEY_BYTES],
    nonce: &[u8; NONCE_BYTES],
    ciphertext: &[u8],
    tag: &[u8; TAG_BYTES],
) -> Result<Vec<u8>, DecryptionError> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    let mut buffer = ciphertext.to_vec();
    cipher
        .decrypt_in_place_detached(Nonce::from_slice(nonce), b"", &mut buffer, Tag::from_slice(tag))
        .map_err(|_| DecryptionError::AuthenticationTagMismatch)?;
    Ok(buffer)
}
