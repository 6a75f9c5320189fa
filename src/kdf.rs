//! KDF
//!
//! key = SHA-256(utf8(passphrase))
//!
//! Single pass, no salt, no iteration. Callers that need a slow KDF must
//! harden the passphrase before it reaches this crate.

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::wire::KEY_BYTES;

pub fn derive_key(passphrase: &str) -> Zeroizing<[u8; KEY_BYTES]> {
    let mut key = Zeroizing::new([0u8; KEY_BYTES]);
    key.copy_from_slice(&Sha256::digest(passphrase.as_bytes()));
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_sha256_of_passphrase() {
        let key = derive_key("1234");
        assert_eq!(
            hex::encode(*key),
            "03ac674216f3e15c761ee1a5e255f067953623c8b388b4459e13f978d7c846f4"
        );
    }

    #[test]
    fn distinct_passphrases_give_distinct_keys() {
        assert_ne!(*derive_key("secret1"), *derive_key("secret2"));
    }
}
