#![no_main]

use libfuzzer_sys::fuzz_target;
use once_cell::sync::Lazy;

static SEALED: Lazy<String> =
    Lazy::new(|| branta_zk::seal("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa", "fuzz").unwrap());

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Arbitrary text as both envelope and passphrase.
    let _ = branta_zk::open(text, text);
    let _ = branta_zk::open(&SEALED, text);
    if let Ok(info) = branta_zk::inspect(text) {
        assert_eq!(
            info.total_bytes,
            info.nonce_bytes + info.ciphertext_bytes + info.tag_bytes
        );
    }
});
