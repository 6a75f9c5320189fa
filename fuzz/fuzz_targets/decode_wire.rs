#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(parts) = branta_zk::wire::decode_wire(data) {
        assert_eq!(
            parts.nonce.len() + parts.ciphertext.len() + parts.tag.len(),
            data.len()
        );
    }
});
