//! Known Answer tests: fixed vectors shared with other implementations.

use branta_zk::wire::{self, KEY_BYTES, MIN_ENVELOPE_BYTES, NONCE_BYTES, TAG_BYTES};
use branta_zk::{inspect, open, sign, Destination, FixedClock, Payment};

const VECTOR_ENVELOPE: &str =
    "pQerSFV+fievHP+guYoGJjx1CzFFrYWHAgWrLhn5473Z19M6+WMScLd1hsk808AEF/x+GpZKmNacFBf5BbQ=";
const VECTOR_SECRET: &str = "1234";
const VECTOR_PLAINTEXT: &str = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";

#[test]
fn test_wire_constants() {
    assert_eq!(NONCE_BYTES, 12);
    assert_eq!(TAG_BYTES, 16);
    assert_eq!(KEY_BYTES, 32);
    assert_eq!(MIN_ENVELOPE_BYTES, 28);
    assert_eq!(branta_zk::MIN_ENVELOPE_BYTES, MIN_ENVELOPE_BYTES);
}

#[test]
fn test_fixed_vector_decrypts() {
    assert_eq!(open(VECTOR_ENVELOPE, VECTOR_SECRET).unwrap(), VECTOR_PLAINTEXT);
}

#[test]
fn test_fixed_vector_layout() {
    let bytes = wire::from_text(VECTOR_ENVELOPE).unwrap();
    assert_eq!(bytes.len(), 62);

    let parts = wire::decode_wire(&bytes).unwrap();
    assert_eq!(hex::encode(parts.nonce), "a507ab48557e7e27af1cffa0");
    assert_eq!(parts.ciphertext.len(), VECTOR_PLAINTEXT.len());

    let info = inspect(VECTOR_ENVELOPE).unwrap();
    assert_eq!(info.total_bytes, 62);
    assert_eq!(info.ciphertext_bytes, 34);
}

#[test]
fn test_fixed_vector_rejects_other_secret() {
    assert!(open(VECTOR_ENVELOPE, "12345").is_err());
}

/// HMAC-SHA256("consistent-secret",
///   `POST|http://localhost:3000/v2/payments|{"destinations":[{"value":"123","isZk":false}]}|1771444088`)
#[test]
fn test_fixed_signature_vector() {
    let payment = Payment::new(vec![Destination::plain("123")]);
    let sig = sign(
        "POST",
        "http://localhost:3000/v2/payments",
        &payment,
        "consistent-secret",
        &FixedClock(1771444088),
    )
    .unwrap();

    assert_eq!(sig.timestamp, "1771444088");
    assert_eq!(
        sig.signature,
        "09ec66bfffe0f30d0be34f9995616e2d17b20cfcbf1bc1bbdd784ccf0a33d494"
    );
}
