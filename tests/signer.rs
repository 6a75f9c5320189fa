use branta_zk::{
    canonical_message, sign, sign_serialized, verify, Clock, Destination, FixedClock, Payment,
    SigningError, SystemClock,
};
use serde::ser::{Error as _, Serialize, Serializer};

const URL: &str = "http://localhost:3000/v2/payments";
const TS: u64 = 1771444088;

fn body() -> Payment {
    Payment::new(vec![Destination::plain("123")])
}

fn is_lower_hex64(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[test]
fn deterministic_for_fixed_clock() {
    let a = sign("POST", URL, &body(), "consistent-secret", &|| TS).unwrap();
    let b = sign("POST", URL, &body(), "consistent-secret", &|| TS).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.timestamp, "1771444088");
}

#[test]
fn every_field_changes_the_signature() {
    let clock = FixedClock(TS);
    let base = sign("POST", URL, &body(), "secret", &clock).unwrap();

    let other_secret = sign("POST", URL, &body(), "secret2", &clock).unwrap();
    let other_method = sign("PUT", URL, &body(), "secret", &clock).unwrap();
    let other_url = sign("POST", "http://localhost:3000/v2/payment", &body(), "secret", &clock).unwrap();
    let other_body = sign(
        "POST",
        URL,
        &Payment::new(vec![Destination::plain("124")]),
        "secret",
        &clock,
    )
    .unwrap();
    let other_time = sign("POST", URL, &body(), "secret", &FixedClock(TS + 1)).unwrap();

    for sig in [other_secret, other_method, other_url, other_body, other_time] {
        assert_ne!(sig.signature, base.signature);
    }
}

#[test]
fn format_with_system_clock() {
    let before = SystemClock.now_unix();
    let sig = sign("POST", URL, &body(), "test-secret-key", &SystemClock).unwrap();
    let after = SystemClock.now_unix();

    assert!(is_lower_hex64(&sig.signature), "{}", sig.signature);
    assert_eq!(sig.timestamp.len(), 10);
    assert!(sig.timestamp.bytes().all(|b| b.is_ascii_digit()));

    let ts: u64 = sig.timestamp.parse().unwrap();
    assert!(ts >= before && ts <= after);
}

#[test]
fn sign_matches_sign_serialized() {
    let json = serde_json::to_string(&body()).unwrap();
    assert_eq!(json, r#"{"destinations":[{"value":"123","isZk":false}]}"#);

    let a = sign("POST", URL, &body(), "s", &FixedClock(TS)).unwrap();
    let b = sign_serialized("POST", URL, &json, "s", &FixedClock(TS)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn verify_accepts_own_signature_only() {
    let json = serde_json::to_string(&body()).unwrap();
    let sig = sign_serialized("POST", URL, &json, "s", &FixedClock(TS)).unwrap();

    assert!(verify("POST", URL, &json, &sig.timestamp, "s", &sig.signature));
    assert!(!verify("POST", URL, &json, "1771444089", "s", &sig.signature));
    assert!(!verify("POST", URL, &json, &sig.timestamp, "t", &sig.signature));
    assert!(!verify("POST", URL, "{}", &sig.timestamp, "s", &sig.signature));
}

#[test]
fn canonical_message_order() {
    assert_eq!(
        canonical_message("POST", URL, "null", "1"),
        "POST|http://localhost:3000/v2/payments|null|1"
    );
}

struct Unserializable;

impl Serialize for Unserializable {
    fn serialize<S: Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
        Err(S::Error::custom("refused"))
    }
}

#[test]
fn unserializable_body_is_a_serialization_error() {
    let err = sign("POST", URL, &Unserializable, "s", &FixedClock(TS)).unwrap_err();
    assert!(matches!(err, SigningError::Serialization(_)));
}
