//! # branta-zk
//!
//! Client-side cryptography for the Branta v2 payments API.
//!
//! ## Quick Start
//!
//! ```rust
//! use branta_zk::{open, seal};
//!
//! let envelope = seal("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa", "passphrase").unwrap();
//! let value = open(&envelope, "passphrase").unwrap();
//!
//! assert_eq!(value, "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa");
//! ```
//!
//! ## Components
//!
//! - **Envelope cipher**: SHA-256(passphrase) keyed AES-256-GCM,
//!   `base64(nonce[12] || ciphertext || tag[16])`
//! - **Request signer**: HMAC-SHA256 over `METHOD|URL|BODY|TIMESTAMP`,
//!   sent as `X-HMAC-Signature` / `X-HMAC-Timestamp`
//! - **Destination transform**: seals every `isZk` destination of a payment
//!   under one fresh passphrase, and opens them again
//! - **V2 client**: the three together around an injected [`Transport`]
//!
//! ## What's NOT Provided
//!
//! - Key management or passphrase storage
//! - Password hardening (the passphrase is hashed once, no stretching)
//! - Retries
//! - Server-side freshness checks for signed requests

#![deny(unsafe_code)]

mod aead;
mod kdf;

pub mod client;
pub mod destination;
pub mod envelope;
pub mod error;
pub mod options;
pub mod signer;
pub mod transport;

// Wire module is public for tooling (inspection, fuzzing) but the layout
// constants are the only stable part.
#[doc(hidden)]
pub mod wire;

pub use client::{ClientError, V2Client, ZkPaymentReceipt};
pub use destination::{
    open_payments, seal_payment, seal_payment_with, Destination, Passphrase, Payment,
    SealedPayment,
};
pub use envelope::{inspect, open, seal, EnvelopeCipher, EnvelopeInfo};
pub use error::{DecryptionError, SealError, SigningError, TransformError};
pub use options::{resolve, ClientOptions, LOCALHOST_URL};
pub use signer::{
    canonical_message, sign, sign_serialized, verify, Clock, FixedClock, RequestSignature,
    SystemClock, SIGNATURE_HEADER, TIMESTAMP_HEADER,
};
pub use transport::{HttpResponse, Transport, TransportError};

#[cfg(feature = "http")]
pub use transport::ReqwestTransport;

// ---------------------------------------------------------------------------
// Version info
// ---------------------------------------------------------------------------

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Minimum decoded envelope size in bytes.
pub const MIN_ENVELOPE_BYTES: usize = wire::MIN_ENVELOPE_BYTES;
