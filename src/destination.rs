//! Zero-knowledge destination transform.
//!
//! Outbound, every `isZk` destination value is sealed under one fresh
//! passphrase per payment. Inbound, the caller's passphrase opens them again.
//! Non-zk destinations are never touched in either direction.

use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::envelope;
use crate::error::{SealError, TransformError};

// ---------------------------------------------------------------------------
// Payment model
// ---------------------------------------------------------------------------

/// One payment destination (an address, invoice, ...).
///
/// Fields the API adds beyond `value` and `isZk` are kept in `extra` and
/// written back unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub value: String,
    #[serde(rename = "isZk", default)]
    pub is_zk: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Destination {
    /// Destination the server may read.
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_zk: false,
            extra: Map::new(),
        }
    }

    /// Destination sealed client-side before it leaves the process.
    pub fn zk(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_zk: true,
            extra: Map::new(),
        }
    }
}

/// A payment as exchanged with the v2 API.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(default)]
    pub destinations: Vec<Destination>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Payment {
    pub fn new(destinations: Vec<Destination>) -> Self {
        Self {
            destinations,
            extra: Map::new(),
        }
    }

    /// Attach an arbitrary top-level field (description, ttl, ...).
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn has_zk_destinations(&self) -> bool {
        self.destinations.iter().any(|d| d.is_zk)
    }
}

// ---------------------------------------------------------------------------
// Passphrase
// ---------------------------------------------------------------------------

/// Secret that seals the zk destinations of one payment.
///
/// Never sent to the server. Zeroized on drop; `Debug` is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Passphrase(String);

impl Passphrase {
    /// Fresh random passphrase: a UUID v4 (122 bits from the OS RNG) as text.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Passphrase {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Passphrase {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Passphrase(<redacted>)")
    }
}

impl Drop for Passphrase {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl ZeroizeOnDrop for Passphrase {}

// ---------------------------------------------------------------------------
// Outbound
// ---------------------------------------------------------------------------

/// Result of sealing a payment.
#[derive(Clone, Debug)]
pub struct SealedPayment {
    pub payment: Payment,
    /// `None` when the payment had no zk destination.
    pub passphrase: Option<Passphrase>,
}

/// Seal every zk destination under a freshly generated passphrase.
///
/// A payment without zk destinations is returned as-is and no passphrase is
/// generated.
pub fn seal_payment(payment: &Payment) -> Result<SealedPayment, SealError> {
    if !payment.has_zk_destinations() {
        return Ok(SealedPayment {
            payment: payment.clone(),
            passphrase: None,
        });
    }

    let passphrase = Passphrase::generate();
    let payment = seal_payment_with(payment, &passphrase)?;
    Ok(SealedPayment {
        payment,
        passphrase: Some(passphrase),
    })
}

/// Seal every zk destination under a caller-supplied passphrase.
pub fn seal_payment_with(payment: &Payment, passphrase: &Passphrase) -> Result<Payment, SealError> {
    let mut sealed = payment.clone();
    for destination in sealed.destinations.iter_mut().filter(|d| d.is_zk) {
        destination.value = envelope::seal(&destination.value, passphrase.as_str())?;
    }
    Ok(sealed)
}

// ---------------------------------------------------------------------------
// Inbound
// ---------------------------------------------------------------------------

/// Open every zk destination of every payment in place.
///
/// All envelopes are opened before any value is replaced: on error no
/// payment is modified and the error names the first destination that
/// failed.
pub fn open_payments(payments: &mut [Payment], passphrase: &str) -> Result<(), TransformError> {
    let mut opened = Vec::new();

    for (p, payment) in payments.iter().enumerate() {
        for (d, destination) in payment.destinations.iter().enumerate() {
            if !destination.is_zk {
                continue;
            }
            let value = envelope::open(&destination.value, passphrase).map_err(|source| {
                tracing::warn!(payment = p, destination = d, error = %source, "zk destination failed to open");
                TransformError {
                    payment: p,
                    destination: d,
                    source,
                }
            })?;
            opened.push((p, d, value));
        }
    }

    for (p, d, value) in opened {
        payments[p].destinations[d].value = value;
    }
    Ok(())
}
