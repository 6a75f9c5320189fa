//! v2 API client: wires the envelope cipher and the request signer around
//! an injected [`Transport`].
//!
//! Routes:
//!   GET  {base}/v2/payments/{address}
//!   POST {base}/v2/payments               (signed when an HMAC secret is set)
//!   GET  {base}/v2/api-keys/health-check
//!
//! No retries. Every failure is returned to the caller as a [`ClientError`].

use std::sync::Arc;

use thiserror::Error;

use crate::destination::{self, Passphrase, Payment};
use crate::error::{SealError, SigningError, TransformError};
use crate::options::ClientOptions;
use crate::signer::{self, Clock, SystemClock};
use crate::transport::{Headers, Transport, TransportError};

const PAYMENTS_PATH: &str = "/v2/payments";
const HEALTH_CHECK_PATH: &str = "/v2/api-keys/health-check";

#[derive(Debug, Error)]
pub enum ClientError {
    /// No base URL in either the per-call or the default options.
    #[error("base URL is a required option")]
    MissingBaseUrl,

    /// No API key for a call that needs one.
    #[error("unauthorized: no API key configured")]
    Unauthorized,

    /// Server answered with a non-success status (400, 401, 502, ...).
    #[error("server returned status {0}")]
    Status(u16),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("invalid response body: {0}")]
    InvalidResponse(#[source] serde_json::Error),

    #[error(transparent)]
    Seal(#[from] SealError),

    #[error(transparent)]
    Signing(#[from] SigningError),

    #[error(transparent)]
    Decryption(#[from] TransformError),
}

/// Outcome of [`V2Client::add_zk_payment`].
#[derive(Debug, Clone)]
pub struct ZkPaymentReceipt {
    /// Payment as echoed by the server (zk values still sealed).
    pub payment: Payment,
    /// Only way to open the zk destinations later. `None` when the payment
    /// had none.
    pub passphrase: Option<Passphrase>,
}

pub struct V2Client<T: Transport> {
    transport: T,
    defaults: ClientOptions,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl<T: Transport> V2Client<T> {
    pub fn new(transport: T, defaults: ClientOptions) -> Self {
        Self {
            transport,
            defaults,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the signing clock.
    pub fn with_clock(mut self, clock: impl Clock + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn defaults(&self) -> &ClientOptions {
        &self.defaults
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Payments registered for `address`. A non-success status or an empty
    /// body yields an empty list.
    pub async fn get_payments(
        &self,
        address: &str,
        options: Option<&ClientOptions>,
    ) -> Result<Vec<Payment>, ClientError> {
        let opts = self.effective(options);
        let url = endpoint(&opts, &format!("{}/{}", PAYMENTS_PATH, address))?;

        let resp = self.transport.get(&url, &[]).await?;
        if !resp.is_success() || resp.is_empty() {
            tracing::debug!(status = resp.status, "no payments returned");
            return Ok(Vec::new());
        }

        serde_json::from_str(&resp.body).map_err(ClientError::InvalidResponse)
    }

    /// Payments for `address` with every zk destination opened under
    /// `passphrase`. Fails as a whole if any destination does not open.
    pub async fn get_zk_payments(
        &self,
        address: &str,
        passphrase: &str,
        options: Option<&ClientOptions>,
    ) -> Result<Vec<Payment>, ClientError> {
        let mut payments = self.get_payments(address, options).await?;
        destination::open_payments(&mut payments, passphrase)?;
        Ok(payments)
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Register a payment as-is.
    pub async fn add_payment(
        &self,
        payment: &Payment,
        options: Option<&ClientOptions>,
    ) -> Result<Payment, ClientError> {
        let opts = self.effective(options);
        let url = endpoint(&opts, PAYMENTS_PATH)?;
        let mut headers = auth_headers(&opts)?;

        // Signed bytes and sent bytes are the same string.
        let body = serde_json::to_string(payment).map_err(SigningError::from)?;
        headers.push(("Content-Type".into(), "application/json".into()));

        if let Some(secret) = opts.hmac_secret() {
            let sig = signer::sign_serialized("POST", &url, &body, secret, &*self.clock)?;
            for (name, value) in sig.headers() {
                headers.push((name.to_string(), value.to_string()));
            }
        }

        let resp = self.transport.post(&url, &headers, body).await?;
        if !resp.is_success() {
            tracing::warn!(status = resp.status, "payment rejected");
            return Err(ClientError::Status(resp.status));
        }

        serde_json::from_str(&resp.body).map_err(ClientError::InvalidResponse)
    }

    /// Seal the zk destinations under a fresh passphrase, then register the
    /// payment. The passphrase never leaves this process.
    pub async fn add_zk_payment(
        &self,
        payment: &Payment,
        options: Option<&ClientOptions>,
    ) -> Result<ZkPaymentReceipt, ClientError> {
        let sealed = destination::seal_payment(payment)?;
        let payment = self.add_payment(&sealed.payment, options).await?;
        Ok(ZkPaymentReceipt {
            payment,
            passphrase: sealed.passphrase,
        })
    }

    // -----------------------------------------------------------------------
    // Health
    // -----------------------------------------------------------------------

    /// Whether the server accepts the configured API key.
    pub async fn is_api_key_valid(&self, options: Option<&ClientOptions>) -> Result<bool, ClientError> {
        let opts = self.effective(options);
        let url = endpoint(&opts, HEALTH_CHECK_PATH)?;
        let headers = auth_headers(&opts)?;

        let resp = self.transport.get(&url, &headers).await?;
        Ok(resp.is_success())
    }

    fn effective(&self, options: Option<&ClientOptions>) -> ClientOptions {
        match options {
            Some(explicit) => explicit.merged_over(&self.defaults),
            None => self.defaults.merged_over(&ClientOptions::default()),
        }
    }
}

fn endpoint(opts: &ClientOptions, path: &str) -> Result<String, ClientError> {
    let base = opts.base_url().ok_or(ClientError::MissingBaseUrl)?;
    Ok(format!("{}{}", base.trim_end_matches('/'), path))
}

fn auth_headers(opts: &ClientOptions) -> Result<Headers, ClientError> {
    let key = opts.api_key().ok_or(ClientError::Unauthorized)?;
    Ok(vec![("Authorization".into(), format!("Bearer {}", key))])
}
