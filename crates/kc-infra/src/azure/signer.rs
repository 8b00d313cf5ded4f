//! Shared Key Lite signatures for Azure Table Storage.
//!
//! The string to sign is the request date followed by the canonicalized
//! resource (`/{account}/{table}()`), MAC'd with HMAC-SHA256 under the
//! base64-decoded account key. The date that was signed must be sent
//! unchanged in `x-ms-date`.

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use kc_core::ports::FetchError;

type HmacSha256 = Hmac<Sha256>;

/// RFC 1123 date as Azure expects it in `x-ms-date`.
const RFC1123_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Signature plus the exact timestamp it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub signature: String,
    pub date: String,
}

/// Signs `canonical_resource` at `now` with a base64 account key.
pub fn sign(
    canonical_resource: &str,
    key_b64: &str,
    now: DateTime<Utc>,
) -> Result<SignedRequest, FetchError> {
    if key_b64.trim().is_empty() {
        return Err(FetchError::SigningKeyInvalid("account key is empty".to_string()));
    }
    let key = STANDARD
        .decode(key_b64.trim())
        .map_err(|e| FetchError::SigningKeyInvalid(format!("account key is not base64: {e}")))?;

    let date = now.format(RFC1123_FORMAT).to_string();
    let string_to_sign = format!("{date}\n{canonical_resource}");

    let mut mac = HmacSha256::new_from_slice(&key)
        .map_err(|e| FetchError::SigningKeyInvalid(e.to_string()))?;
    mac.update(string_to_sign.as_bytes());
    let signature = STANDARD.encode(mac.finalize().into_bytes());

    Ok(SignedRequest { signature, date })
}

/// Signs requests for one storage account.
///
/// The key is only checked when a request is signed, so a missing key turns
/// into a per-request `SigningKeyInvalid` rather than a startup failure.
#[derive(Clone)]
pub struct RequestSigner {
    account: String,
    key_b64: Option<String>,
}

impl RequestSigner {
    pub fn new(account: impl Into<String>, key_b64: Option<String>) -> Self {
        Self {
            account: account.into(),
            key_b64,
        }
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    /// Canonicalized resource of a table query.
    pub fn table_resource(&self, table: &str) -> String {
        format!("/{}/{}()", self.account, table)
    }

    pub fn sign_table(&self, table: &str, now: DateTime<Utc>) -> Result<SignedRequest, FetchError> {
        let key = self
            .key_b64
            .as_deref()
            .ok_or_else(|| FetchError::SigningKeyInvalid("account key is not configured".to_string()))?;
        sign(&self.table_resource(table), key, now)
    }

    /// `Authorization` header value for a signature.
    pub fn authorization(&self, signed: &SignedRequest) -> String {
        format!("SharedKeyLite {}:{}", self.account, signed.signature)
    }
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner")
            .field("account", &self.account)
            .field("key_b64", &self.key_b64.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
