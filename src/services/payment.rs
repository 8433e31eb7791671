//! Payment gateway callback signature check.
//!
//! The gateway signs `"<order_id>|<payment_id>"` with HMAC-SHA256 under the merchant key
//! secret and sends the lowercase hex digest back with the checkout result.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureError {
    InvalidKey,
    NotHex,
    Mismatch,
}

impl fmt::Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKey => write!(f, "payment key secret rejected by hmac"),
            Self::NotHex => write!(f, "signature is not valid hex"),
            Self::Mismatch => write!(f, "signature mismatch"),
        }
    }
}

impl std::error::Error for SignatureError {}

#[derive(Clone)]
pub struct PaymentVerifier {
    key_secret: String,
}

impl fmt::Debug for PaymentVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentVerifier").finish_non_exhaustive()
    }
}

impl PaymentVerifier {
    pub fn new(key_secret: impl Into<String>) -> Self {
        Self {
            key_secret: key_secret.into(),
        }
    }

    fn mac(&self, order_id: &str, payment_id: &str) -> Result<HmacSha256, SignatureError> {
        let mut mac = HmacSha256::new_from_slice(self.key_secret.as_bytes())
            .map_err(|_| SignatureError::InvalidKey)?;
        mac.update(order_id.as_bytes());
        mac.update(b"|");
        mac.update(payment_id.as_bytes());
        Ok(mac)
    }

    /// Hex signature the gateway is expected to send for this order/payment pair.
    pub fn sign(&self, order_id: &str, payment_id: &str) -> Result<String, SignatureError> {
        let mac = self.mac(order_id, payment_id)?;
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Constant-time comparison against the presented hex signature.
    pub fn verify(
        &self,
        order_id: &str,
        payment_id: &str,
        signature_hex: &str,
    ) -> Result<(), SignatureError> {
        let presented = hex::decode(signature_hex.trim()).map_err(|_| SignatureError::NotHex)?;
        self.mac(order_id, payment_id)?
            .verify_slice(&presented)
            .map_err(|_| SignatureError::Mismatch)
    }
}
