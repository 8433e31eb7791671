use serde::{Deserialize, Serialize};

/// Body posted by the checkout page after the gateway reports a payment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyPaymentRequest {
    #[serde(default)]
    pub razorpay_order_id: Option<String>,
    #[serde(default)]
    pub razorpay_payment_id: Option<String>,
    #[serde(default)]
    pub razorpay_signature: Option<String>,
}

impl VerifyPaymentRequest {
    /// Returns `(order_id, payment_id, signature)` or the name of the first missing field.
    pub fn fields(&self) -> Result<(&str, &str, &str), &'static str> {
        fn required<'a>(v: &'a Option<String>, name: &'static str) -> Result<&'a str, &'static str> {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .ok_or(name)
        }

        Ok((
            required(&self.razorpay_order_id, "razorpay_order_id")?,
            required(&self.razorpay_payment_id, "razorpay_payment_id")?,
            required(&self.razorpay_signature, "razorpay_signature")?,
        ))
    }
}

/// `{ "success": true, "message": ... }` or `{ "success": false, "error": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyPaymentResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VerifyPaymentResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_are_named() {
        let req: VerifyPaymentRequest =
            serde_json::from_str(r#"{"razorpay_order_id":"o","razorpay_signature":"s"}"#).unwrap();
        assert_eq!(req.fields(), Err("razorpay_payment_id"));

        let req: VerifyPaymentRequest = serde_json::from_str(
            r#"{"razorpay_order_id":" ","razorpay_payment_id":"p","razorpay_signature":"s"}"#,
        )
        .unwrap();
        assert_eq!(req.fields(), Err("razorpay_order_id"));
    }

    #[test]
    fn envelope_omits_empty_fields() {
        let ok = serde_json::to_string(&VerifyPaymentResponse::ok("done")).unwrap();
        assert_eq!(ok, r#"{"success":true,"message":"done"}"#);

        let failed = serde_json::to_string(&VerifyPaymentResponse::failed("bad")).unwrap();
        assert_eq!(failed, r#"{"success":false,"error":"bad"}"#);
    }
}
