//! Callback signature helpers.
//!
//! The gateway signs its checkout callback as
//! `HMAC-SHA256(secret, order_id + "|" + payment_id)`, hex-encoded.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Computes the expected callback signature for an (order, payment) pair.
pub fn sign_payment(order_id: &str, payment_id: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies a callback signature using constant-time comparison.
pub fn verify_payment_signature(
    order_id: &str,
    payment_id: &str,
    signature: &str,
    secret: &str,
) -> bool {
    let expected = sign_payment(order_id, payment_id, secret);
    expected.as_bytes().ct_eq(signature.as_bytes()).into()
}
