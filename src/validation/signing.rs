//! Canonical signing payload
//!
//! The payload is the compact JSON of the transaction with every signature
//! stripped, numbers written as JavaScript writes them. Signers sign it and
//! the validator re-derives it.

use crate::{Transaction, json::to_unsigned_json};

/// Build the deterministic, signature-free representation of `tx`
///
/// The rendered views hold only strings and JavaScript-formatted numbers,
/// so serialization does not fail for any transaction.
pub fn signing_payload(tx: &Transaction) -> serde_json::Result<String> {
    to_unsigned_json(tx)
}
