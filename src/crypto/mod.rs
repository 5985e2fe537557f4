//! Signature Verification Module
//!
//! This module defines the signature-verification capability the validator
//! consumes, and the ECDSA implementation used by default.

mod verifier;

pub use verifier::{EthSignatureVerifier, SignatureVerifier};
