//! Transaction Validation Module
//!
//! This module validates transactions against the UTXO pool.
//! Performs double-spend detection, UTXO resolution, signature verification,
//! zero-output rejection and balance checking, accumulating every defect.

pub mod signing;
mod validator;


pub use signing::signing_payload;
pub use validator::Validator;
