//! This crate validates value-transfer transactions against a UTXO pool and
//! serializes them to a compact, deterministic binary wire format.
//! It includes modules for data types, the pool lookup capability, signature
//! verification, validation, the binary codec, configuration and logging.

pub mod types; // Transactions, UTXOs and validation results.
pub mod pool; // UTXO lookup capability and the in-memory pool.
pub mod crypto; // Signature verification capability.
pub mod validation; // Canonical signing payload and the transaction validator.
pub mod codec; // Binary encoding and decoding of transactions.
pub mod json; // Field-labelled JSON with JavaScript number formatting.
pub mod config; // Defines and loads configuration.
pub mod telemetry; // Logging setup.

// Re-export commonly used types and operations for easier access.
pub use types::*;
pub use config::Config;
pub use codec::{decode_transaction, encode_transaction, get_encoding_efficiency};
pub use validation::{Validator, signing_payload};
