//! Transaction Codec Module
//!
//! This module converts transactions to and from the compact binary wire
//! format, and reports how it compares in size to labelled JSON.
//! The codec never consults the pool or the validator.

mod binary;
mod efficiency;

#[cfg(test)]
mod tests;

pub use binary::{DecodingError, EncodingError, decode_transaction, encode_transaction};
pub use efficiency::{EncodingEfficiency, get_encoding_efficiency};
