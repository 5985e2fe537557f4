//! UTXO Pool Module
//!
//! This module provides the pool lookup capability consumed by the validator
//! and an in-memory implementation of it.

mod utxo_pool;

pub use utxo_pool::{UtxoLookup, UtxoPool};
