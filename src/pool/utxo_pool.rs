//! UTXO Pool Module
//!
//! In-memory pool of unspent outputs keyed by `(tx_id, output_index)`.
//! The validator only consumes the point lookup; the mutators exist so the
//! pool can be seeded from configuration and driven by the embedding node.

use crate::{Utxo, config::GenesisUtxo};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Point-lookup capability over a UTXO set
///
/// Implementations must not mutate anything observable on lookup. No
/// snapshot guarantee is expected across successive lookups.
pub trait UtxoLookup {
    fn get_utxo(&self, tx_id: &str, output_index: u16) -> Option<Utxo>;
}

impl<T: UtxoLookup + ?Sized> UtxoLookup for &T {
    fn get_utxo(&self, tx_id: &str, output_index: u16) -> Option<Utxo> {
        (**self).get_utxo(tx_id, output_index)
    }
}

impl<T: UtxoLookup + ?Sized> UtxoLookup for Arc<T> {
    fn get_utxo(&self, tx_id: &str, output_index: u16) -> Option<Utxo> {
        (**self).get_utxo(tx_id, output_index)
    }
}

/// Pool of unspent transaction outputs
///
/// Protected by an RwLock so one pool can be shared behind an `Arc` between
/// validators running on different threads.
#[derive(Debug, Default)]
pub struct UtxoPool {
    /// Unspent outputs indexed by creating transaction ID and output index
    utxos: RwLock<HashMap<(String, u16), Utxo>>,
}

impl UtxoPool {
    /// Creates a new empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pool seeded with the configured genesis outputs
    ///
    /// Later entries overwrite earlier ones with the same key.
    pub fn from_genesis(genesis: &[GenesisUtxo]) -> Self {
        let pool = Self::new();
        for entry in genesis {
            pool.add_utxo(
                entry.tx_id.clone(),
                entry.output_index,
                Utxo {
                    amount: entry.amount,
                    recipient: entry.recipient.clone(),
                },
            );
        }
        debug!("Seeded UTXO pool with {} genesis outputs", pool.len());
        pool
    }

    /// Insert or replace the output at `(tx_id, output_index)`
    pub fn add_utxo(&self, tx_id: impl Into<String>, output_index: u16, utxo: Utxo) {
        let mut utxos = self.utxos.write().unwrap_or_else(PoisonError::into_inner);
        utxos.insert((tx_id.into(), output_index), utxo);
    }

    /// Remove and return the output at `(tx_id, output_index)`, if present
    pub fn remove_utxo(&self, tx_id: &str, output_index: u16) -> Option<Utxo> {
        let mut utxos = self.utxos.write().unwrap_or_else(PoisonError::into_inner);
        utxos.remove(&(tx_id.to_owned(), output_index))
    }

    pub fn len(&self) -> usize {
        self.utxos.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl UtxoLookup for UtxoPool {
    fn get_utxo(&self, tx_id: &str, output_index: u16) -> Option<Utxo> {
        let utxos = self.utxos.read().unwrap_or_else(PoisonError::into_inner);
        utxos.get(&(tx_id.to_owned(), output_index)).cloned()
    }
}
