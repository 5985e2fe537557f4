use crate::{
    Transaction, ValidationError, ValidationResult, crypto::SignatureVerifier, pool::UtxoLookup,
    validation::signing::signing_payload,
};
use std::collections::HashSet;
use tracing::{debug, warn};

pub struct Validator<P, V> {
    pool: P,
    verifier: V,
}

impl<P: UtxoLookup, V: SignatureVerifier> Validator<P, V> {
    pub fn new(pool: P, verifier: V) -> Self {
        Self { pool, verifier }
    }

    /// Validate a transaction against the pool
    ///
    /// Every input and output is inspected even after earlier failures, so the
    /// result carries the complete defect list. Never mutates the transaction
    /// or the pool.
    pub fn validate_transaction(&self, tx: &Transaction) -> ValidationResult {
        debug!(
            "Validating transaction {} ({} inputs, {} outputs)",
            tx.id,
            tx.inputs.len(),
            tx.outputs.len()
        );

        let mut errors = Vec::new();
        let mut total_input = 0.0_f64;
        let mut total_output = 0.0_f64;
        let mut seen: HashSet<(&str, u16)> = HashSet::with_capacity(tx.inputs.len());

        // Signed payload is shared by every input. Rendering cannot fail for
        // these views; should it ever, no input can prove a signature.
        let payload = signing_payload(tx)
            .inspect_err(|e| warn!("Failed to build signing payload for {}: {}", tx.id, e))
            .ok();

        for input in &tx.inputs {
            let utxo_id = &input.utxo_id;

            if !seen.insert((utxo_id.tx_id.as_str(), utxo_id.output_index)) {
                warn!("UTXO {} referenced more than once in {}", utxo_id, tx.id);
                errors.push(ValidationError::DoubleSpending {
                    utxo: utxo_id.clone(),
                });
                continue;
            }

            let Some(utxo) = self.pool.get_utxo(&utxo_id.tx_id, utxo_id.output_index) else {
                warn!("UTXO {} not found in pool", utxo_id);
                errors.push(ValidationError::UtxoNotFound {
                    utxo: utxo_id.clone(),
                });
                continue;
            };

            // Signature must come from the key the UTXO was paid to
            let signed = payload.as_deref().is_some_and(|payload| {
                self.verifier
                    .verify(payload.as_bytes(), &input.signature, &utxo.recipient)
            });
            if !signed {
                warn!("Signature verification failed for UTXO {}", utxo_id);
                errors.push(ValidationError::InvalidSignature {
                    utxo: utxo_id.clone(),
                });
                continue;
            }

            total_input += utxo.amount;
        }

        for (index, output) in tx.outputs.iter().enumerate() {
            if output.amount == 0.0 {
                warn!("Output {} of {} has zero amount", index, tx.id);
                errors.push(ValidationError::ZeroAmountOutput {
                    index,
                    amount: output.amount,
                });
            }
            total_output += output.amount;
        }

        if total_input != total_output {
            warn!(
                "Amount mismatch for {}: inputs {}, outputs {}",
                tx.id, total_input, total_output
            );
            errors.push(ValidationError::AmountMismatch {
                input_total: total_input,
                output_total: total_output,
            });
        }

        let result = ValidationResult::from_errors(errors);
        debug!(
            "Transaction {} validated: valid={}, errors={}",
            tx.id,
            result.valid,
            result.errors.len()
        );
        result
    }
}
