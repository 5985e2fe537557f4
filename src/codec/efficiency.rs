//! Encoding-efficiency diagnostics

use super::binary::encode_transaction;
use crate::{Transaction, json::to_labelled_json};
use serde::Serialize;

/// Size comparison between the labelled JSON and binary encodings
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodingEfficiency {
    pub json_size: usize,
    /// `-1` when the transaction cannot be binary-encoded
    pub binary_size: i64,
    pub savings: String,
}

/// Compare the JSON and binary sizes of a transaction
///
/// The JSON side matches what a JavaScript client would produce for the same
/// transaction, numbers included.
pub fn get_encoding_efficiency(tx: &Transaction) -> EncodingEfficiency {
    let json_size = to_labelled_json(tx).map_or(0, |json| json.len());

    match encode_transaction(tx) {
        Ok(binary) if json_size > 0 => {
            let savings = (json_size as f64 - binary.len() as f64) / json_size as f64 * 100.0;
            EncodingEfficiency {
                json_size,
                binary_size: binary.len() as i64,
                savings: format!("{savings:.1}%"),
            }
        }
        _ => EncodingEfficiency {
            json_size,
            binary_size: -1,
            savings: "Not implemented".to_string(),
        },
    }
}
