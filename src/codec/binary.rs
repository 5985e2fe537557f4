//! Binary transaction codec
//!
//! Wire grammar, all integers big-endian:
//!
//! ```text
//! transaction := string(id) u8(inputCount) input* u8(outputCount) output* f64(timestamp)
//! utxoId      := string(txId) u16(outputIndex)
//! input       := utxoId string(owner) string(signature)
//! output      := f64(amount) string(recipient)
//! string(S)   := u8(byteLength(S)) utf8(S)
//! ```

use crate::{Transaction, TransactionInput, TransactionOutput, UtxoId};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("string too long for encoding: {field} is {len} bytes (max 255)")]
    StringTooLong { field: &'static str, len: usize },

    #[error("too many inputs for encoding: {0} (max 255)")]
    TooManyInputs(usize),

    #[error("too many outputs for encoding: {0} (max 255)")]
    TooManyOutputs(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodingError {
    #[error("unexpected end of buffer at offset {offset}: needed {needed} bytes, {remaining} left")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("invalid UTF-8 in {field} at offset {offset}")]
    InvalidUtf8 { field: &'static str, offset: usize },

    #[error("{0} trailing bytes after transaction")]
    TrailingBytes(usize),
}

/// Encode a transaction, signatures included
///
/// Fails before writing anything that would not fit its prefix, so no
/// truncated encoding is ever produced.
pub fn encode_transaction(tx: &Transaction) -> Result<Vec<u8>, EncodingError> {
    let mut buf = Vec::with_capacity(encoded_len_hint(tx));

    put_string(&mut buf, "id", &tx.id)?;

    put_count(&mut buf, tx.inputs.len()).map_err(EncodingError::TooManyInputs)?;
    for input in &tx.inputs {
        put_input(&mut buf, input)?;
    }

    put_count(&mut buf, tx.outputs.len()).map_err(EncodingError::TooManyOutputs)?;
    for output in &tx.outputs {
        put_output(&mut buf, output)?;
    }

    buf.extend_from_slice(&tx.timestamp.to_be_bytes());
    Ok(buf)
}

fn put_input(buf: &mut Vec<u8>, input: &TransactionInput) -> Result<(), EncodingError> {
    put_string(buf, "utxoId.txId", &input.utxo_id.tx_id)?;
    buf.extend_from_slice(&input.utxo_id.output_index.to_be_bytes());
    put_string(buf, "owner", &input.owner)?;
    put_string(buf, "signature", &input.signature)
}

fn put_output(buf: &mut Vec<u8>, output: &TransactionOutput) -> Result<(), EncodingError> {
    buf.extend_from_slice(&output.amount.to_be_bytes());
    put_string(buf, "recipient", &output.recipient)
}

fn put_count(buf: &mut Vec<u8>, count: usize) -> Result<(), usize> {
    let count = u8::try_from(count).map_err(|_| count)?;
    buf.push(count);
    Ok(())
}

fn put_string(buf: &mut Vec<u8>, field: &'static str, s: &str) -> Result<(), EncodingError> {
    let bytes = s.as_bytes();
    let Ok(len) = u8::try_from(bytes.len()) else {
        warn!("Refusing to encode {}: {} bytes", field, bytes.len());
        return Err(EncodingError::StringTooLong {
            field,
            len: bytes.len(),
        });
    };
    buf.push(len);
    buf.extend_from_slice(bytes);
    Ok(())
}

// Exact for encodable transactions, only a capacity hint otherwise
fn encoded_len_hint(tx: &Transaction) -> usize {
    let string = |s: &str| 1 + s.len();
    let inputs: usize = tx
        .inputs
        .iter()
        .map(|i| string(&i.utxo_id.tx_id) + 2 + string(&i.owner) + string(&i.signature))
        .sum();
    let outputs: usize = tx.outputs.iter().map(|o| 8 + string(&o.recipient)).sum();
    string(&tx.id) + 1 + inputs + 1 + outputs + 8
}

/// Decode a transaction previously produced by [`encode_transaction`]
///
/// Every read is bounds-checked. The buffer must hold exactly one
/// transaction; leftover bytes are rejected.
pub fn decode_transaction(bytes: &[u8]) -> Result<Transaction, DecodingError> {
    let mut reader = Reader::new(bytes);

    let id = reader.string("id")?;

    let input_count = reader.u8()?;
    let mut inputs = Vec::with_capacity(input_count as usize);
    for _ in 0..input_count {
        let tx_id = reader.string("utxoId.txId")?;
        let output_index = reader.u16()?;
        inputs.push(TransactionInput {
            utxo_id: UtxoId {
                tx_id,
                output_index,
            },
            owner: reader.string("owner")?,
            signature: reader.string("signature")?,
        });
    }

    let output_count = reader.u8()?;
    let mut outputs = Vec::with_capacity(output_count as usize);
    for _ in 0..output_count {
        let amount = reader.f64()?;
        outputs.push(TransactionOutput {
            amount,
            recipient: reader.string("recipient")?,
        });
    }

    let timestamp = reader.f64()?;

    let remaining = reader.remaining();
    if remaining != 0 {
        warn!("Decoded transaction {} followed by {} bytes", id, remaining);
        return Err(DecodingError::TrailingBytes(remaining));
    }

    Ok(Transaction {
        id,
        inputs,
        outputs,
        timestamp,
    })
}

/// Forward-only cursor over the input buffer
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodingError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(DecodingError::UnexpectedEof {
                offset: self.pos,
                needed: n,
                remaining,
            });
        }
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], DecodingError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, DecodingError> {
        Ok(self.array::<1>()?[0])
    }

    fn u16(&mut self) -> Result<u16, DecodingError> {
        self.array().map(u16::from_be_bytes)
    }

    fn f64(&mut self) -> Result<f64, DecodingError> {
        self.array().map(f64::from_be_bytes)
    }

    fn string(&mut self, field: &'static str) -> Result<String, DecodingError> {
        let len = self.u8()? as usize;
        let offset = self.pos;
        let bytes = self.take(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| DecodingError::InvalidUtf8 { field, offset })
    }
}
