use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Reference to one output of a previous transaction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtxoId {
    pub tx_id: String,
    pub output_index: u16,
}

impl UtxoId {
    pub fn new(tx_id: impl Into<String>, output_index: u16) -> Self {
        Self {
            tx_id: tx_id.into(),
            output_index,
        }
    }
}

impl fmt::Display for UtxoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.tx_id, self.output_index)
    }
}

/// Value sent to a recipient public-key identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutput {
    pub amount: f64,
    pub recipient: String,
}

/// Spend of a pool UTXO
///
/// `owner` is informational; ownership is proven by `signature` against the
/// recipient recorded on the referenced UTXO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    pub utxo_id: UtxoId,
    pub owner: String,
    pub signature: String,
}

/// Value-transfer transaction
///
/// Input and output order is significant for encoding and for the signing
/// payload, not for validity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    /// Epoch milliseconds
    pub timestamp: f64,
}

/// Unspent output as recorded by the pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Utxo {
    pub amount: f64,
    pub recipient: String,
}

/// Category of a validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationErrorKind {
    DoubleSpending,
    UtxoNotFound,
    InvalidSignature,
    ZeroAmountOutputs,
    AmountMismatch,
}

impl ValidationErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationErrorKind::DoubleSpending => "DOUBLE_SPENDING",
            ValidationErrorKind::UtxoNotFound => "UTXO_NOT_FOUND",
            ValidationErrorKind::InvalidSignature => "INVALID_SIGNATURE",
            ValidationErrorKind::ZeroAmountOutputs => "ZERO_AMOUNT_OUTPUTS",
            ValidationErrorKind::AmountMismatch => "AMOUNT_MISMATCH",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationError {
    #[error("UTXO {utxo} used multiple times")]
    DoubleSpending { utxo: UtxoId },

    #[error("UTXO {utxo} not found")]
    UtxoNotFound { utxo: UtxoId },

    #[error("invalid signature for UTXO {utxo}")]
    InvalidSignature { utxo: UtxoId },

    #[error("output {index} amount must not be 0: {amount}")]
    #[serde(rename = "ZERO_AMOUNT_OUTPUTS")]
    ZeroAmountOutput { index: usize, amount: f64 },

    #[error("input total: {input_total}, output total: {output_total}")]
    AmountMismatch { input_total: f64, output_total: f64 },
}

impl ValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            ValidationError::DoubleSpending { .. } => ValidationErrorKind::DoubleSpending,
            ValidationError::UtxoNotFound { .. } => ValidationErrorKind::UtxoNotFound,
            ValidationError::InvalidSignature { .. } => ValidationErrorKind::InvalidSignature,
            ValidationError::ZeroAmountOutput { .. } => ValidationErrorKind::ZeroAmountOutputs,
            ValidationError::AmountMismatch { .. } => ValidationErrorKind::AmountMismatch,
        }
    }

    /// Human-readable diagnostic
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Outcome of validating one transaction
///
/// `valid` is derived from `errors`; there is no way to build a result that
/// claims validity while carrying errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Kinds of the accumulated errors, in report order
    pub fn kinds(&self) -> Vec<ValidationErrorKind> {
        self.errors.iter().map(ValidationError::kind).collect()
    }

    pub fn has(&self, kind: ValidationErrorKind) -> bool {
        self.errors.iter().any(|e| e.kind() == kind)
    }
}
