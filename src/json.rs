//! Field-labelled JSON rendering of transactions
//!
//! Numbers are written the way JavaScript's `JSON.stringify` writes them
//! (`100`, `40.5`, `1e+21`, `null` for non-finite values), so a payload
//! signed by a JavaScript client is re-derived here byte for byte. Field
//! order is fixed by the view structs below and must not change.

use crate::{Transaction, UtxoId};
use serde::{Serialize, Serializer, ser::Error as _};
use serde_json::value::RawValue;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TransactionView<'a> {
    id: &'a str,
    inputs: Vec<InputView<'a>>,
    outputs: Vec<OutputView<'a>>,
    timestamp: JsNumber,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InputView<'a> {
    utxo_id: &'a UtxoId,
    owner: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    signature: Option<&'a str>,
}

#[derive(Serialize)]
struct OutputView<'a> {
    amount: JsNumber,
    recipient: &'a str,
}

/// `f64` serialized with JavaScript number formatting
struct JsNumber(f64);

impl Serialize for JsNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if !self.0.is_finite() {
            return serializer.serialize_unit();
        }
        let raw = RawValue::from_string(format_js_number(self.0)).map_err(S::Error::custom)?;
        raw.serialize(serializer)
    }
}

fn view(tx: &Transaction, with_signatures: bool) -> TransactionView<'_> {
    TransactionView {
        id: &tx.id,
        inputs: tx
            .inputs
            .iter()
            .map(|input| InputView {
                utxo_id: &input.utxo_id,
                owner: &input.owner,
                signature: with_signatures.then_some(input.signature.as_str()),
            })
            .collect(),
        outputs: tx
            .outputs
            .iter()
            .map(|output| OutputView {
                amount: JsNumber(output.amount),
                recipient: &output.recipient,
            })
            .collect(),
        timestamp: JsNumber(tx.timestamp),
    }
}

/// Compact JSON of the whole transaction, signatures included
pub fn to_labelled_json(tx: &Transaction) -> serde_json::Result<String> {
    serde_json::to_string(&view(tx, true))
}

/// Compact JSON of the transaction with every signature stripped
pub fn to_unsigned_json(tx: &Transaction) -> serde_json::Result<String> {
    serde_json::to_string(&view(tx, false))
}

/// ECMAScript `Number::toString` for finite values
///
/// Shortest round-trip digits, plain notation for decimal exponents in
/// `-6..21`, `e+`/`e-` notation otherwise. Both zeros print as `0`.
pub fn format_js_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    // Shortest round-trip digits as d.ddde<exp>
    let sci = format!("{:e}", value.abs());
    let Some((mantissa, exponent)) = sci.split_once('e') else {
        return sci;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return sci;
    };
    let digits = mantissa.replace('.', "");
    let k = digits.len() as i32;
    let n = exponent + 1;

    let body = if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let sign = if n > 0 { '+' } else { '-' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{sign}{}", (n - 1).abs())
        } else {
            format!("{first}.{rest}e{sign}{}", (n - 1).abs())
        }
    };

    if value < 0.0 { format!("-{body}") } else { body }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TransactionInput, TransactionOutput};

    #[test]
    fn test_js_number_formatting() {
        let cases = [
            (100.0, "100"),
            (1.0, "1"),
            (-0.0, "0"),
            (40.5, "40.5"),
            (-2.25, "-2.25"),
            (0.1, "0.1"),
            (1_700_000_000_000.0, "1700000000000"),
            (123_456.789, "123456.789"),
            (0.000001, "0.000001"),
            (1e-7, "1e-7"),
            (1.5e-10, "1.5e-10"),
            (1e20, "100000000000000000000"),
            (1e21, "1e+21"),
            (1.25e25, "1.25e+25"),
            (f64::MAX, "1.7976931348623157e+308"),
        ];
        for (value, expected) in cases {
            assert_eq!(format_js_number(value), expected, "formatting {value:e}");
        }
    }

    #[test]
    fn test_whole_numbers_have_no_fraction() {
        let tx = Transaction {
            id: "t".into(),
            inputs: vec![],
            outputs: vec![TransactionOutput {
                amount: 100.0,
                recipient: "C".into(),
            }],
            timestamp: 1.0,
        };
        assert_eq!(
            to_labelled_json(&tx).unwrap(),
            r#"{"id":"t","inputs":[],"outputs":[{"amount":100,"recipient":"C"}],"timestamp":1}"#
        );
    }

    #[test]
    fn test_non_finite_numbers_render_as_null() {
        let tx = Transaction {
            id: "t".into(),
            inputs: vec![],
            outputs: vec![TransactionOutput {
                amount: f64::NAN,
                recipient: "C".into(),
            }],
            timestamp: f64::INFINITY,
        };
        assert_eq!(
            to_unsigned_json(&tx).unwrap(),
            r#"{"id":"t","inputs":[],"outputs":[{"amount":null,"recipient":"C"}],"timestamp":null}"#
        );
    }

    #[test]
    fn test_signatures_only_in_labelled_json() {
        let tx = Transaction {
            id: "t".into(),
            inputs: vec![TransactionInput {
                utxo_id: UtxoId::new("p", 0),
                owner: "o".into(),
                signature: "s".into(),
            }],
            outputs: vec![],
            timestamp: 0.0,
        };
        assert_eq!(
            to_labelled_json(&tx).unwrap(),
            r#"{"id":"t","inputs":[{"utxoId":{"txId":"p","outputIndex":0},"owner":"o","signature":"s"}],"outputs":[],"timestamp":0}"#
        );
        assert_eq!(
            to_unsigned_json(&tx).unwrap(),
            r#"{"id":"t","inputs":[{"utxoId":{"txId":"p","outputIndex":0},"owner":"o"}],"outputs":[],"timestamp":0}"#
        );
    }
}
