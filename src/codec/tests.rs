//! Tests for the binary codec and the efficiency report

#[cfg(test)]
mod tests {
    use crate::{
        Transaction, TransactionInput, TransactionOutput, Utxo, UtxoId,
        codec::{
            DecodingError, EncodingError, decode_transaction, encode_transaction,
            get_encoding_efficiency,
        },
        crypto::EthSignatureVerifier,
        json::to_labelled_json,
        pool::UtxoPool,
        validation::{Validator, signing_payload},
    };
    use ethers::signers::{LocalWallet, Signer};
    use ethers::utils::hash_message;

    /// Helper function to create a test transaction
    fn create_test_tx(inputs: usize, outputs: usize) -> Transaction {
        Transaction {
            id: "a3f1c9e2-tx".into(),
            inputs: (0..inputs)
                .map(|i| TransactionInput {
                    utxo_id: UtxoId::new(format!("prev-{i}"), i as u16),
                    owner: "0x90f8bf6a479f320ead074411a4b0e7944ea8c9c1".into(),
                    signature: "ab".repeat(65),
                })
                .collect(),
            outputs: (0..outputs)
                .map(|i| TransactionOutput {
                    amount: 10.25 * (i + 1) as f64,
                    recipient: format!("recipient-{i}"),
                })
                .collect(),
            timestamp: 1_717_171_717_171.0,
        }
    }

    #[test]
    fn test_exact_wire_layout() {
        let tx = Transaction {
            id: "t1".into(),
            inputs: vec![TransactionInput {
                utxo_id: UtxoId::new("p", 1),
                owner: "o".into(),
                signature: "s".into(),
            }],
            outputs: vec![TransactionOutput {
                amount: 1.5,
                recipient: "r".into(),
            }],
            timestamp: 2.0,
        };

        let mut expected = vec![2, b't', b'1'];
        expected.push(1); // input count
        expected.extend_from_slice(&[1, b'p', 0x00, 0x01, 1, b'o', 1, b's']);
        expected.push(1); // output count
        expected.extend_from_slice(&[0x3F, 0xF8, 0, 0, 0, 0, 0, 0, 1, b'r']);
        expected.extend_from_slice(&[0x40, 0, 0, 0, 0, 0, 0, 0]);

        assert_eq!(encode_transaction(&tx).unwrap(), expected);
        assert_eq!(decode_transaction(&expected).unwrap(), tx);
    }

    #[test]
    fn test_round_trip() {
        for (inputs, outputs) in [(0, 0), (1, 1), (3, 2), (255, 255)] {
            let tx = create_test_tx(inputs, outputs);
            let bytes = encode_transaction(&tx).unwrap();
            assert_eq!(decode_transaction(&bytes).unwrap(), tx);
        }
    }

    #[test]
    fn test_round_trip_preserves_float_bits() {
        let mut tx = create_test_tx(0, 4);
        tx.outputs[0].amount = 0.1;
        tx.outputs[1].amount = -0.0;
        tx.outputs[2].amount = f64::MAX;
        tx.outputs[3].amount = f64::MIN_POSITIVE / 2.0;
        tx.timestamp = f64::NAN;

        let decoded = decode_transaction(&encode_transaction(&tx).unwrap()).unwrap();

        for (a, b) in tx.outputs.iter().zip(&decoded.outputs) {
            assert_eq!(a.amount.to_bits(), b.amount.to_bits());
        }
        assert_eq!(decoded.timestamp.to_bits(), tx.timestamp.to_bits());
    }

    #[test]
    fn test_multibyte_strings_prefix_byte_length() {
        let recipient = "abcdeféèêë";
        assert_eq!(recipient.chars().count(), 10);

        let mut tx = create_test_tx(0, 1);
        tx.outputs[0].recipient = recipient.to_string();
        let bytes = encode_transaction(&tx).unwrap();

        // id, input count, output count, amount, then the recipient prefix
        let prefix_at = 1 + tx.id.len() + 1 + 1 + 8;
        assert_eq!(bytes[prefix_at], 14);
        assert_eq!(&bytes[prefix_at + 1..prefix_at + 15], recipient.as_bytes());

        let decoded = decode_transaction(&bytes).unwrap();
        assert_eq!(decoded.outputs[0].recipient, recipient);
    }

    #[test]
    fn test_string_limit() {
        let mut tx = create_test_tx(1, 1);
        tx.inputs[0].signature = "x".repeat(255);
        assert!(encode_transaction(&tx).is_ok());

        tx.inputs[0].signature = "x".repeat(300);
        let err = encode_transaction(&tx).unwrap_err();
        assert_eq!(
            err,
            EncodingError::StringTooLong {
                field: "signature",
                len: 300
            }
        );
        assert!(err.to_string().starts_with("string too long"));
    }

    #[test]
    fn test_string_limit_counts_bytes_not_chars() {
        let mut tx = create_test_tx(0, 0);
        // 128 chars, 256 bytes
        tx.id = "é".repeat(128);
        assert_eq!(
            encode_transaction(&tx),
            Err(EncodingError::StringTooLong { field: "id", len: 256 })
        );
    }

    #[test]
    fn test_count_limits() {
        assert_eq!(
            encode_transaction(&create_test_tx(256, 1)),
            Err(EncodingError::TooManyInputs(256))
        );
        assert_eq!(
            encode_transaction(&create_test_tx(1, 300)),
            Err(EncodingError::TooManyOutputs(300))
        );
    }

    #[test]
    fn test_truncated_buffers_are_rejected() {
        let bytes = encode_transaction(&create_test_tx(2, 2)).unwrap();

        for len in 0..bytes.len() {
            assert!(
                matches!(
                    decode_transaction(&bytes[..len]),
                    Err(DecodingError::UnexpectedEof { .. })
                ),
                "prefix of {len} bytes decoded"
            );
        }
    }

    #[test]
    fn test_empty_buffer() {
        assert_eq!(
            decode_transaction(&[]),
            Err(DecodingError::UnexpectedEof {
                offset: 0,
                needed: 1,
                remaining: 0
            })
        );
    }

    #[test]
    fn test_trailing_bytes_are_rejected() {
        let mut bytes = encode_transaction(&create_test_tx(1, 1)).unwrap();
        bytes.push(0);
        assert_eq!(
            decode_transaction(&bytes),
            Err(DecodingError::TrailingBytes(1))
        );
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let mut bytes = encode_transaction(&create_test_tx(0, 0)).unwrap();
        bytes[1] = 0xFF;
        assert_eq!(
            decode_transaction(&bytes),
            Err(DecodingError::InvalidUtf8 {
                field: "id",
                offset: 1
            })
        );
    }

    #[test]
    fn test_decoded_transaction_still_validates() {
        let wallet: LocalWallet = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
            .parse()
            .unwrap();
        let pool = UtxoPool::new();
        pool.add_utxo(
            "prev-0",
            0,
            Utxo {
                amount: 10.25,
                recipient: format!("{:?}", wallet.address()),
            },
        );

        let mut tx = create_test_tx(1, 1);
        let hash = hash_message(signing_payload(&tx).unwrap().as_bytes());
        tx.inputs[0].signature = wallet.sign_hash(hash).unwrap().to_string();

        let decoded = decode_transaction(&encode_transaction(&tx).unwrap()).unwrap();
        let validator = Validator::new(pool, EthSignatureVerifier);
        assert!(validator.validate_transaction(&decoded).valid);
    }

    #[test]
    fn test_efficiency_report() {
        let tx = create_test_tx(2, 2);
        let report = get_encoding_efficiency(&tx);

        let json_size = to_labelled_json(&tx).unwrap().len();
        let binary_size = encode_transaction(&tx).unwrap().len();
        assert_eq!(report.json_size, json_size);
        assert_eq!(report.binary_size, binary_size as i64);
        assert!(report.binary_size < report.json_size as i64);

        let expected = (json_size - binary_size) as f64 / json_size as f64 * 100.0;
        let reported: f64 = report.savings.trim_end_matches('%').parse().unwrap();
        assert!(report.savings.ends_with('%'));
        assert!((reported - expected).abs() <= 0.05);
    }

    #[test]
    fn test_efficiency_report_counts_javascript_json() {
        let tx = Transaction {
            id: "t".into(),
            inputs: vec![],
            outputs: vec![TransactionOutput {
                amount: 100.0,
                recipient: "C".into(),
            }],
            timestamp: 1.0,
        };
        // {"id":"t","inputs":[],"outputs":[{"amount":100,"recipient":"C"}],"timestamp":1}
        let report = get_encoding_efficiency(&tx);
        assert_eq!(report.json_size, 79);
        // 2 (id) + 1 + 1 + 8 + 2 (recipient) + 8
        assert_eq!(report.binary_size, 22);
        assert_eq!(report.savings, "72.2%");
    }

    #[test]
    fn test_efficiency_report_for_unencodable_transaction() {
        let mut tx = create_test_tx(1, 1);
        tx.outputs[0].recipient = "r".repeat(256);

        let report = get_encoding_efficiency(&tx);
        assert!(report.json_size > 256);
        assert_eq!(report.binary_size, -1);
        assert_eq!(report.savings, "Not implemented");
    }
}
