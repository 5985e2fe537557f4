use ethers::types::{Address, Signature};
use std::str::FromStr;
use tracing::debug;

/// Pure predicate deciding whether `signature` over `payload` was produced by
/// the holder of `public_key`
pub trait SignatureVerifier {
    fn verify(&self, payload: &[u8], signature: &str, public_key: &str) -> bool;
}

impl<F> SignatureVerifier for F
where
    F: Fn(&[u8], &str, &str) -> bool,
{
    fn verify(&self, payload: &[u8], signature: &str, public_key: &str) -> bool {
        self(payload, signature, public_key)
    }
}

/// Recoverable secp256k1 signatures over EIP-191 personal messages
///
/// Public keys are hex addresses (`0x` optional) and signatures are 65-byte
/// hex strings. Anything that fails to parse simply does not verify.
#[derive(Debug, Clone, Copy, Default)]
pub struct EthSignatureVerifier;

impl SignatureVerifier for EthSignatureVerifier {
    fn verify(&self, payload: &[u8], signature: &str, public_key: &str) -> bool {
        let Ok(address) = Address::from_str(public_key) else {
            debug!("Unparseable verification key {:?}", public_key);
            return false;
        };
        let Ok(signature) = Signature::from_str(signature) else {
            debug!("Unparseable signature for {:?}", address);
            return false;
        };

        // Recover the signer and compare it with the expected address
        signature.verify(payload, address).is_ok()
    }
}
