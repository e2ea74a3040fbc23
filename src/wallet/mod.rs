use rand::rngs::OsRng;
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey, VerifyOnly, ecdsa::Signature};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::ledger::SignatureVerifier;
use crate::transaction::{Address, Transaction, TxInput};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("invalid private key hex")]
    InvalidSecretHex,
    #[error("invalid private key bytes")]
    InvalidSecretKey,
    #[error("invalid pubkey hex")]
    InvalidPubkeyHex,
    #[error("invalid pubkey bytes")]
    InvalidPubkey,
    #[error("transaction has {expected} inputs but {got} signing keys were given")]
    SignerCount { expected: usize, got: usize },
}

/// SHA-256 of a signing payload; this is the 32-byte message ECDSA actually signs.
pub fn message_digest(message: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(message));
    out
}

/// A secp256k1 keypair. The address is the hex of the compressed public key (33 bytes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keypair {
    secret: SecretKey,
    public: PublicKey,
}

impl Keypair {
    pub fn generate() -> Self {
        let secp = Secp256k1::new();
        let (secret, public) = secp.generate_keypair(&mut OsRng);
        Self { secret, public }
    }

    pub fn from_secret_key(secret: SecretKey) -> Self {
        let secp = Secp256k1::signing_only();
        let public = PublicKey::from_secret_key(&secp, &secret);
        Self { secret, public }
    }

    pub fn from_secret_hex(secret_hex: &str) -> Result<Self, WalletError> {
        let bytes = hex::decode(secret_hex.trim()).map_err(|_| WalletError::InvalidSecretHex)?;
        let secret = SecretKey::from_slice(&bytes).map_err(|_| WalletError::InvalidSecretKey)?;
        Ok(Self::from_secret_key(secret))
    }

    pub fn address(&self) -> Address {
        Address::new(self.public_hex())
    }

    pub fn secret_hex(&self) -> String {
        hex::encode(self.secret.secret_bytes())
    }

    pub fn public_hex(&self) -> String {
        hex::encode(self.public.serialize())
    }

    /// DER-encoded ECDSA signature over SHA-256(`message`).
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        let secp = Secp256k1::signing_only();
        let msg = Message::from_digest(message_digest(message));
        secp.sign_ecdsa(&msg, &self.secret).serialize_der().to_vec()
    }
}

/// Derive the address (hex of compressed pubkey) from a hex pubkey, compressed or not.
/// Returns normalized lowercase hex if valid.
pub fn pubkey_to_address(pubkey_hex: &str) -> Result<Address, WalletError> {
    let pk = parse_public_key(pubkey_hex)?;
    Ok(Address::new(hex::encode(pk.serialize())))
}

fn parse_public_key(pubkey_hex: &str) -> Result<PublicKey, WalletError> {
    let bytes = hex::decode(pubkey_hex).map_err(|_| WalletError::InvalidPubkeyHex)?;
    PublicKey::from_slice(&bytes).map_err(|_| WalletError::InvalidPubkey)
}

/// Sign every input of `tx`, `signers[i]` signing input `i`.
///
/// Existing signatures are replaced, so the returned transaction has a new hash.
pub fn sign_transaction(
    tx: &Transaction,
    signers: &[&Keypair],
) -> Result<Transaction, WalletError> {
    if signers.len() != tx.inputs().len() {
        return Err(WalletError::SignerCount {
            expected: tx.inputs().len(),
            got: signers.len(),
        });
    }

    let inputs = tx
        .inputs()
        .iter()
        .zip(signers)
        .enumerate()
        .filter_map(|(i, (input, signer))| {
            let payload = tx.signing_payload(i)?;
            Some(TxInput::new(input.outpoint, signer.sign(&payload)))
        })
        .collect();

    Ok(Transaction::new(inputs, tx.outputs().to_vec()))
}

/// Verifies DER ECDSA signatures against addresses produced by [`Keypair::address`].
pub struct EcdsaVerifier {
    secp: Secp256k1<VerifyOnly>,
}

impl EcdsaVerifier {
    pub fn new() -> Self {
        Self {
            secp: Secp256k1::verification_only(),
        }
    }
}

impl Default for EcdsaVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SignatureVerifier for EcdsaVerifier {
    fn verify(&self, address: &Address, message: &[u8], signature: &[u8]) -> bool {
        let Ok(pk) = parse_public_key(address.as_str()) else {
            return false;
        };
        let Ok(sig) = Signature::from_der(signature) else {
            return false;
        };
        let msg = Message::from_digest(message_digest(message));
        self.secp.verify_ecdsa(&msg, &sig, &pk).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::{OutPoint, TxHash, TxOutput};

    fn keypair(byte: u8) -> Keypair {
        Keypair::from_secret_key(SecretKey::from_slice(&[byte; 32]).unwrap())
    }

    #[test]
    fn sign_and_verify() {
        let kp = keypair(1);
        let sig = kp.sign(b"payload");
        let verifier = EcdsaVerifier::new();
        assert!(verifier.verify(&kp.address(), b"payload", &sig));
        assert!(!verifier.verify(&kp.address(), b"other payload", &sig));
        assert!(!verifier.verify(&keypair(2).address(), b"payload", &sig));
    }

    #[test]
    fn malformed_inputs_do_not_verify() {
        let kp = keypair(1);
        let verifier = EcdsaVerifier::new();
        assert!(!verifier.verify(&kp.address(), b"payload", &[]));
        assert!(!verifier.verify(&kp.address(), b"payload", &[0x30, 0x01]));
        let sig = kp.sign(b"payload");
        assert!(!verifier.verify(&Address::from("not-hex"), b"payload", &sig));
        assert!(!verifier.verify(&Address::from("02abcd"), b"payload", &sig));
    }

    #[test]
    fn secret_hex_round_trips_to_same_address() {
        let kp = Keypair::generate();
        let restored = Keypair::from_secret_hex(&kp.secret_hex()).unwrap();
        assert_eq!(kp.address(), restored.address());
        assert_eq!(kp.address().as_str().len(), 66);
        assert_eq!(
            Keypair::from_secret_hex("zz").unwrap_err(),
            WalletError::InvalidSecretHex
        );
    }

    #[test]
    fn pubkey_to_address_normalizes() {
        let kp = keypair(3);
        let upper = kp.public_hex().to_uppercase();
        assert_eq!(pubkey_to_address(&upper).unwrap(), kp.address());
        assert_eq!(
            pubkey_to_address("00ff").unwrap_err(),
            WalletError::InvalidPubkey
        );
    }

    #[test]
    fn sign_transaction_signs_each_input() {
        let (alice, bob) = (keypair(1), keypair(2));
        let tx = Transaction::new(
            vec![
                TxInput::unsigned(OutPoint::new(TxHash::from_bytes([9; 32]), 0)),
                TxInput::unsigned(OutPoint::new(TxHash::from_bytes([9; 32]), 1)),
            ],
            vec![TxOutput::new(alice.address(), 3)],
        );
        let signed = sign_transaction(&tx, &[&alice, &bob]).unwrap();
        assert_ne!(signed.hash(), tx.hash());

        let verifier = EcdsaVerifier::new();
        let payload0 = signed.signing_payload(0).unwrap();
        let payload1 = signed.signing_payload(1).unwrap();
        assert!(verifier.verify(&alice.address(), &payload0, &signed.inputs()[0].signature));
        assert!(verifier.verify(&bob.address(), &payload1, &signed.inputs()[1].signature));

        assert_eq!(
            sign_transaction(&tx, &[&alice]).unwrap_err(),
            WalletError::SignerCount {
                expected: 2,
                got: 1
            }
        );
    }
}
