use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::{self, Debug, Display, Formatter};

use super::utxo::OutPoint;

/// Value carried by an output, in indivisible base units.
///
/// Signed on purpose: a negative amount is a well-formed value that validation rejects.
pub type Amount = i64;

/// SHA-256 over the canonical bytes of a transaction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TxHash(#[serde(with = "hex::serde")] [u8; 32]);

impl TxHash {
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl Display for TxHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Debug for TxHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash({})", self.to_hex())
    }
}

/// Owner of an output: hex of a compressed secp256k1 public key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Address {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInput {
    /// References a previous unspent output (UTXO)
    pub outpoint: OutPoint,
    /// DER-encoded ECDSA signature over `Transaction::signing_payload` for this input.
    #[serde(with = "hex::serde", default)]
    pub signature: Vec<u8>,
}

impl TxInput {
    pub fn new(outpoint: OutPoint, signature: Vec<u8>) -> Self {
        Self {
            outpoint,
            signature,
        }
    }

    /// An input awaiting its signature.
    pub fn unsigned(outpoint: OutPoint) -> Self {
        Self::new(outpoint, Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    pub address: Address,
    pub amount: Amount,
}

impl TxOutput {
    pub fn new(address: impl Into<Address>, amount: Amount) -> Self {
        Self {
            address: address.into(),
            amount,
        }
    }
}

/// A transaction as submitted to the ledger.
///
/// The content hash is computed once at construction; fields are only reachable through
/// accessors so the hash cannot drift from the data it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    #[serde(rename = "txid")]
    hash: TxHash,
    inputs: Vec<TxInput>,
    outputs: Vec<TxOutput>,
}

impl Transaction {
    /// Build a transaction and compute its hash deterministically from its content.
    /// The hash covers signatures; the signing payload does not.
    pub fn new(inputs: Vec<TxInput>, outputs: Vec<TxOutput>) -> Self {
        let mut preimage = Vec::new();
        encode_len(&mut preimage, inputs.len());
        for input in &inputs {
            encode_outpoint(&mut preimage, &input.outpoint);
            encode_len(&mut preimage, input.signature.len());
            preimage.extend_from_slice(&input.signature);
        }
        encode_outputs(&mut preimage, &outputs);

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&Sha256::digest(&preimage));

        Self {
            hash: TxHash::from_bytes(hash),
            inputs,
            outputs,
        }
    }

    pub fn hash(&self) -> &TxHash {
        &self.hash
    }

    pub fn inputs(&self) -> &[TxInput] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[TxOutput] {
        &self.outputs
    }

    /// OutPoint under which output `index` of this transaction is stored once accepted.
    pub fn outpoint(&self, index: u32) -> OutPoint {
        OutPoint::new(self.hash, index)
    }

    pub fn total_output_amount(&self) -> i128 {
        self.outputs.iter().map(|o| o.amount as i128).sum()
    }

    /// Bytes the owner of the output spent by input `input_index` signs.
    ///
    /// Covers the index, every input's outpoint and every output, never any signature.
    /// Returns `None` when the transaction has no such input.
    pub fn signing_payload(&self, input_index: usize) -> Option<Vec<u8>> {
        if input_index >= self.inputs.len() {
            return None;
        }
        let mut payload = Vec::new();
        encode_len(&mut payload, input_index);
        encode_len(&mut payload, self.inputs.len());
        for input in &self.inputs {
            encode_outpoint(&mut payload, &input.outpoint);
        }
        encode_outputs(&mut payload, &self.outputs);
        Some(payload)
    }
}

fn encode_len(buf: &mut Vec<u8>, len: usize) {
    buf.extend_from_slice(&(len as u64).to_le_bytes());
}

fn encode_outpoint(buf: &mut Vec<u8>, outpoint: &OutPoint) {
    buf.extend_from_slice(outpoint.txid.as_bytes());
    buf.extend_from_slice(&outpoint.vout.to_le_bytes());
}

fn encode_outputs(buf: &mut Vec<u8>, outputs: &[TxOutput]) {
    encode_len(buf, outputs.len());
    for output in outputs {
        buf.extend_from_slice(&output.amount.to_le_bytes());
        encode_len(buf, output.address.as_str().len());
        buf.extend_from_slice(output.address.as_str().as_bytes());
    }
}
