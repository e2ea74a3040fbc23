//! Single-epoch transaction validation over a pool of unspent transaction outputs.
//!
//! [`ledger::TxHandler`] owns a [`transaction::UtxoPool`] for one epoch, checks each proposed
//! transaction against it and applies the ones it accepts. [`wallet`] provides the secp256k1
//! keys, signing helpers and the default signature verifier.

pub mod ledger;
pub mod transaction;
pub mod wallet;

pub use ledger::{EpochOutcome, SignatureVerifier, TxHandler, TxRejection};
pub use transaction::{Address, Amount, OutPoint, Transaction, TxHash, TxInput, TxOutput, UtxoPool};
pub use wallet::{EcdsaVerifier, Keypair};
