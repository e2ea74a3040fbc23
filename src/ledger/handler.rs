use log::{debug, trace};
use std::collections::HashSet;

use super::error::TxRejection;
use super::verifier::SignatureVerifier;
use crate::transaction::{Transaction, TxHash, UtxoPool};
use crate::wallet::EcdsaVerifier;

/// What one epoch did with its batch.
#[derive(Debug, Clone, Default)]
pub struct EpochOutcome {
    /// Accepted transactions, in batch order.
    pub accepted: Vec<Transaction>,
    /// Dropped transactions with the first rule each one broke, in batch order.
    pub rejected: Vec<(TxHash, TxRejection)>,
}

/// Validates transactions against a pool it exclusively owns and applies accepted ones.
///
/// One handler lives for one epoch. Hand it the pool by value (clone first to keep a copy)
/// and take the post-epoch pool back with [`TxHandler::into_pool`].
pub struct TxHandler<V = EcdsaVerifier> {
    pool: UtxoPool,
    verifier: V,
}

impl TxHandler<EcdsaVerifier> {
    pub fn new(pool: UtxoPool) -> Self {
        Self::with_verifier(pool, EcdsaVerifier::new())
    }
}

impl<V: SignatureVerifier> TxHandler<V> {
    pub fn with_verifier(pool: UtxoPool, verifier: V) -> Self {
        Self { pool, verifier }
    }

    pub fn pool(&self) -> &UtxoPool {
        &self.pool
    }

    pub fn into_pool(self) -> UtxoPool {
        self.pool
    }

    pub fn is_valid_tx(&self, tx: &Transaction) -> bool {
        self.check_tx(tx).is_ok()
    }

    /// Check `tx` against the current pool, reporting the first broken rule.
    ///
    /// Rules run in order: referenced outputs exist, signatures verify, no output is
    /// claimed twice, no output amount is negative, inputs cover outputs.
    pub fn check_tx(&self, tx: &Transaction) -> Result<(), TxRejection> {
        let mut spent = Vec::with_capacity(tx.inputs().len());
        for (index, input) in tx.inputs().iter().enumerate() {
            let prev_out = self
                .pool
                .lookup(&input.outpoint)
                .ok_or(TxRejection::MissingOutput {
                    index,
                    outpoint: input.outpoint,
                })?;
            spent.push(prev_out);
        }

        for (index, (input, prev_out)) in tx.inputs().iter().zip(&spent).enumerate() {
            let verified = tx.signing_payload(index).is_some_and(|payload| {
                self.verifier
                    .verify(&prev_out.address, &payload, &input.signature)
            });
            if !verified {
                return Err(TxRejection::InvalidSignature { index });
            }
        }

        let mut seen = HashSet::with_capacity(tx.inputs().len());
        for (index, input) in tx.inputs().iter().enumerate() {
            if !seen.insert(input.outpoint) {
                return Err(TxRejection::DuplicateInput {
                    index,
                    outpoint: input.outpoint,
                });
            }
        }

        if let Some((index, output)) = tx.outputs().iter().enumerate().find(|(_, o)| o.amount < 0)
        {
            return Err(TxRejection::NegativeOutput {
                index,
                amount: output.amount,
            });
        }

        let inputs: i128 = spent.iter().map(|out| out.amount as i128).sum();
        let outputs = tx.total_output_amount();
        if inputs < outputs {
            return Err(TxRejection::InsufficientInputs { inputs, outputs });
        }

        Ok(())
    }

    /// Resolve a batch into its accepted subset and apply it to the pool.
    ///
    /// Transactions are taken strictly in the order given; each is validated against the pool
    /// as left by the ones before it. Rejected transactions are dropped.
    pub fn handle_txs(
        &mut self,
        possible_txs: impl IntoIterator<Item = Transaction>,
    ) -> Vec<Transaction> {
        self.handle_txs_with_report(possible_txs).accepted
    }

    /// Same as [`TxHandler::handle_txs`], also reporting why each dropped transaction failed.
    pub fn handle_txs_with_report(
        &mut self,
        possible_txs: impl IntoIterator<Item = Transaction>,
    ) -> EpochOutcome {
        let outcome = possible_txs
            .into_iter()
            .fold(EpochOutcome::default(), |mut outcome, tx| {
                match self.check_tx(&tx) {
                    Ok(()) => {
                        self.apply(&tx);
                        trace!("accepted tx {}", tx.hash());
                        outcome.accepted.push(tx);
                    }
                    Err(reason) => {
                        debug!("dropped tx {}: {}", tx.hash(), reason);
                        outcome.rejected.push((*tx.hash(), reason));
                    }
                }
                outcome
            });

        debug!(
            "epoch resolved: {} accepted, {} rejected, pool size {}",
            outcome.accepted.len(),
            outcome.rejected.len(),
            self.pool.len()
        );
        outcome
    }

    fn apply(&mut self, tx: &Transaction) {
        for input in tx.inputs() {
            self.pool.remove(&input.outpoint);
        }
        self.pool.add_tx_outputs(tx);
    }
}
