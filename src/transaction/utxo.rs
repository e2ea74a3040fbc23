use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

use super::model::{Address, Transaction, TxHash, TxOutput};

/// Identifies a specific transaction output by its txid and index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OutPoint {
    pub txid: TxHash,
    pub vout: u32,
}

impl OutPoint {
    pub fn new(txid: TxHash, vout: u32) -> Self {
        Self { txid, vout }
    }
}

impl Display for OutPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.txid, self.vout)
    }
}

/// The set of spendable outputs, keyed by (txid, vout).
///
/// A plain container: it never validates what goes in. Cloning yields an independent deep
/// copy, which is how callers keep their own view while a handler mutates another.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UtxoPool {
    map: HashMap<OutPoint, TxOutput>,
}

impl UtxoPool {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Insert a single output, replacing any output already stored under `outpoint`.
    pub fn add(&mut self, outpoint: OutPoint, output: TxOutput) {
        self.map.insert(outpoint, output);
    }

    /// Spend (remove) a single outpoint. Returns the removed output if it existed.
    pub fn remove(&mut self, outpoint: &OutPoint) -> Option<TxOutput> {
        self.map.remove(outpoint)
    }

    pub fn lookup(&self, outpoint: &OutPoint) -> Option<&TxOutput> {
        self.map.get(outpoint)
    }

    pub fn contains(&self, outpoint: &OutPoint) -> bool {
        self.map.contains_key(outpoint)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Read-only iterator over all entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&OutPoint, &TxOutput)> {
        self.map.iter()
    }

    /// Owned snapshot of every entry, sorted by outpoint.
    pub fn all_outputs(&self) -> Vec<(OutPoint, TxOutput)> {
        let mut entries: Vec<_> = self.iter().map(|(op, out)| (*op, out.clone())).collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Add every output of `tx` under `(tx.hash, index)`.
    pub fn add_tx_outputs(&mut self, tx: &Transaction) {
        for (i, out) in tx.outputs().iter().enumerate() {
            self.add(tx.outpoint(i as u32), out.clone());
        }
    }

    /// Sum and count of the outputs owned by `address`.
    pub fn balance_of(&self, address: &Address) -> (i128, usize) {
        self.iter()
            .map(|(_, out)| out)
            .filter(|out| &out.address == address)
            .fold((0, 0), |(sum, count), out| {
                (sum + out.amount as i128, count + 1)
            })
    }

    pub fn total_value(&self) -> i128 {
        self.iter().map(|(_, out)| out.amount as i128).sum()
    }
}
