use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::config::Settings;
use utxo_ledger::{Amount, OutPoint, Transaction, TxHash, TxInput, TxOutput, UtxoPool};

/// Shared application state: the pool carried from one epoch to the next and the epoch log.
///
/// Lock order is `utxo_pool` then `epochs`.
pub struct AppState {
    pub settings: Settings,
    pub utxo_pool: Mutex<UtxoPool>,
    pub epochs: Mutex<Vec<EpochRecord>>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            utxo_pool: Mutex::new(UtxoPool::new()),
            epochs: Mutex::new(Vec::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

/* ---------- TX API Models ---------- */

/// A transaction as submitted over the wire. The hash is always recomputed server side.
#[derive(Debug, Clone, Deserialize)]
pub struct TxRequest {
    #[serde(default)]
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
}

impl TxRequest {
    pub fn into_transaction(self) -> Transaction {
        Transaction::new(self.inputs, self.outputs)
    }
}

#[derive(Deserialize)]
pub struct EpochRequest {
    pub transactions: Vec<TxRequest>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RejectedTx {
    pub txid: TxHash,
    pub reason: String,
}

/// One processed epoch, as stored in the epoch log and returned to the submitter.
#[derive(Debug, Clone, Serialize)]
pub struct EpochRecord {
    pub epoch_id: String,
    pub height: u64,
    pub timestamp: i64, // Unix timestamp (UTC)
    pub accepted: Vec<TxHash>,
    pub rejected: Vec<RejectedTx>,
}

#[derive(Serialize)]
pub struct EpochsResponse<'a> {
    pub count: usize,
    pub epochs: &'a [EpochRecord],
}

/* ---------- Pool API Models ---------- */

#[derive(Serialize)]
pub struct UtxoEntry {
    pub outpoint: OutPoint,
    pub output: TxOutput,
}

#[derive(Serialize)]
pub struct UtxosResponse {
    pub size: usize,
    pub total_value: i128,
    pub utxos: Vec<UtxoEntry>,
}

#[derive(Serialize)]
pub struct BalanceResponse {
    pub address: String,
    pub balance: i128,
    pub utxos: usize,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub utxo_size: usize,
    pub total_value: i128,
    pub epochs: usize,
    pub accepted_txs: usize,
    pub rejected_txs: usize,
    pub max_epoch_txs: usize,
    pub faucet_enabled: bool,
}

/* ---------- Faucet API Models (dev) ---------- */

#[derive(Deserialize)]
pub struct FaucetRequest {
    pub address: String,
    pub amount: Amount,
}

#[derive(Serialize)]
pub struct FaucetResponse {
    pub txid: TxHash,
    pub outpoints: Vec<OutPoint>,
}

/* ---------- Wallet API Models (dev) ---------- */

#[derive(Serialize)]
pub struct NewWalletResponse {
    pub private_key: String,
    pub public_key: String,
    pub address: String,
}

/// Unsigned transaction plus one hex private key per input.
#[derive(Deserialize)]
pub struct SignRequest {
    pub private_keys: Vec<String>,
    #[serde(flatten)]
    pub tx: TxRequest,
}
