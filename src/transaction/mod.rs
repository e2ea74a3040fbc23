pub mod model;
pub mod utxo;

pub use model::{Address, Amount, Transaction, TxHash, TxInput, TxOutput};
pub use utxo::{OutPoint, UtxoPool};
