use thiserror::Error;

use crate::transaction::OutPoint;

/// The first validity rule a transaction broke.
///
/// Rejection is a normal outcome of batch resolution, not a fault; this type only exists so
/// callers can report why a transaction was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxRejection {
    #[error("input {index} references {outpoint}, which is not in the pool")]
    MissingOutput { index: usize, outpoint: OutPoint },

    #[error("signature on input {index} does not verify against the owner of the spent output")]
    InvalidSignature { index: usize },

    #[error("input {index} spends {outpoint}, already claimed by an earlier input")]
    DuplicateInput { index: usize, outpoint: OutPoint },

    #[error("output {index} has negative amount {amount}")]
    NegativeOutput { index: usize, amount: i64 },

    #[error("inputs total {inputs} is less than outputs total {outputs}")]
    InsufficientInputs { inputs: i128, outputs: i128 },
}
