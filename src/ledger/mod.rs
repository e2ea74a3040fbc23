pub mod error;
pub mod handler;
pub mod verifier;

pub use error::TxRejection;
pub use handler::{EpochOutcome, TxHandler};
pub use verifier::SignatureVerifier;
