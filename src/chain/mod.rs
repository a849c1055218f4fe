pub mod block;
pub mod ledger;
pub mod proof;

pub use block::Block;
pub use ledger::{Ledger, TxReceipt};
pub use proof::ProofOfWork;
