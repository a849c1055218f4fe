pub mod transaction;

pub use transaction::{Amount, Transaction};
