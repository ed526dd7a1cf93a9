mod transaction;
mod user;

pub use transaction::{Transaction, TxKind};
pub use user::{Profile, User};
