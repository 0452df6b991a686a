//! Post-quantum wallet: keypair, public identity, signed transactions

pub mod identity;
pub mod keys;
pub mod signed_tx;

pub use identity::{fingerprint, PublicIdentity};
pub use keys::Wallet;
pub use signed_tx::SignedTransaction;
