//! Post-quantum transaction authentication
//!
//! A wallet holds one Dilithium keypair (Mode3 unless configured otherwise),
//! a transaction has one canonical byte encoding, and the wallet signs and
//! verifies those bytes:
//! - provider: Dilithium signature capability behind the `SignatureProvider` trait
//! - wallet: keypair, SHAKE256 fingerprint, public identity, signed transactions
//! - tx: transfer transaction with canonical and length-prefixed encodings
//! - demo: keygen → encode → sign → verify → report cycle used by `pq_tx_demo`
//!
//! # Example
//! ```no_run
//! use pq_tx_auth::{Transaction, Wallet};
//!
//! let wallet = Wallet::create().unwrap();
//! let tx = Transaction::new("wallet1", "wallet2", 100, "test");
//! assert_eq!(tx.serialize(), b"wallet1:wallet2:100:74657374");
//!
//! let sig = wallet.sign(&tx.serialize()).unwrap();
//! assert!(wallet.verify(&tx.serialize(), &sig));
//! ```

pub mod demo;
pub mod error;
pub mod provider;
pub mod tx;
pub mod wallet;

// Re-export main types for convenience
pub use error::{Result, WalletError};
pub use provider::{Dilithium, SecurityLevel, Signature, SignatureProvider};
pub use tx::{Encoding, Transaction};
pub use wallet::{PublicIdentity, SignedTransaction, Wallet};
