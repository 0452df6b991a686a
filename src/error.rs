//! Error types for wallet and transaction operations
//!
//! A failed verification is NOT an error: `verify` returns `false`.
//! Everything here is a provider or input failure that the caller has to
//! decide about.

#![forbid(unsafe_code)]

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Key generation failed ({algorithm}): {reason}")]
    KeyGeneration { algorithm: &'static str, reason: String },

    #[error("Signing failed ({algorithm}): {reason}")]
    Signing { algorithm: &'static str, reason: String },

    #[error("Invalid key material: expected {expected} bytes, got {got}")]
    InvalidKey { expected: usize, got: usize },

    #[error("Identifier {0:?} contains ':' and cannot be encoded unambiguously")]
    AmbiguousIdentifier(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for WalletError {
    fn from(e: serde_json::Error) -> Self {
        WalletError::Serialization(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WalletError>;
