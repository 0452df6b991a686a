//! Transaction bundled with its signer and signature

use serde::{Deserialize, Serialize};

use super::identity::PublicIdentity;
use crate::error::Result;
use crate::provider::Signature;
use crate::tx::{Encoding, Transaction};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub transaction: Transaction,
    /// Encoding the signature was computed over
    pub encoding: Encoding,
    pub signer: PublicIdentity,
    pub signature: Signature,
}

impl SignedTransaction {
    /// Re-encode the transaction and check the signature against the signer.
    pub fn verify(&self) -> bool {
        self.signer
            .verify(&self.transaction.encode(self.encoding), &self.signature)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
