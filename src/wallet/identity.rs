//! Public side of a wallet: fingerprint and third-party verification

use serde::{Deserialize, Serialize};
use tiny_keccak::{Hasher, Shake};

use crate::error::{Result, WalletError};
use crate::provider::{Dilithium, SecurityLevel, Signature, SignatureProvider};

/// Domain tag for public key fingerprints
pub const FINGERPRINT_DOMAIN: &[u8] = b"PQ_WALLET_FP.v1";

/// SHAKE256(domain || public_key), 32 bytes
pub fn fingerprint(public_key: &[u8]) -> [u8; 32] {
    let mut sh = Shake::v256();
    sh.update(FINGERPRINT_DOMAIN);
    sh.update(public_key);
    let mut out = [0u8; 32];
    sh.finalize(&mut out);
    out
}

/// Algorithm tag + public key, enough to check signatures without the wallet
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicIdentity {
    pub algorithm_id: String,
    #[serde(with = "hex")]
    pub public_key: Vec<u8>,
}

impl PublicIdentity {
    pub fn new(algorithm_id: impl Into<String>, public_key: Vec<u8>) -> Self {
        Self {
            algorithm_id: algorithm_id.into(),
            public_key,
        }
    }

    /// Parse a hex public key for a Dilithium parameter set, checking its length.
    pub fn from_hex(level: SecurityLevel, pk_hex: &str) -> Result<Self> {
        let public_key = hex::decode(pk_hex)
            .map_err(|e| WalletError::Serialization(format!("public key hex: {e}")))?;
        let expected = Dilithium::new(level).public_key_len();
        if public_key.len() != expected {
            return Err(WalletError::InvalidKey {
                expected,
                got: public_key.len(),
            });
        }
        Ok(Self::new(level.algorithm_id(), public_key))
    }

    pub fn fingerprint(&self) -> [u8; 32] {
        fingerprint(&self.public_key)
    }

    /// Verify with an explicit provider. A provider for a different
    /// algorithm never accepts.
    pub fn verify_with<P: SignatureProvider>(
        &self,
        provider: &P,
        message: &[u8],
        signature: &Signature,
    ) -> bool {
        provider.algorithm_id() == self.algorithm_id
            && provider.verify(&self.public_key, message, signature)
    }

    /// Verify with the Dilithium parameter set named by `algorithm_id`.
    /// Unknown algorithms never verify.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        match level_for(&self.algorithm_id) {
            Some(level) => self.verify_with(&Dilithium::new(level), message, signature),
            None => false,
        }
    }
}

fn level_for(algorithm_id: &str) -> Option<SecurityLevel> {
    [SecurityLevel::Mode2, SecurityLevel::Mode3, SecurityLevel::Mode5]
        .into_iter()
        .find(|l| l.algorithm_id() == algorithm_id)
}

impl std::fmt::Debug for PublicIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PublicIdentity({}, {}...)",
            self.algorithm_id,
            &hex::encode(self.fingerprint())[..16]
        )
    }
}
