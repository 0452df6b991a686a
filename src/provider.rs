//! Signature provider capability (Dilithium / CRYSTALS lattice signatures)
//!
//! The lattice arithmetic lives in `pqcrypto-dilithium` (PQClean reference
//! implementation). This module only adapts it to the three operations the
//! wallet needs:
//! - **generate_keypair**: fresh keypair from the library's OS-seeded RNG
//! - **sign**: detached signature over arbitrary bytes
//! - **verify**: boolean outcome, never an error
//!
//! # Example
//! ```no_run
//! use pq_tx_auth::provider::{Dilithium, SignatureProvider};
//!
//! let provider = Dilithium::default(); // Mode3
//! let (pk, sk) = provider.generate_keypair().unwrap();
//! let sig = provider.sign(&sk, b"hello").unwrap();
//! assert!(provider.verify(&pk, b"hello", &sig));
//! ```

#![forbid(unsafe_code)]

use clap::ValueEnum;
use pqcrypto_traits::sign::{DetachedSignature as _, PublicKey as _, SecretKey as _};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use crate::error::{Result, WalletError};

/* ============================================================================
 * Capability
 * ========================================================================== */

/// Anything that can generate keys, sign and verify.
///
/// Implementations hold only immutable configuration, so one provider value
/// can back any number of wallets on any number of threads.
pub trait SignatureProvider {
    /// Scheme + parameter set tag, e.g. `"Dilithium-Mode3"`
    fn algorithm_id(&self) -> &'static str;

    fn public_key_len(&self) -> usize;
    fn secret_key_len(&self) -> usize;
    fn signature_len(&self) -> usize;

    /// Returns `(public_key, secret_key)`; the secret half is wiped on drop.
    fn generate_keypair(&self) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>)>;

    fn sign(&self, secret_key: &[u8], message: &[u8]) -> Result<Signature>;

    /// `true` iff `signature` was made over exactly `message` by the key
    /// matching `public_key`. Malformed inputs give `false`.
    fn verify(&self, public_key: &[u8], message: &[u8], signature: &Signature) -> bool;
}

/* ============================================================================
 * Signature
 * ========================================================================== */

/// Opaque detached signature bytes
#[derive(Clone, PartialEq, Eq)]
pub struct Signature(Vec<u8>);

impl Signature {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Signature(bytes.to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        hex::decode(s)
            .map(Signature)
            .map_err(|e| WalletError::Serialization(format!("signature hex: {e}")))
    }

    /// Hex of the first `n` bytes (or fewer, for short signatures)
    pub fn prefix_hex(&self, n: usize) -> String {
        hex::encode(&self.0[..n.min(self.0.len())])
    }
}

impl From<Vec<u8>> for Signature {
    fn from(bytes: Vec<u8>) -> Self {
        Signature(bytes)
    }
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Signature({}...; {} bytes)", self.prefix_hex(8), self.0.len())
    }
}

impl Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/* ============================================================================
 * Dilithium
 * ========================================================================== */

/// NIST security level of the Dilithium parameter set
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum SecurityLevel {
    /// NIST level 2
    Mode2,
    /// NIST level 3 (~AES-192)
    #[default]
    Mode3,
    /// NIST level 5
    Mode5,
}

impl SecurityLevel {
    pub const fn algorithm_id(self) -> &'static str {
        match self {
            SecurityLevel::Mode2 => "Dilithium-Mode2",
            SecurityLevel::Mode3 => "Dilithium-Mode3",
            SecurityLevel::Mode5 => "Dilithium-Mode5",
        }
    }
}

impl std::fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.algorithm_id())
    }
}

// Binds `$m` to the pqcrypto module of the selected parameter set.
macro_rules! with_params {
    ($level:expr, $m:ident => $body:expr) => {
        match $level {
            SecurityLevel::Mode2 => {
                use pqcrypto_dilithium::dilithium2 as $m;
                $body
            }
            SecurityLevel::Mode3 => {
                use pqcrypto_dilithium::dilithium3 as $m;
                $body
            }
            SecurityLevel::Mode5 => {
                use pqcrypto_dilithium::dilithium5 as $m;
                $body
            }
        }
    };
}

/// Dilithium signature provider for one fixed parameter set
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dilithium {
    level: SecurityLevel,
}

impl Dilithium {
    pub const fn new(level: SecurityLevel) -> Self {
        Self { level }
    }

    pub const fn level(&self) -> SecurityLevel {
        self.level
    }
}

impl SignatureProvider for Dilithium {
    fn algorithm_id(&self) -> &'static str {
        self.level.algorithm_id()
    }

    fn public_key_len(&self) -> usize {
        with_params!(self.level, m => m::public_key_bytes())
    }

    fn secret_key_len(&self) -> usize {
        with_params!(self.level, m => m::secret_key_bytes())
    }

    fn signature_len(&self) -> usize {
        with_params!(self.level, m => m::signature_bytes())
    }

    fn generate_keypair(&self) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>)> {
        let (pk, sk) = with_params!(self.level, m => {
            let (pk, sk) = m::keypair();
            (pk.as_bytes().to_vec(), Zeroizing::new(sk.as_bytes().to_vec()))
        });

        if pk.len() != self.public_key_len() || sk.len() != self.secret_key_len() {
            return Err(WalletError::KeyGeneration {
                algorithm: self.algorithm_id(),
                reason: format!(
                    "unexpected key sizes (pk={}, sk={})",
                    pk.len(),
                    sk.len()
                ),
            });
        }

        debug!(algorithm = self.algorithm_id(), pk_len = pk.len(), "generated keypair");
        Ok((pk, sk))
    }

    fn sign(&self, secret_key: &[u8], message: &[u8]) -> Result<Signature> {
        let algorithm = self.algorithm_id();
        let sig = with_params!(self.level, m => {
            let sk = m::SecretKey::from_bytes(secret_key).map_err(|e| WalletError::Signing {
                algorithm,
                reason: format!("invalid secret key: {e:?}"),
            })?;
            m::detached_sign(message, &sk).as_bytes().to_vec()
        });

        debug!(algorithm, msg_len = message.len(), sig_len = sig.len(), "signed message");
        Ok(Signature(sig))
    }

    fn verify(&self, public_key: &[u8], message: &[u8], signature: &Signature) -> bool {
        with_params!(self.level, m => {
            let Ok(pk) = m::PublicKey::from_bytes(public_key) else {
                return false;
            };
            let Ok(sig) = m::DetachedSignature::from_bytes(signature.as_bytes()) else {
                return false;
            };
            m::verify_detached_signature(&sig, message, &pk).is_ok()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pqcrypto_dilithium::dilithium3;

    #[test]
    fn test_default_is_mode3() {
        let provider = Dilithium::default();
        assert_eq!(provider.level(), SecurityLevel::Mode3);
        assert_eq!(provider.algorithm_id(), "Dilithium-Mode3");
        assert_eq!(provider.public_key_len(), dilithium3::public_key_bytes());
        assert_eq!(provider.secret_key_len(), dilithium3::secret_key_bytes());
        assert_eq!(provider.signature_len(), dilithium3::signature_bytes());
    }

    #[test]
    fn test_mode3_public_key_size() {
        assert_eq!(Dilithium::default().public_key_len(), 1952);
    }

    #[test]
    fn test_keypair_sizes_all_levels() {
        for level in [SecurityLevel::Mode2, SecurityLevel::Mode3, SecurityLevel::Mode5] {
            let provider = Dilithium::new(level);
            let (pk, sk) = provider.generate_keypair().unwrap();
            assert_eq!(pk.len(), provider.public_key_len(), "{level}");
            assert_eq!(sk.len(), provider.secret_key_len(), "{level}");
        }
    }

    #[test]
    fn test_sign_verify() {
        let provider = Dilithium::default();
        let (pk, sk) = provider.generate_keypair().unwrap();

        let sig = provider.sign(&sk, b"block payload").unwrap();
        assert_eq!(sig.len(), provider.signature_len());
        assert!(provider.verify(&pk, b"block payload", &sig));
        assert!(!provider.verify(&pk, b"block payloae", &sig));
    }

    #[test]
    fn test_malformed_inputs_verify_false() {
        let provider = Dilithium::default();
        let (pk, sk) = provider.generate_keypair().unwrap();
        let sig = provider.sign(&sk, b"msg").unwrap();

        // truncated signature
        let short = Signature::from_bytes(&sig.as_bytes()[..100]);
        assert!(!provider.verify(&pk, b"msg", &short));

        // empty signature
        assert!(!provider.verify(&pk, b"msg", &Signature::from_bytes(&[])));

        // truncated public key
        assert!(!provider.verify(&pk[..32], b"msg", &sig));

        // corrupted signature bytes
        let mut bytes = sig.as_bytes().to_vec();
        bytes[100] ^= 0xFF;
        assert!(!provider.verify(&pk, b"msg", &Signature::from(bytes)));
    }

    #[test]
    fn test_cross_level_signature_rejected() {
        let mode2 = Dilithium::new(SecurityLevel::Mode2);
        let mode3 = Dilithium::new(SecurityLevel::Mode3);
        let (pk3, _) = mode3.generate_keypair().unwrap();
        let (_, sk2) = mode2.generate_keypair().unwrap();

        let sig = mode2.sign(&sk2, b"msg").unwrap();
        assert!(!mode3.verify(&pk3, b"msg", &sig));
    }

    #[test]
    fn test_sign_with_bad_secret_key_is_signing_error() {
        let provider = Dilithium::default();
        let err = provider.sign(&[0u8; 16], b"msg").unwrap_err();
        assert!(matches!(err, WalletError::Signing { algorithm: "Dilithium-Mode3", .. }));
    }

    #[test]
    fn test_signature_hex_roundtrip_and_serde() {
        let sig = Signature::from_bytes(&[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(sig.to_hex(), "deadbeef");
        assert_eq!(sig.prefix_hex(2), "dead");
        assert_eq!(sig.prefix_hex(32), "deadbeef");
        assert_eq!(Signature::from_hex("deadbeef").unwrap(), sig);
        assert!(Signature::from_hex("xyz").is_err());

        let json = serde_json::to_string(&sig).unwrap();
        assert_eq!(json, "\"deadbeef\"");
        let back: Signature = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sig);
    }
}
