//! Wallet key management - one Dilithium keypair per wallet

use tracing::debug;
use zeroize::Zeroizing;

use super::identity::{fingerprint, PublicIdentity};
use super::signed_tx::SignedTransaction;
use crate::error::{Result, WalletError};
use crate::provider::{Dilithium, Signature, SignatureProvider};
use crate::tx::{Encoding, Transaction};

/// Keypair bound to a signature provider.
///
/// Both halves are produced by a single `generate_keypair` call and are
/// never replaced. The private half is wiped when the wallet is dropped.
pub struct Wallet<P: SignatureProvider = Dilithium> {
    provider: P,
    public_key: Vec<u8>,
    private_key: Zeroizing<Vec<u8>>,
    algorithm_id: &'static str,
}

impl Wallet {
    /// New wallet with Dilithium Mode3 keys
    pub fn create() -> Result<Self> {
        Self::create_with(Dilithium::default())
    }
}

impl<P: SignatureProvider> Wallet<P> {
    pub fn create_with(provider: P) -> Result<Self> {
        let algorithm_id = provider.algorithm_id();
        let (public_key, private_key) = provider.generate_keypair()?;

        let sizes = [
            ("public", public_key.len(), provider.public_key_len()),
            ("private", private_key.len(), provider.secret_key_len()),
        ];
        for (half, got, expected) in sizes {
            if got != expected {
                return Err(WalletError::KeyGeneration {
                    algorithm: algorithm_id,
                    reason: format!("{half} key is {got} bytes, expected {expected}"),
                });
            }
        }

        let wallet = Self {
            provider,
            public_key,
            private_key,
            algorithm_id,
        };
        debug!(algorithm = algorithm_id, fingerprint = %hex::encode(wallet.fingerprint()), "wallet created");
        Ok(wallet)
    }

    pub fn algorithm_id(&self) -> &'static str {
        self.algorithm_id
    }

    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// Size of the private key; the bytes themselves never leave the wallet.
    pub fn private_key_len(&self) -> usize {
        self.private_key.len()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// SHAKE256 fingerprint of the public key
    pub fn fingerprint(&self) -> [u8; 32] {
        fingerprint(&self.public_key)
    }

    /// Shareable (algorithm, public key) pair for third-party verification
    pub fn identity(&self) -> PublicIdentity {
        PublicIdentity::new(self.algorithm_id, self.public_key.clone())
    }

    pub fn sign(&self, message: &[u8]) -> Result<Signature> {
        self.provider.sign(&self.private_key, message)
    }

    /// `false` covers forged, mismatched and malformed signatures alike.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        let ok = self.provider.verify(&self.public_key, message, signature);
        if !ok {
            debug!(algorithm = self.algorithm_id, msg_len = message.len(), "signature rejected");
        }
        ok
    }

    pub fn sign_transaction(&self, tx: &Transaction, encoding: Encoding) -> Result<SignedTransaction> {
        let signature = self.sign(&tx.encode(encoding))?;
        Ok(SignedTransaction {
            transaction: tx.clone(),
            encoding,
            signer: self.identity(),
            signature,
        })
    }
}

impl<P: SignatureProvider> std::fmt::Debug for Wallet<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("algorithm_id", &self.algorithm_id)
            .field("fingerprint", &hex::encode(self.fingerprint()))
            .field("public_key_len", &self.public_key.len())
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}
