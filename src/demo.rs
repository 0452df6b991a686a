//! Demo orchestrator: keygen → encode → sign → verify → report
//!
//! Errors are returned to the caller; only the binary decides whether a
//! failure terminates the process.

#![forbid(unsafe_code)]

use serde::Serialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::provider::{Dilithium, SecurityLevel, Signature, SignatureProvider};
use crate::tx::{Encoding, Transaction};
use crate::wallet::Wallet;

/// Bytes of signature shown in the report
pub const SIGNATURE_PREVIEW_BYTES: usize = 32;

/* ============================================================================
 * Configuration
 * ========================================================================== */

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    pub from: String,
    pub to: String,
    pub amount: u64,
    pub memo: String,
    pub level: SecurityLevel,
    pub encoding: Encoding,
    /// Refuse addresses containing ':' before signing
    pub reject_ambiguous: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            from: "quantum_wallet_1".into(),
            to: "quantum_wallet_2".into(),
            amount: 1000,
            memo: "quantum-secured transfer".into(),
            level: SecurityLevel::Mode3,
            encoding: Encoding::Canonical,
            reject_ambiguous: false,
        }
    }
}

impl DemoConfig {
    pub fn transaction(&self) -> Transaction {
        Transaction::new(
            self.from.clone(),
            self.to.clone(),
            self.amount,
            self.memo.as_bytes(),
        )
    }
}

/* ============================================================================
 * Report
 * ========================================================================== */

/// Outcome of re-verifying the original signature over a mutated transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TamperCheck {
    pub field: &'static str,
    pub rejected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    pub algorithm_id: &'static str,
    pub public_key_len: usize,
    pub private_key_len: usize,
    pub fingerprint: String,
    pub transaction: Transaction,
    pub encoding: Encoding,
    pub encoded_len: usize,
    pub signature_len: usize,
    pub signature_preview: String,
    pub verified: bool,
    pub tamper_checks: Vec<TamperCheck>,
}

impl DemoReport {
    pub fn all_tampering_rejected(&self) -> bool {
        self.tamper_checks.iter().all(|c| c.rejected)
    }

    /// Signature verified and every mutation was rejected
    pub fn passed(&self) -> bool {
        self.verified && self.all_tampering_rejected()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl std::fmt::Display for DemoReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "🚀 Post-Quantum Cryptography POC")?;
        writeln!(f, "{}", "=".repeat(60))?;

        writeln!(f, "✅ Generated quantum-resistant keypair using {}", self.algorithm_id)?;
        writeln!(f, "   Public Key Size: {} bytes", self.public_key_len)?;
        writeln!(f, "   Private Key Size: {} bytes", self.private_key_len)?;
        writeln!(f, "   Fingerprint: {}", self.fingerprint)?;
        writeln!(f)?;

        writeln!(f, "📝 Creating quantum-resistant transaction:")?;
        writeln!(f, "   From: {}", self.transaction.from)?;
        writeln!(f, "   To: {}", self.transaction.to)?;
        writeln!(f, "   Amount: {} QNTM", self.transaction.amount)?;
        writeln!(f, "   Data: {}", self.transaction.memo())?;
        writeln!(f)?;

        writeln!(f, "🔐 Transaction signed with quantum-resistant signature")?;
        writeln!(f, "   Encoding: {} ({} bytes)", self.encoding, self.encoded_len)?;
        writeln!(f, "   Signature Size: {} bytes", self.signature_len)?;
        writeln!(
            f,
            "   Signature (first {} bytes): {}...",
            SIGNATURE_PREVIEW_BYTES, self.signature_preview
        )?;
        writeln!(f)?;

        if self.verified {
            writeln!(f, "✅ Signature verification PASSED")?;
            writeln!(f, "   Transaction is quantum-secure and valid!")?;
        } else {
            writeln!(f, "❌ Signature verification FAILED")?;
        }

        writeln!(f, "🧪 Tamper checks (original signature vs. modified field):")?;
        for check in &self.tamper_checks {
            let mark = if check.rejected { "rejected ✅" } else { "ACCEPTED ❌" };
            writeln!(f, "   {:<7} {}", check.field, mark)?;
        }
        writeln!(f)?;

        writeln!(f, "🛡️  This demonstrates PQC:")?;
        writeln!(f, "   - Lattice-based cryptography (Dilithium)")?;
        write!(f, "   - Future-proof transaction security")
    }
}

/* ============================================================================
 * Orchestration
 * ========================================================================== */

/// Run one cycle with the Dilithium parameter set from `config`
pub fn run(config: &DemoConfig) -> Result<DemoReport> {
    run_with(Dilithium::new(config.level), config)
}

/// Run one cycle with any provider (`config.level` is ignored)
pub fn run_with<P: SignatureProvider>(provider: P, config: &DemoConfig) -> Result<DemoReport> {
    let wallet = Wallet::create_with(provider)?;
    info!(
        algorithm = wallet.algorithm_id(),
        pk_len = wallet.public_key().len(),
        "keypair generated"
    );

    let tx = config.transaction();
    if config.reject_ambiguous {
        tx.check_unambiguous()?;
    }

    let message = tx.encode(config.encoding);
    let signature = wallet.sign(&message)?;
    info!(encoding = %config.encoding, msg_len = message.len(), sig_len = signature.len(), "transaction signed");

    let verified = wallet.verify(&message, &signature);
    if verified {
        info!("signature verified");
    } else {
        warn!(algorithm = wallet.algorithm_id(), "signature verification failed");
    }

    let tamper_checks = tamper_checks(&wallet, &tx, config.encoding, &signature);

    Ok(DemoReport {
        algorithm_id: wallet.algorithm_id(),
        public_key_len: wallet.public_key().len(),
        private_key_len: wallet.private_key_len(),
        fingerprint: hex::encode(wallet.fingerprint()),
        transaction: tx,
        encoding: config.encoding,
        encoded_len: message.len(),
        signature_len: signature.len(),
        signature_preview: signature.prefix_hex(SIGNATURE_PREVIEW_BYTES),
        verified,
        tamper_checks,
    })
}

/// One copy of `tx` per field, with only that field changed
pub fn mutations(tx: &Transaction) -> Vec<(&'static str, Transaction)> {
    let mut from = tx.clone();
    from.from.push('_');

    let mut to = tx.clone();
    to.to.push('_');

    let mut amount = tx.clone();
    amount.amount = amount.amount.wrapping_add(1);

    let mut data = tx.clone();
    match data.data.first_mut() {
        Some(b) => *b ^= 0x01,
        None => data.data.push(0x00),
    }

    vec![("from", from), ("to", to), ("amount", amount), ("data", data)]
}

fn tamper_checks<P: SignatureProvider>(
    wallet: &Wallet<P>,
    tx: &Transaction,
    encoding: Encoding,
    signature: &Signature,
) -> Vec<TamperCheck> {
    mutations(tx)
        .into_iter()
        .map(|(field, mutated)| {
            let rejected = !wallet.verify(&mutated.encode(encoding), signature);
            if !rejected {
                warn!(field, "mutated transaction accepted by original signature");
            }
            TamperCheck { field, rejected }
        })
        .collect()
}
