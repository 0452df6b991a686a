#![forbid(unsafe_code)]

//! Transfer transaction and its signing encodings

use serde::{Deserialize, Serialize};

use crate::error::{Result, WalletError};

/// Separator of the canonical text encoding
pub const FIELD_SEPARATOR: char = ':';

/// Byte encoding fed to the signer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
    /// `from:to:amount:hex(data)`. Not injective if an address contains ':'.
    #[default]
    Canonical,
    /// Big-endian u64 length prefixes; injective for all field values.
    LengthPrefixed,
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Encoding::Canonical => f.write_str("canonical"),
            Encoding::LengthPrefixed => f.write_str("length-prefixed"),
        }
    }
}

/// Value transfer between two opaque addresses
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    pub from: String,
    pub to: String,
    pub amount: u64,
    /// Memo / attachment
    #[serde(with = "hex")]
    pub data: Vec<u8>,
}

impl Transaction {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        amount: u64,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
            data: data.into(),
        }
    }

    /// Canonical encoding: `from:to:amount:hex(data)`
    ///
    /// Amount in decimal, data as lowercase hex, nothing trailing.
    pub fn serialize(&self) -> Vec<u8> {
        format!(
            "{}{sep}{}{sep}{}{sep}{}",
            self.from,
            self.to,
            self.amount,
            hex::encode(&self.data),
            sep = FIELD_SEPARATOR
        )
        .into_bytes()
    }

    /// Length-prefixed encoding:
    /// `len(from) || from || len(to) || to || amount || len(data) || data`,
    /// every integer a big-endian u64.
    pub fn serialize_length_prefixed(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(32 + self.from.len() + self.to.len() + self.data.len());
        put_field(&mut out, self.from.as_bytes());
        put_field(&mut out, self.to.as_bytes());
        out.extend_from_slice(&self.amount.to_be_bytes());
        put_field(&mut out, &self.data);
        out
    }

    pub fn encode(&self, encoding: Encoding) -> Vec<u8> {
        match encoding {
            Encoding::Canonical => self.serialize(),
            Encoding::LengthPrefixed => self.serialize_length_prefixed(),
        }
    }

    /// Err if the canonical encoding of this transaction could collide
    /// with another one (an address contains the separator).
    pub fn check_unambiguous(&self) -> Result<()> {
        for addr in [&self.from, &self.to] {
            if addr.contains(FIELD_SEPARATOR) {
                return Err(WalletError::AmbiguousIdentifier(addr.clone()));
            }
        }
        Ok(())
    }

    /// Memo rendered for display (lossy UTF-8)
    pub fn memo(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
}

fn put_field(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(&(bytes.len() as u64).to_be_bytes());
    out.extend_from_slice(bytes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_canonical_literal() {
        let tx = Transaction::new("wallet1", "wallet2", 100, "test");
        assert_eq!(tx.serialize(), b"wallet1:wallet2:100:74657374".to_vec());
    }

    #[test]
    fn test_canonical_empty_fields() {
        let tx = Transaction::new("", "", 0, Vec::new());
        assert_eq!(tx.serialize(), b"::0:".to_vec());
    }

    #[test]
    fn test_canonical_hex_is_lowercase() {
        let tx = Transaction::new("a", "b", u64::MAX, vec![0xAB, 0xCD, 0x0F]);
        assert_eq!(
            String::from_utf8(tx.serialize()).unwrap(),
            format!("a:b:{}:abcd0f", u64::MAX)
        );
    }

    #[test]
    fn test_encode_dispatch() {
        let tx = Transaction::new("wallet1", "wallet2", 100, "test");
        assert_eq!(tx.encode(Encoding::Canonical), tx.serialize());
        assert_eq!(tx.encode(Encoding::LengthPrefixed), tx.serialize_length_prefixed());
    }

    #[test]
    fn test_length_prefixed_layout() {
        let tx = Transaction::new("ab", "c", 5, vec![0xFF]);
        let mut expected = Vec::new();
        expected.extend_from_slice(&2u64.to_be_bytes());
        expected.extend_from_slice(b"ab");
        expected.extend_from_slice(&1u64.to_be_bytes());
        expected.extend_from_slice(b"c");
        expected.extend_from_slice(&5u64.to_be_bytes());
        expected.extend_from_slice(&1u64.to_be_bytes());
        expected.push(0xFF);
        assert_eq!(tx.serialize_length_prefixed(), expected);
    }

    #[test]
    fn test_separator_collision() {
        // Different transactions, same canonical bytes
        let a = Transaction::new("x:y", "z", 1, Vec::new());
        let b = Transaction::new("x", "y:z", 1, Vec::new());
        assert_ne!(a, b);
        assert_eq!(a.serialize(), b.serialize());
        assert_ne!(a.serialize_length_prefixed(), b.serialize_length_prefixed());

        assert!(matches!(
            a.check_unambiguous(),
            Err(WalletError::AmbiguousIdentifier(ref s)) if s == "x:y"
        ));
        assert!(matches!(
            b.check_unambiguous(),
            Err(WalletError::AmbiguousIdentifier(ref s)) if s == "y:z"
        ));
        assert!(Transaction::new("x", "z", 1, Vec::new()).check_unambiguous().is_ok());
    }

    #[test]
    fn test_json_data_as_hex() {
        let tx = Transaction::new("wallet1", "wallet2", 100, "test");
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["data"], "74657374");
        let back: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(back, tx);
    }

    #[quickcheck]
    fn prop_serialize_deterministic(from: String, to: String, amount: u64, data: Vec<u8>) -> bool {
        let tx = Transaction::new(from, to, amount, data);
        let copy = tx.clone();
        tx.serialize() == tx.serialize()
            && tx.serialize() == copy.serialize()
            && tx.serialize_length_prefixed() == copy.serialize_length_prefixed()
    }

    #[quickcheck]
    fn prop_length_prefixed_injective(
        a: (String, String, u64, Vec<u8>),
        b: (String, String, u64, Vec<u8>),
    ) -> bool {
        let ta = Transaction::new(a.0, a.1, a.2, a.3);
        let tb = Transaction::new(b.0, b.1, b.2, b.3);
        (ta == tb) == (ta.serialize_length_prefixed() == tb.serialize_length_prefixed())
    }

    #[quickcheck]
    fn prop_canonical_injective_without_separator(
        a: (String, String, u64, Vec<u8>),
        b: (String, String, u64, Vec<u8>),
    ) -> bool {
        let strip = |s: String| s.replace(FIELD_SEPARATOR, "");
        let ta = Transaction::new(strip(a.0), strip(a.1), a.2, a.3);
        let tb = Transaction::new(strip(b.0), strip(b.1), b.2, b.3);
        (ta == tb) == (ta.serialize() == tb.serialize())
    }
}
