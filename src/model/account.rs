//! Account identifiers and currency codes

use crate::{Error, Result};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A 160-bit account identifier
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId([u8; 20]);

impl AccountId {
    /// Create an account id from raw bytes
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        AccountId(bytes)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|e| Error::InvalidAccount(e.to_string()))?;
        if bytes.len() != 20 {
            return Err(Error::InvalidAccount(format!(
                "expected 20 bytes, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; 20];
        arr.copy_from_slice(&bytes);
        Ok(AccountId(arr))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", &self.to_hex()[..8])
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        AccountId::from_hex(&s).map_err(de::Error::custom)
    }
}

/// A 160-bit currency code
///
/// The all-zero code is the native currency. A standard code carries three
/// ASCII characters at bytes 12..15 with every other byte zero.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Currency([u8; 20]);

impl Currency {
    /// The native currency
    pub const NATIVE: Currency = Currency([0u8; 20]);

    /// Create a currency code from raw bytes
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Currency(bytes)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Build a standard three-letter code, e.g. "USD"
    pub fn from_code(code: &str) -> Result<Self> {
        let bytes = code.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(|b| b.is_ascii_alphanumeric()) {
            return Err(Error::InvalidCurrency(code.to_string()));
        }
        let mut out = [0u8; 20];
        out[12..15].copy_from_slice(bytes);
        Ok(Currency(out))
    }

    /// Check if this is the native currency
    pub fn is_native(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// The three-letter code, when the standard layout is used
    pub fn code(&self) -> Option<String> {
        if self.is_native() {
            return None;
        }
        let (head, rest) = self.0.split_at(12);
        let (code, tail) = rest.split_at(3);
        if head.iter().all(|b| *b == 0)
            && tail.iter().all(|b| *b == 0)
            && code.iter().all(|b| b.is_ascii_alphanumeric())
        {
            String::from_utf8(code.to_vec()).ok()
        } else {
            None
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_native() {
            write!(f, "native")
        } else if let Some(code) = self.code() {
            write!(f, "{}", code)
        } else {
            write!(f, "{}", hex::encode(self.0))
        }
    }
}

impl fmt::Debug for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Currency({})", self)
    }
}
