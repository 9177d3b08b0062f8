//! Native amounts in the ledger's smallest denomination

use crate::{Error, Result};
use std::fmt;

/// Largest representable native amount, in drops (10^17)
pub const MAX_DROPS: u64 = 100_000_000_000_000_000;

/// Wire marker for a positive native amount
const NATIVE_POSITIVE: u64 = 0x4000_0000_0000_0000;

/// Wire marker distinguishing issued-currency amounts
const ISSUED: u64 = 0x8000_0000_0000_0000;

/// A native amount, counted in drops
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Create an amount from a drop count
    ///
    /// Amounts above [`MAX_DROPS`] are representable in memory but fail at
    /// encode time, before they can reach a tree or the wire.
    pub fn from_drops(drops: u64) -> Self {
        Amount(drops)
    }

    /// The drop count
    pub fn drops(&self) -> u64 {
        self.0
    }

    /// Add, unless the sum passes [`MAX_DROPS`]
    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        let sum = self.0.checked_add(other.0)?;
        (sum <= MAX_DROPS).then_some(Amount(sum))
    }

    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }

    /// The 8-byte wire form: drops with the native/positive marker set
    pub(crate) fn to_wire(self) -> Result<u64> {
        if self.0 > MAX_DROPS {
            return Err(Error::MalformedEncoding(format!(
                "amount {} exceeds {} drops",
                self.0, MAX_DROPS
            )));
        }
        Ok(self.0 | NATIVE_POSITIVE)
    }

    pub(crate) fn from_wire(raw: u64) -> Result<Self> {
        if raw & ISSUED != 0 {
            return Err(Error::UnsupportedType(
                "issued-currency amount".to_string(),
            ));
        }
        if raw & NATIVE_POSITIVE == 0 {
            return Err(Error::MalformedEncoding(
                "native amount missing the positive marker".to_string(),
            ));
        }
        let drops = raw & !NATIVE_POSITIVE;
        if drops > MAX_DROPS {
            return Err(Error::MalformedEncoding(format!(
                "amount {} exceeds {} drops",
                drops, MAX_DROPS
            )));
        }
        Ok(Amount(drops))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
