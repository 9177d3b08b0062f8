//! Ledger headers: the versioned snapshot binding both trees

use super::{Hash, HashPrefix};
use crate::codec::Reader;
use crate::Result;
use bytes::BufMut;
use serde::Serialize;

/// Encoded header size in bytes
pub const HEADER_SIZE: usize = 118;

/// Canonical header of a closed ledger version
///
/// The layout is fixed and position-determined — no field headers — and
/// hashes under the ledger prefix. The header is what peers exchange and
/// vote on; both tree roots are sealed inside it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LedgerHeader {
    /// Position of this version in the chain
    pub sequence: u32,
    /// Total drops in existence
    pub total_coins: u64,
    /// Hash of the parent header
    pub parent_hash: Hash,
    /// Root of this version's transaction tree
    pub tx_root: Hash,
    /// Root of the account-state tree
    pub state_root: Hash,
    /// When the parent version closed
    pub parent_close_time: u32,
    /// When this version closed
    pub close_time: u32,
    /// Close-time granularity in seconds
    pub close_resolution: u8,
    /// Close flags
    pub close_flags: u8,
}

impl LedgerHeader {
    /// Write the canonical 118-byte layout into `out`
    pub fn write(&self, out: &mut impl BufMut) {
        out.put_u32(self.sequence);
        out.put_u64(self.total_coins);
        out.put_slice(self.parent_hash.as_bytes());
        out.put_slice(self.tx_root.as_bytes());
        out.put_slice(self.state_root.as_bytes());
        out.put_u32(self.parent_close_time);
        out.put_u32(self.close_time);
        out.put_u8(self.close_resolution);
        out.put_u8(self.close_flags);
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_SIZE);
        self.write(&mut out);
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(bytes);
        Ok(LedgerHeader {
            sequence: reader.u32()?,
            total_coins: reader.u64()?,
            parent_hash: read_hash(&mut reader)?,
            tx_root: read_hash(&mut reader)?,
            state_root: read_hash(&mut reader)?,
            parent_close_time: reader.u32()?,
            close_time: reader.u32()?,
            close_resolution: reader.u8()?,
            close_flags: reader.u8()?,
        })
    }

    /// The ledger hash peers reference this version by
    pub fn hash(&self) -> Hash {
        Hash::prefixed(HashPrefix::LedgerHeader, &[&self.to_bytes()])
    }
}

fn read_hash(reader: &mut Reader) -> Result<Hash> {
    let mut arr = [0u8; 32];
    arr.copy_from_slice(reader.bytes(32)?);
    Ok(Hash::from_bytes(arr))
}
