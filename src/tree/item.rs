//! Leaf payloads: the polymorphic contents of tree leaves

use crate::codec::{read_vl, write_vl, Reader};
use crate::model::{HashPrefix, LedgerEntry, Transaction, TransactionMeta};
use crate::Result;
use bytes::BufMut;

/// Payload stored at a tree leaf
///
/// A closed set: consumers match exhaustively, so adding a payload kind is
/// a compile-checked change at every site that serializes, hashes, or
/// copies items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LeafItem {
    /// An entry in the account-state tree
    Entry(LedgerEntry),
    /// A transaction without metadata (proposed transaction sets)
    Transaction(Transaction),
    /// A transaction with its execution metadata (closed-ledger trees)
    TransactionWithMeta(Transaction, TransactionMeta),
}

impl LeafItem {
    /// Serialize the canonical payload bytes into `out`
    pub fn write(&self, out: &mut impl BufMut) -> Result<()> {
        match self {
            LeafItem::Entry(entry) => entry.fields().write(out),
            LeafItem::Transaction(tx) => tx.fields().write(out),
            LeafItem::TransactionWithMeta(tx, meta) => {
                // both blobs are length-wrapped so they parse apart again
                let tx_bytes = tx.to_bytes()?;
                write_vl(out, tx_bytes.len())?;
                out.put_slice(&tx_bytes);
                let meta_bytes = meta.to_bytes()?;
                write_vl(out, meta_bytes.len())?;
                out.put_slice(&meta_bytes);
                Ok(())
            }
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write(&mut out)?;
        Ok(out)
    }

    /// The domain-separation tag this payload hashes under
    pub fn hash_prefix(&self) -> HashPrefix {
        match self {
            LeafItem::Entry(_) => HashPrefix::LeafNode,
            LeafItem::Transaction(_) => HashPrefix::TransactionId,
            LeafItem::TransactionWithMeta(..) => HashPrefix::TransactionNode,
        }
    }

    /// An independent deep copy via a codec round-trip
    ///
    /// The copy re-parses the canonical bytes, so it is byte- and
    /// hash-identical to the original and shares no state with it.
    pub fn deep_copy(&self) -> Result<LeafItem> {
        match self {
            LeafItem::Entry(entry) => Ok(LeafItem::Entry(LedgerEntry::from_bytes(
                entry.index(),
                &entry.to_bytes()?,
            )?)),
            LeafItem::Transaction(tx) => Ok(LeafItem::Transaction(Transaction::from_bytes(
                &tx.to_bytes()?,
            )?)),
            LeafItem::TransactionWithMeta(..) => {
                let bytes = self.to_bytes()?;
                let mut reader = Reader::new(&bytes);
                let tx_len = read_vl(&mut reader)?;
                let tx = Transaction::from_bytes(reader.bytes(tx_len)?)?;
                let meta_len = read_vl(&mut reader)?;
                let meta = TransactionMeta::from_bytes(reader.bytes(meta_len)?)?;
                Ok(LeafItem::TransactionWithMeta(tx, meta))
            }
        }
    }
}
