//! # ledgerkit
//!
//! A client-side core for a distributed ledger protocol.
//!
//! ledgerkit models the protocol's accounts, transactions, and ledger state,
//! and exchanges them with network peers through two pieces every other
//! layer plugs into:
//!
//! - **Canonical binary codec**: typed field sets that always encode in a
//!   fixed, type-determined order, so two peers holding the same logical
//!   object produce identical bytes
//! - **Authenticated state trees**: a 16-ary hash tree over 256-bit keys
//!   with domain-separated hashing and copy-on-write snapshots, so two
//!   peers holding the same entries compute the same root hash and a new
//!   ledger version shares every unchanged subtree with its parent
//!
//! ## Core Concepts
//!
//! - **Entries**: typed ledger contents (accounts, trust lines, offers)
//!   addressed by a derived 256-bit index
//! - **Transactions**: canonical field sets with signing and identifier
//!   hashes
//! - **Trees**: authenticated maps from index to payload
//! - **Headers**: versioned snapshots sealing both tree roots
//!
//! ## Example
//!
//! ```ignore
//! use ledgerkit::{Amount, HashTree, LeafItem, LedgerEntry};
//!
//! let entry = LedgerEntry::account_root(alice, Amount::from_drops(100), 1);
//! let mut state = HashTree::new();
//! state.set(entry.index(), LeafItem::Entry(entry))?;
//!
//! let snapshot = state.snapshot();
//! assert_eq!(snapshot.root_hash(), state.root_hash());
//! ```

pub mod codec;
pub mod model;
pub mod ops;
pub mod tree;

mod error;

pub use codec::{fields, FieldId, FieldSet, FieldType, FieldValue};
pub use error::{Error, Result};
pub use model::{
    index, AccountId, Amount, Currency, EntryType, Hash, HashPrefix, LedgerEntry, LedgerHeader,
    Transaction, TransactionMeta, TransactionType, MAX_DROPS,
};
pub use ops::{diff_trees, Diff, DiffEntry, LedgerState};
pub use tree::{HashTree, LeafItem};
