//! Ledger state transitions
//!
//! The working state of a ledger version: the account-state tree carried
//! over from the parent and the transaction tree being filled for this
//! version. Closing seals both roots into a header and hands back the
//! snapshot seeding the next version.

use crate::model::{Hash, LedgerEntry, LedgerHeader, Transaction, TransactionMeta};
use crate::tree::{HashTree, LeafItem};
use crate::Result;

/// Mutable working state for the ledger version being built
pub struct LedgerState {
    sequence: u32,
    parent_hash: Hash,
    parent_close_time: u32,
    total_coins: u64,
    state: HashTree,
    txs: HashTree,
}

impl LedgerState {
    /// The first ledger version, with empty trees
    pub fn genesis(total_coins: u64) -> Self {
        LedgerState {
            sequence: 1,
            parent_hash: Hash::ZERO,
            parent_close_time: 0,
            total_coins,
            state: HashTree::new(),
            txs: HashTree::new(),
        }
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    pub fn parent_hash(&self) -> Hash {
        self.parent_hash
    }

    pub fn total_coins(&self) -> u64 {
        self.total_coins
    }

    /// The account-state tree
    pub fn state(&self) -> &HashTree {
        &self.state
    }

    /// This version's transaction tree
    pub fn transactions(&self) -> &HashTree {
        &self.txs
    }

    /// Insert or replace a state entry at its derived index
    pub fn apply_entry(&mut self, entry: LedgerEntry) -> Result<()> {
        let index = entry.index();
        self.state.set(index, LeafItem::Entry(entry))
    }

    /// Remove a state entry; returns whether it existed
    pub fn remove_entry(&mut self, index: &Hash) -> bool {
        self.state.remove(index)
    }

    /// Record an applied transaction with its metadata
    pub fn apply_transaction(&mut self, tx: Transaction, meta: TransactionMeta) -> Result<()> {
        let id = tx.id()?;
        self.txs.set(id, LeafItem::TransactionWithMeta(tx, meta))
    }

    /// Close this version: produce its header and the state seeding the
    /// next version (same account state, fresh transaction tree)
    pub fn close(&self, close_time: u32, close_resolution: u8) -> (LedgerHeader, LedgerState) {
        let header = LedgerHeader {
            sequence: self.sequence,
            total_coins: self.total_coins,
            parent_hash: self.parent_hash,
            tx_root: self.txs.root_hash(),
            state_root: self.state.root_hash(),
            parent_close_time: self.parent_close_time,
            close_time,
            close_resolution,
            close_flags: 0,
        };
        let next = LedgerState {
            sequence: self.sequence + 1,
            parent_hash: header.hash(),
            parent_close_time: close_time,
            total_coins: self.total_coins,
            state: self.state.snapshot(),
            txs: HashTree::new(),
        };
        (header, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AccountId, Amount};

    fn account(seed: u8) -> AccountId {
        AccountId::from_bytes([seed; 20])
    }

    #[test]
    fn test_close_links_versions() {
        let mut genesis = LedgerState::genesis(1_000_000);
        genesis
            .apply_entry(LedgerEntry::account_root(
                account(1),
                Amount::from_drops(1_000_000),
                1,
            ))
            .unwrap();

        let (first, next) = genesis.close(100, 10);
        assert_eq!(first.sequence, 1);
        assert_eq!(first.parent_hash, Hash::ZERO);
        assert_eq!(first.state_root, genesis.state().root_hash());

        assert_eq!(next.sequence(), 2);
        assert_eq!(next.parent_hash(), first.hash());

        let (second, _) = next.close(110, 10);
        assert_eq!(second.parent_close_time, 100);
        assert_eq!(second.parent_hash, first.hash());
    }

    #[test]
    fn test_state_carries_and_transactions_reset() {
        let mut genesis = LedgerState::genesis(1_000_000);
        genesis
            .apply_entry(LedgerEntry::account_root(
                account(1),
                Amount::from_drops(500),
                1,
            ))
            .unwrap();
        let tx = Transaction::payment(
            account(1),
            account(2),
            Amount::from_drops(100),
            1,
            Amount::from_drops(10),
        );
        genesis
            .apply_transaction(tx, TransactionMeta::new(0, TransactionMeta::APPLIED))
            .unwrap();

        assert_eq!(genesis.transactions().len(), 1);

        let (header, next) = genesis.close(100, 10);
        assert_ne!(header.tx_root, Hash::ZERO);
        assert_eq!(next.state().root_hash(), genesis.state().root_hash());
        assert!(next.transactions().is_empty());
    }

    #[test]
    fn test_remove_entry() {
        let mut state = LedgerState::genesis(1_000_000);
        let entry = LedgerEntry::account_root(account(1), Amount::from_drops(5), 1);
        let index = entry.index();
        state.apply_entry(entry).unwrap();

        assert!(state.remove_entry(&index));
        assert!(!state.remove_entry(&index));
        assert!(state.state().is_empty());
    }
}
