//! Diff between two tree versions
//!
//! Simultaneous descent over both trees, pruning every subtree pair that is
//! reference-identical or hash-identical. An equal hash at equal depth is
//! treated as proof of equal content, which is sound exactly as far as the
//! underlying hash resists collisions.

use crate::model::Hash;
use crate::tree::{HashTree, Leaf, Link, Node};
use serde::Serialize;
use std::sync::Arc;

/// Type of change in a diff
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum DiffEntry {
    /// Key exists only in the new tree
    Added { key: Hash, new_hash: Hash },
    /// Key exists only in the old tree
    Removed { key: Hash, old_hash: Hash },
    /// Key exists in both trees with different contents
    Modified {
        key: Hash,
        old_hash: Hash,
        new_hash: Hash,
    },
}

impl DiffEntry {
    pub fn key(&self) -> Hash {
        match self {
            DiffEntry::Added { key, .. } => *key,
            DiffEntry::Removed { key, .. } => *key,
            DiffEntry::Modified { key, .. } => *key,
        }
    }
}

/// A diff between two tree versions
#[derive(Clone, Debug, Serialize)]
pub struct Diff {
    pub entries: Vec<DiffEntry>,
}

impl Diff {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn added_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, DiffEntry::Added { .. }))
            .count()
    }

    pub fn removed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, DiffEntry::Removed { .. }))
            .count()
    }

    pub fn modified_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, DiffEntry::Modified { .. }))
            .count()
    }

    /// Every key that differs, in ascending order
    pub fn keys(&self) -> Vec<Hash> {
        self.entries.iter().map(DiffEntry::key).collect()
    }
}

/// Compute the diff between two tree versions
pub fn diff_trees(old: &HashTree, new: &HashTree) -> Diff {
    let mut entries = Vec::new();
    diff_links(old.root(), new.root(), &mut entries);
    entries.sort_by_key(DiffEntry::key);
    Diff { entries }
}

fn diff_links(old: &Link, new: &Link, out: &mut Vec<DiffEntry>) {
    match (old, new) {
        (None, None) => {}
        (Some(o), None) => o.for_each_leaf(&mut |leaf| {
            out.push(DiffEntry::Removed {
                key: leaf.key(),
                old_hash: leaf.hash(),
            })
        }),
        (None, Some(n)) => n.for_each_leaf(&mut |leaf| {
            out.push(DiffEntry::Added {
                key: leaf.key(),
                new_hash: leaf.hash(),
            })
        }),
        (Some(o), Some(n)) => {
            if Arc::ptr_eq(o, n) || o.hash() == n.hash() {
                return;
            }
            match (o.as_ref(), n.as_ref()) {
                (Node::Inner(a), Node::Inner(b)) => {
                    for index in 0..16 {
                        diff_links(a.child(index), b.child(index), out);
                    }
                }
                (Node::Leaf(a), Node::Leaf(b)) => {
                    if a.key() == b.key() {
                        out.push(DiffEntry::Modified {
                            key: a.key(),
                            old_hash: a.hash(),
                            new_hash: b.hash(),
                        });
                    } else {
                        out.push(DiffEntry::Removed {
                            key: a.key(),
                            old_hash: a.hash(),
                        });
                        out.push(DiffEntry::Added {
                            key: b.key(),
                            new_hash: b.hash(),
                        });
                    }
                }
                (Node::Leaf(leaf), Node::Inner(_)) => diff_leaf_subtree(leaf, n, true, out),
                (Node::Inner(_), Node::Leaf(leaf)) => diff_leaf_subtree(leaf, o, false, out),
            }
        }
    }
}

/// One side holds a single leaf where the other holds a whole subtree
fn diff_leaf_subtree(leaf: &Leaf, subtree: &Arc<Node>, leaf_is_old: bool, out: &mut Vec<DiffEntry>) {
    let mut matched = false;
    subtree.for_each_leaf(&mut |other| {
        if other.key() == leaf.key() {
            matched = true;
            if other.hash() != leaf.hash() {
                let (old_hash, new_hash) = if leaf_is_old {
                    (leaf.hash(), other.hash())
                } else {
                    (other.hash(), leaf.hash())
                };
                out.push(DiffEntry::Modified {
                    key: leaf.key(),
                    old_hash,
                    new_hash,
                });
            }
        } else if leaf_is_old {
            out.push(DiffEntry::Added {
                key: other.key(),
                new_hash: other.hash(),
            });
        } else {
            out.push(DiffEntry::Removed {
                key: other.key(),
                old_hash: other.hash(),
            });
        }
    });
    if !matched {
        if leaf_is_old {
            out.push(DiffEntry::Removed {
                key: leaf.key(),
                old_hash: leaf.hash(),
            });
        } else {
            out.push(DiffEntry::Added {
                key: leaf.key(),
                new_hash: leaf.hash(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AccountId, Amount, LedgerEntry};
    use crate::tree::LeafItem;

    fn item(drops: u64) -> LeafItem {
        LeafItem::Entry(LedgerEntry::account_root(
            AccountId::from_bytes([1u8; 20]),
            Amount::from_drops(drops),
            1,
        ))
    }

    fn key(seed: u8) -> Hash {
        let mut arr = [0u8; 32];
        arr[0] = seed;
        Hash::from_bytes(arr)
    }

    #[test]
    fn test_diff_of_snapshot_is_empty() {
        let mut tree = HashTree::new();
        tree.set(key(1), item(1)).unwrap();
        tree.set(key(2), item(2)).unwrap();

        assert!(diff_trees(&tree, &tree.snapshot()).is_empty());
    }

    #[test]
    fn test_diff_sees_addition() {
        let mut old = HashTree::new();
        old.set(key(1), item(1)).unwrap();

        let mut new = old.snapshot();
        new.set(key(2), item(2)).unwrap();

        let diff = diff_trees(&old, &new);
        assert_eq!(diff.added_count(), 1);
        assert_eq!(diff.removed_count(), 0);
        assert_eq!(diff.keys(), vec![key(2)]);
    }

    #[test]
    fn test_diff_sees_removal() {
        let mut old = HashTree::new();
        old.set(key(1), item(1)).unwrap();
        old.set(key(2), item(2)).unwrap();

        let mut new = old.snapshot();
        new.remove(&key(1));

        let diff = diff_trees(&old, &new);
        assert_eq!(diff.removed_count(), 1);
        assert_eq!(diff.keys(), vec![key(1)]);
    }

    #[test]
    fn test_diff_sees_modification() {
        let mut old = HashTree::new();
        old.set(key(1), item(1)).unwrap();
        old.set(key(2), item(2)).unwrap();

        let mut new = old.snapshot();
        new.set(key(2), item(99)).unwrap();

        let diff = diff_trees(&old, &new);
        assert_eq!(diff.modified_count(), 1);
        assert_eq!(diff.added_count(), 0);
        assert_eq!(diff.keys(), vec![key(2)]);
    }

    #[test]
    fn test_diff_leaf_against_subtree() {
        // old holds a single leaf where new grew a whole branch
        let mut old = HashTree::new();
        old.set(key(0x11), item(1)).unwrap();

        let mut new = old.snapshot();
        new.set(key(0x12), item(2)).unwrap();
        new.set(key(0x13), item(3)).unwrap();

        let diff = diff_trees(&old, &new);
        assert_eq!(diff.added_count(), 2);
        assert_eq!(diff.modified_count(), 0);
        assert_eq!(diff.removed_count(), 0);
        assert_eq!(diff.keys(), vec![key(0x12), key(0x13)]);
    }

    #[test]
    fn test_diff_entries_are_sorted() {
        let mut old = HashTree::new();
        let mut new = HashTree::new();
        for seed in [0x90u8, 0x10, 0x50] {
            new.set(key(seed), item(seed as u64)).unwrap();
        }
        old.set(key(0x70), item(7)).unwrap();

        let diff = diff_trees(&old, &new);
        let keys = diff.keys();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(diff.added_count(), 3);
        assert_eq!(diff.removed_count(), 1);
    }
}
