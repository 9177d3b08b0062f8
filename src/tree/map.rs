//! The authenticated map from 256-bit keys to leaf payloads

use super::node::{Inner, Leaf, Link, Node};
use super::LeafItem;
use crate::model::Hash;
use crate::Result;
use std::sync::Arc;

/// An authenticated map over 256-bit keys with copy-on-write snapshots
///
/// The root hash is a pure function of the (key, item) set: the same set
/// yields the same root no matter the order of insertions and removals.
/// [`HashTree::snapshot`] clones in O(1); the clone shares every node with
/// the original, and later mutation of either tree reallocates only the
/// path from the root to the touched leaf.
#[derive(Clone, Default)]
pub struct HashTree {
    root: Link,
    len: usize,
}

enum Removed {
    NotFound,
    Replaced(Link),
}

impl HashTree {
    /// Create an empty tree
    pub fn new() -> Self {
        HashTree::default()
    }

    /// Number of leaves
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Root hash; the all-zero constant for an empty tree
    pub fn root_hash(&self) -> Hash {
        match &self.root {
            Some(node) => node.hash(),
            None => Hash::ZERO,
        }
    }

    /// Look up the payload stored under `key`
    pub fn get(&self, key: &Hash) -> Option<&LeafItem> {
        let mut node = self.root.as_deref()?;
        let mut depth = 0;
        loop {
            match node {
                Node::Leaf(leaf) => {
                    return if leaf.key() == *key {
                        Some(leaf.item())
                    } else {
                        None
                    };
                }
                Node::Inner(inner) => {
                    node = inner.child(key.nibble(depth)).as_deref()?;
                    depth += 1;
                }
            }
        }
    }

    pub fn contains(&self, key: &Hash) -> bool {
        self.get(key).is_some()
    }

    /// Insert or replace the payload under `key`
    ///
    /// The payload is encoded before any node changes, so a codec error
    /// leaves the tree exactly as it was.
    pub fn set(&mut self, key: Hash, item: LeafItem) -> Result<()> {
        let leaf = Leaf::new(key, item)?;
        let (root, replaced) = Self::set_at(&self.root, leaf, 0);
        self.root = Some(root);
        if !replaced {
            self.len += 1;
        }
        Ok(())
    }

    fn set_at(link: &Link, leaf: Leaf, depth: usize) -> (Arc<Node>, bool) {
        match link {
            None => (Arc::new(Node::Leaf(leaf)), false),
            Some(node) => match node.as_ref() {
                Node::Leaf(existing) if existing.key() == leaf.key() => {
                    (Arc::new(Node::Leaf(leaf)), true)
                }
                Node::Leaf(existing) => {
                    let split = Self::split(Arc::clone(node), existing.key(), leaf, depth);
                    (split, false)
                }
                Node::Inner(inner) => {
                    // copy-on-write: shallow-copy this node and descend into
                    // the one slot on the key's path
                    let index = leaf.key().nibble(depth);
                    let (child, replaced) = Self::set_at(inner.child(index), leaf, depth + 1);
                    let rebuilt = inner.with_child(index, Some(child));
                    (Arc::new(Node::Inner(rebuilt)), replaced)
                }
            },
        }
    }

    /// Split a leaf slot: build inner nodes down to the first nibble where
    /// the two keys diverge, then hang both leaves there
    fn split(existing: Arc<Node>, existing_key: Hash, leaf: Leaf, depth: usize) -> Arc<Node> {
        let a = existing_key.nibble(depth);
        let b = leaf.key().nibble(depth);
        let inner = if a == b {
            let child = Self::split(existing, existing_key, leaf, depth + 1);
            Inner::new().with_child(a, Some(child))
        } else {
            Inner::new()
                .with_child(a, Some(existing))
                .with_child(b, Some(Arc::new(Node::Leaf(leaf))))
        };
        Arc::new(Node::Inner(inner))
    }

    /// Remove the payload under `key`; returns whether anything was removed
    pub fn remove(&mut self, key: &Hash) -> bool {
        match Self::remove_at(&self.root, key, 0) {
            Removed::NotFound => false,
            Removed::Replaced(root) => {
                self.root = root;
                self.len -= 1;
                true
            }
        }
    }

    fn remove_at(link: &Link, key: &Hash, depth: usize) -> Removed {
        match link {
            None => Removed::NotFound,
            Some(node) => match node.as_ref() {
                Node::Leaf(leaf) if leaf.key() == *key => Removed::Replaced(None),
                Node::Leaf(_) => Removed::NotFound,
                Node::Inner(inner) => {
                    let index = key.nibble(depth);
                    match Self::remove_at(inner.child(index), key, depth + 1) {
                        Removed::NotFound => Removed::NotFound,
                        Removed::Replaced(child) => {
                            let rebuilt = inner.with_child(index, child);
                            Removed::Replaced(Self::collapse(rebuilt))
                        }
                    }
                }
            },
        }
    }

    /// Keep removal canonical: an inner node left holding a single leaf
    /// collapses to that leaf, restoring the shape direct insertion builds.
    /// A single remaining inner child stays put — it carries a shared key
    /// prefix that insertion would also build.
    fn collapse(inner: Inner) -> Link {
        if inner.occupied() == 0 {
            return None;
        }
        if let Some(only) = inner.only_child() {
            if matches!(only.as_ref(), Node::Leaf(_)) {
                return Some(Arc::clone(only));
            }
        }
        Some(Arc::new(Node::Inner(inner)))
    }

    /// An O(1) snapshot sharing every node with this tree
    ///
    /// Mutating either tree afterwards copies only the touched path; the
    /// other tree observes nothing.
    pub fn snapshot(&self) -> HashTree {
        self.clone()
    }

    /// All keys in ascending order
    pub fn keys(&self) -> Vec<Hash> {
        let mut keys = Vec::with_capacity(self.len);
        if let Some(root) = &self.root {
            root.for_each_leaf(&mut |leaf| keys.push(leaf.key()));
        }
        keys
    }

    pub(crate) fn root(&self) -> &Link {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AccountId, Amount, LedgerEntry, MAX_DROPS};

    fn item(drops: u64) -> LeafItem {
        LeafItem::Entry(LedgerEntry::account_root(
            AccountId::from_bytes([1u8; 20]),
            Amount::from_drops(drops),
            1,
        ))
    }

    fn key(bytes: &[u8]) -> Hash {
        let mut arr = [0u8; 32];
        arr[..bytes.len()].copy_from_slice(bytes);
        Hash::from_bytes(arr)
    }

    #[test]
    fn test_empty_tree() {
        let tree = HashTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.root_hash(), Hash::ZERO);
        assert_eq!(tree.get(&key(&[1])), None);
    }

    #[test]
    fn test_set_and_get() {
        let mut tree = HashTree::new();
        tree.set(key(&[0x10]), item(10)).unwrap();
        tree.set(key(&[0x20]), item(20)).unwrap();

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get(&key(&[0x10])), Some(&item(10)));
        assert_eq!(tree.get(&key(&[0x20])), Some(&item(20)));
        assert_eq!(tree.get(&key(&[0x30])), None);
    }

    #[test]
    fn test_replace_keeps_len() {
        let mut tree = HashTree::new();
        tree.set(key(&[1]), item(10)).unwrap();
        let before = tree.root_hash();

        tree.set(key(&[1]), item(20)).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get(&key(&[1])), Some(&item(20)));
        assert_ne!(tree.root_hash(), before);
    }

    #[test]
    fn test_shared_prefix_keys() {
        // identical first three nibbles, diverging on the fourth
        let a = key(&[0xab, 0xc1]);
        let b = key(&[0xab, 0xc2]);

        let mut tree = HashTree::new();
        tree.set(a, item(1)).unwrap();
        tree.set(b, item(2)).unwrap();

        assert_eq!(tree.get(&a), Some(&item(1)));
        assert_eq!(tree.get(&b), Some(&item(2)));

        tree.remove(&b);
        let mut direct = HashTree::new();
        direct.set(a, item(1)).unwrap();
        assert_eq!(tree.root_hash(), direct.root_hash());
    }

    #[test]
    fn test_root_hash_is_order_independent() {
        let keys = [key(&[0x01]), key(&[0x81]), key(&[0x82]), key(&[0xff])];

        let mut forward = HashTree::new();
        for (i, k) in keys.iter().enumerate() {
            forward.set(*k, item(i as u64)).unwrap();
        }

        let mut backward = HashTree::new();
        for (i, k) in keys.iter().enumerate().rev() {
            backward.set(*k, item(i as u64)).unwrap();
        }

        assert_eq!(forward.root_hash(), backward.root_hash());
    }

    #[test]
    fn test_remove_missing_key_is_a_no_op() {
        let mut tree = HashTree::new();
        tree.set(key(&[1]), item(1)).unwrap();
        let before = tree.root_hash();

        assert!(!tree.remove(&key(&[2])));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root_hash(), before);
    }

    #[test]
    fn test_remove_last_leaf_empties_the_tree() {
        let mut tree = HashTree::new();
        tree.set(key(&[1]), item(1)).unwrap();

        assert!(tree.remove(&key(&[1])));
        assert!(tree.is_empty());
        assert_eq!(tree.root_hash(), Hash::ZERO);
    }

    #[test]
    fn test_remove_restores_direct_construction_hash() {
        let low = key(&[0x00, 0x01]);
        let high = Hash::from_bytes([0xff; 32]);

        let mut tree = HashTree::new();
        tree.set(low, item(1)).unwrap();
        let h1 = tree.root_hash();

        tree.set(high, item(2)).unwrap();
        let h2 = tree.root_hash();
        assert_ne!(h2, h1);

        assert!(tree.remove(&low));
        let mut direct = HashTree::new();
        direct.set(high, item(2)).unwrap();
        assert_eq!(tree.root_hash(), direct.root_hash());
    }

    #[test]
    fn test_snapshot_isolation() {
        let mut original = HashTree::new();
        original.set(key(&[1]), item(1)).unwrap();
        original.set(key(&[2]), item(2)).unwrap();
        let original_root = original.root_hash();

        let mut fork = original.snapshot();
        assert_eq!(fork.root_hash(), original_root);

        fork.set(key(&[2]), item(99)).unwrap();
        fork.set(key(&[3]), item(3)).unwrap();

        assert_eq!(original.get(&key(&[2])), Some(&item(2)));
        assert_eq!(original.get(&key(&[3])), None);
        assert_eq!(original.root_hash(), original_root);
        assert_ne!(fork.root_hash(), original_root);
    }

    #[test]
    fn test_snapshot_shares_unmodified_subtrees() {
        let mut original = HashTree::new();
        original.set(key(&[0x01]), item(1)).unwrap();
        original.set(key(&[0xf1]), item(2)).unwrap();

        let mut fork = original.snapshot();
        fork.set(key(&[0xf2]), item(3)).unwrap();

        // the untouched low branch is the same allocation in both trees
        let original_low = match original.root().as_deref() {
            Some(Node::Inner(inner)) => inner.child(0).clone().unwrap(),
            _ => panic!("expected an inner root"),
        };
        let fork_low = match fork.root().as_deref() {
            Some(Node::Inner(inner)) => inner.child(0).clone().unwrap(),
            _ => panic!("expected an inner root"),
        };
        assert!(Arc::ptr_eq(&original_low, &fork_low));
    }

    #[test]
    fn test_failed_set_leaves_tree_untouched() {
        let mut tree = HashTree::new();
        tree.set(key(&[1]), item(1)).unwrap();
        let before = tree.root_hash();

        let oversized = item(MAX_DROPS + 1);
        assert!(tree.set(key(&[2]), oversized).is_err());
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root_hash(), before);
    }

    #[test]
    fn test_keys_are_sorted() {
        let mut tree = HashTree::new();
        for seed in [0x7fu8, 0x01, 0xff, 0x80] {
            tree.set(key(&[seed]), item(seed as u64)).unwrap();
        }

        let keys = tree.keys();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(keys.len(), 4);
    }
}
