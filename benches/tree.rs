use criterion::{criterion_group, criterion_main, Criterion};
use ledgerkit::{AccountId, Amount, HashTree, LeafItem, LedgerEntry};
use std::hint::black_box;

fn entry(i: u16) -> LedgerEntry {
    let mut bytes = [0u8; 20];
    bytes[18..].copy_from_slice(&i.to_be_bytes());
    LedgerEntry::account_root(
        AccountId::from_bytes(bytes),
        Amount::from_drops(i as u64 * 10),
        1,
    )
}

fn populated(count: u16) -> HashTree {
    let mut tree = HashTree::new();
    for i in 0..count {
        let e = entry(i);
        tree.set(e.index(), LeafItem::Entry(e)).unwrap();
    }
    tree
}

fn bench_insert(c: &mut Criterion) {
    c.bench_function("insert_256_entries", |b| {
        b.iter(|| {
            let tree = populated(256);
            black_box(tree.root_hash())
        })
    });
}

fn bench_snapshot_update(c: &mut Criterion) {
    let base = populated(256);
    base.root_hash();

    c.bench_function("snapshot_and_update_one_entry", |b| {
        b.iter(|| {
            let mut next = base.snapshot();
            let e = entry(999);
            next.set(e.index(), LeafItem::Entry(e)).unwrap();
            black_box(next.root_hash())
        })
    });
}

criterion_group!(benches, bench_insert, bench_snapshot_update);
criterion_main!(benches);
