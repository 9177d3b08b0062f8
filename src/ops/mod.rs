//! Ledger operations: state transitions and tree diffing

mod diff;
mod ledger;

pub use diff::{diff_trees, Diff, DiffEntry};
pub use ledger::LedgerState;
