//! Ledger entries: the typed contents of the account-state tree

use super::{AccountId, Amount, Currency, Hash};
use crate::codec::fields::{
    ACCOUNT, BALANCE, FLAGS, LEDGER_ENTRY_TYPE, SEQUENCE, TAKER_GETS, TAKER_PAYS,
};
use crate::codec::{FieldSet, FieldValue};
use crate::{Error, Result};
use serde::Serialize;

/// Ledger entry type codes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum EntryType {
    AccountRoot = 0x0061,
    DirectoryNode = 0x0064,
    Offer = 0x006f,
    RippleState = 0x0072,
}

impl EntryType {
    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            0x0061 => Some(EntryType::AccountRoot),
            0x0064 => Some(EntryType::DirectoryNode),
            0x006f => Some(EntryType::Offer),
            0x0072 => Some(EntryType::RippleState),
            _ => None,
        }
    }
}

/// A single entry in the ledger state
///
/// The entry owns its 256-bit index. The index addresses the entry in the
/// state tree and is derived from the identifying fields via the
/// ledger-space rules in [`index`]; it is not part of the encoded payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    index: Hash,
    fields: FieldSet,
}

impl LedgerEntry {
    /// Create an empty entry of the given type at an index
    pub fn new(entry_type: EntryType, index: Hash) -> Self {
        let mut fields = FieldSet::new();
        fields
            .set(LEDGER_ENTRY_TYPE, FieldValue::UInt16(entry_type.code()))
            .expect("field type matches");
        LedgerEntry { index, fields }
    }

    /// An account's root entry
    pub fn account_root(account: AccountId, balance: Amount, sequence: u32) -> Self {
        let mut entry = LedgerEntry::new(EntryType::AccountRoot, index::account_root(account));
        entry
            .fields
            .set(ACCOUNT, FieldValue::AccountId(account))
            .expect("field type matches");
        entry
            .fields
            .set(BALANCE, FieldValue::Amount(balance))
            .expect("field type matches");
        entry
            .fields
            .set(SEQUENCE, FieldValue::UInt32(sequence))
            .expect("field type matches");
        entry
            .fields
            .set(FLAGS, FieldValue::UInt32(0))
            .expect("field type matches");
        entry
    }

    /// A trust line between two accounts in a given currency
    pub fn trust_line(a: AccountId, b: AccountId, currency: Currency, flags: u32) -> Self {
        let mut entry =
            LedgerEntry::new(EntryType::RippleState, index::trust_line(a, b, currency));
        entry
            .fields
            .set(FLAGS, FieldValue::UInt32(flags))
            .expect("field type matches");
        entry
    }

    /// An offer placed by an account at a given sequence
    pub fn offer(
        account: AccountId,
        sequence: u32,
        taker_pays: Amount,
        taker_gets: Amount,
    ) -> Self {
        let mut entry = LedgerEntry::new(EntryType::Offer, index::offer(account, sequence));
        entry
            .fields
            .set(ACCOUNT, FieldValue::AccountId(account))
            .expect("field type matches");
        entry
            .fields
            .set(SEQUENCE, FieldValue::UInt32(sequence))
            .expect("field type matches");
        entry
            .fields
            .set(TAKER_PAYS, FieldValue::Amount(taker_pays))
            .expect("field type matches");
        entry
            .fields
            .set(TAKER_GETS, FieldValue::Amount(taker_gets))
            .expect("field type matches");
        entry
    }

    /// The entry's address in the state tree
    pub fn index(&self) -> Hash {
        self.index
    }

    pub fn entry_type(&self) -> Option<EntryType> {
        self.fields
            .u16(LEDGER_ENTRY_TYPE)
            .and_then(EntryType::from_code)
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FieldSet {
        &mut self.fields
    }

    /// Canonical payload bytes (the index is not included)
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.fields.to_bytes()
    }

    /// Decode an entry payload addressed by `index`
    pub fn from_bytes(index: Hash, bytes: &[u8]) -> Result<Self> {
        let fields = FieldSet::from_bytes(bytes)?;
        if fields.u16(LEDGER_ENTRY_TYPE).is_none() {
            return Err(Error::MalformedEncoding(
                "entry payload missing LedgerEntryType".to_string(),
            ));
        }
        Ok(LedgerEntry { index, fields })
    }
}

/// Ledger-space index derivation
///
/// An entry's index is SHA-512Half over a 2-byte space key and the fields
/// that identify it, so every peer derives the same address for the same
/// logical entry.
pub mod index {
    use super::*;

    const ACCOUNT_SPACE: [u8; 2] = *b"\0a";
    const RIPPLE_STATE_SPACE: [u8; 2] = *b"\0r";
    const OFFER_SPACE: [u8; 2] = *b"\0o";

    /// Index of an account's root entry
    pub fn account_root(account: AccountId) -> Hash {
        Hash::digest_many(&[&ACCOUNT_SPACE, account.as_bytes()])
    }

    /// Index of the trust line between two accounts
    ///
    /// Accounts sort low/high first so both ends derive the same index.
    pub fn trust_line(a: AccountId, b: AccountId, currency: Currency) -> Hash {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Hash::digest_many(&[
            &RIPPLE_STATE_SPACE,
            low.as_bytes(),
            high.as_bytes(),
            currency.as_bytes(),
        ])
    }

    /// Index of the offer an account placed at a given sequence
    pub fn offer(account: AccountId, sequence: u32) -> Hash {
        Hash::digest_many(&[&OFFER_SPACE, account.as_bytes(), &sequence.to_be_bytes()])
    }
}
