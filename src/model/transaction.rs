//! Transactions and their execution metadata

use super::{AccountId, Amount, Hash, HashPrefix};
use crate::codec::fields::{
    ACCOUNT, AMOUNT, DESTINATION, FEE, SEQUENCE, SIGNING_PUB_KEY, TRANSACTION_INDEX,
    TRANSACTION_RESULT, TRANSACTION_TYPE, TXN_SIGNATURE,
};
use crate::codec::{FieldSet, FieldValue};
use crate::{Error, Result};
use serde::Serialize;

/// Transaction type codes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum TransactionType {
    Payment = 0,
    AccountSet = 3,
    OfferCreate = 7,
    TrustSet = 20,
}

impl TransactionType {
    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            0 => Some(TransactionType::Payment),
            3 => Some(TransactionType::AccountSet),
            7 => Some(TransactionType::OfferCreate),
            20 => Some(TransactionType::TrustSet),
            _ => None,
        }
    }
}

/// A protocol transaction
///
/// A thin wrapper over the canonical field set; the typed constructors set
/// the fields every transaction carries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Transaction {
    fields: FieldSet,
}

impl Transaction {
    pub fn new(
        tx_type: TransactionType,
        account: AccountId,
        sequence: u32,
        fee: Amount,
    ) -> Self {
        let mut fields = FieldSet::new();
        fields
            .set(TRANSACTION_TYPE, FieldValue::UInt16(tx_type.code()))
            .expect("field type matches");
        fields
            .set(ACCOUNT, FieldValue::AccountId(account))
            .expect("field type matches");
        fields
            .set(SEQUENCE, FieldValue::UInt32(sequence))
            .expect("field type matches");
        fields
            .set(FEE, FieldValue::Amount(fee))
            .expect("field type matches");
        Transaction { fields }
    }

    /// A payment of `amount` from `account` to `destination`
    pub fn payment(
        account: AccountId,
        destination: AccountId,
        amount: Amount,
        sequence: u32,
        fee: Amount,
    ) -> Self {
        let mut tx = Transaction::new(TransactionType::Payment, account, sequence, fee);
        tx.fields
            .set(AMOUNT, FieldValue::Amount(amount))
            .expect("field type matches");
        tx.fields
            .set(DESTINATION, FieldValue::AccountId(destination))
            .expect("field type matches");
        tx
    }

    /// Attach the signing public key and signature blobs
    pub fn with_signature(mut self, public_key: Vec<u8>, signature: Vec<u8>) -> Self {
        self.fields
            .set(SIGNING_PUB_KEY, FieldValue::Blob(public_key))
            .expect("field type matches");
        self.fields
            .set(TXN_SIGNATURE, FieldValue::Blob(signature))
            .expect("field type matches");
        self
    }

    pub fn transaction_type(&self) -> Option<TransactionType> {
        self.fields
            .u16(TRANSACTION_TYPE)
            .and_then(TransactionType::from_code)
    }

    pub fn account(&self) -> Option<AccountId> {
        self.fields.account(ACCOUNT)
    }

    pub fn sequence(&self) -> Option<u32> {
        self.fields.u32(SEQUENCE)
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FieldSet {
        &mut self.fields
    }

    /// Hash of the signing pre-image: every field except the signature
    pub fn signing_hash(&self) -> Result<Hash> {
        let mut unsigned = self.fields.clone();
        unsigned.remove(TXN_SIGNATURE);
        Ok(Hash::prefixed(
            HashPrefix::TransactionSign,
            &[&unsigned.to_bytes()?],
        ))
    }

    /// The transaction identifier: hash over the full signed payload
    pub fn id(&self) -> Result<Hash> {
        Ok(Hash::prefixed(HashPrefix::TransactionId, &[&self.to_bytes()?]))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.fields.to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let fields = FieldSet::from_bytes(bytes)?;
        if fields.u16(TRANSACTION_TYPE).is_none() {
            return Err(Error::MalformedEncoding(
                "transaction payload missing TransactionType".to_string(),
            ));
        }
        Ok(Transaction { fields })
    }
}

/// Execution metadata recorded when a transaction is applied to a ledger
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransactionMeta {
    fields: FieldSet,
}

impl TransactionMeta {
    /// Result code of a cleanly applied transaction
    pub const APPLIED: u8 = 0;

    pub fn new(transaction_index: u32, result: u8) -> Self {
        let mut fields = FieldSet::new();
        fields
            .set(TRANSACTION_INDEX, FieldValue::UInt32(transaction_index))
            .expect("field type matches");
        fields
            .set(TRANSACTION_RESULT, FieldValue::UInt8(result))
            .expect("field type matches");
        TransactionMeta { fields }
    }

    /// Position of the transaction within its ledger version
    pub fn transaction_index(&self) -> Option<u32> {
        self.fields.u32(TRANSACTION_INDEX)
    }

    pub fn result(&self) -> Option<u8> {
        self.fields.u8(TRANSACTION_RESULT)
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FieldSet {
        &mut self.fields
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.fields.to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let fields = FieldSet::from_bytes(bytes)?;
        if fields.u8(TRANSACTION_RESULT).is_none() {
            return Err(Error::MalformedEncoding(
                "metadata payload missing TransactionResult".to_string(),
            ));
        }
        Ok(TransactionMeta { fields })
    }
}
