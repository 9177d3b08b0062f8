//! Field identifiers, wire headers, and the canonical field ordering

use crate::codec::reader::Reader;
use crate::{Error, Result};
use bytes::BufMut;
use std::cmp::Ordering;
use std::fmt;

/// Wire type of a field value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldType {
    UInt16,
    UInt32,
    UInt64,
    Hash256,
    Amount,
    Blob,
    AccountId,
    UInt8,
}

impl FieldType {
    /// The protocol's numeric type code
    pub fn code(self) -> u8 {
        match self {
            FieldType::UInt16 => 1,
            FieldType::UInt32 => 2,
            FieldType::UInt64 => 3,
            FieldType::Hash256 => 5,
            FieldType::Amount => 6,
            FieldType::Blob => 7,
            FieldType::AccountId => 8,
            FieldType::UInt8 => 16,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(FieldType::UInt16),
            2 => Some(FieldType::UInt32),
            3 => Some(FieldType::UInt64),
            5 => Some(FieldType::Hash256),
            6 => Some(FieldType::Amount),
            7 => Some(FieldType::Blob),
            8 => Some(FieldType::AccountId),
            16 => Some(FieldType::UInt8),
            _ => None,
        }
    }
}

/// Identifies a field: a wire type plus a field code within that type
///
/// Fields order by (type code, field code). That ordering is the canonical
/// emission order for every encoded object.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId {
    field_type: FieldType,
    code: u8,
}

impl FieldId {
    pub const fn new(field_type: FieldType, code: u8) -> Self {
        FieldId { field_type, code }
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn code(&self) -> u8 {
        self.code
    }

    /// Write the 1-3 byte field header
    ///
    /// Type and field codes below 16 pack into a single byte's nibbles;
    /// larger codes move to extension bytes.
    pub(crate) fn write_header(&self, out: &mut impl BufMut) {
        let t = self.field_type.code();
        let f = self.code;
        match (t < 16, f < 16) {
            (true, true) => out.put_u8((t << 4) | f),
            (true, false) => {
                out.put_u8(t << 4);
                out.put_u8(f);
            }
            (false, true) => {
                out.put_u8(f);
                out.put_u8(t);
            }
            (false, false) => {
                out.put_u8(0);
                out.put_u8(t);
                out.put_u8(f);
            }
        }
    }

    /// Read a field header written by [`FieldId::write_header`]
    pub(crate) fn read_header(reader: &mut Reader) -> Result<Self> {
        let first = reader.u8()?;
        let type_nibble = first >> 4;
        let field_nibble = first & 0x0f;

        let type_code = if type_nibble == 0 {
            let code = reader.u8()?;
            if code < 16 {
                return Err(Error::MalformedEncoding(format!(
                    "non-canonical extended type code {}",
                    code
                )));
            }
            code
        } else {
            type_nibble
        };

        let field_code = if field_nibble == 0 {
            let code = reader.u8()?;
            if code < 16 {
                return Err(Error::MalformedEncoding(format!(
                    "non-canonical extended field code {}",
                    code
                )));
            }
            code
        } else {
            field_nibble
        };

        let field_type = FieldType::from_code(type_code)
            .ok_or_else(|| Error::UnsupportedType(format!("field type code {}", type_code)))?;

        Ok(FieldId::new(field_type, field_code))
    }
}

impl Ord for FieldId {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.field_type.code(), self.code).cmp(&(other.field_type.code(), other.code))
    }
}

impl PartialOrd for FieldId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match fields::name(*self) {
            Some(name) => write!(f, "FieldId({})", name),
            None => write!(f, "FieldId({:?}/{})", self.field_type, self.code),
        }
    }
}

/// The protocol field dictionary (the subset this crate models)
pub mod fields {
    use super::{FieldId, FieldType};

    pub const CLOSE_RESOLUTION: FieldId = FieldId::new(FieldType::UInt8, 1);
    pub const TRANSACTION_RESULT: FieldId = FieldId::new(FieldType::UInt8, 3);

    pub const LEDGER_ENTRY_TYPE: FieldId = FieldId::new(FieldType::UInt16, 1);
    pub const TRANSACTION_TYPE: FieldId = FieldId::new(FieldType::UInt16, 2);

    pub const FLAGS: FieldId = FieldId::new(FieldType::UInt32, 2);
    pub const SEQUENCE: FieldId = FieldId::new(FieldType::UInt32, 4);
    pub const PREVIOUS_TXN_LGR_SEQ: FieldId = FieldId::new(FieldType::UInt32, 5);
    pub const LEDGER_SEQUENCE: FieldId = FieldId::new(FieldType::UInt32, 6);
    pub const CLOSE_TIME: FieldId = FieldId::new(FieldType::UInt32, 7);
    pub const PARENT_CLOSE_TIME: FieldId = FieldId::new(FieldType::UInt32, 8);
    pub const EXPIRATION: FieldId = FieldId::new(FieldType::UInt32, 10);
    pub const DESTINATION_TAG: FieldId = FieldId::new(FieldType::UInt32, 14);
    pub const QUALITY_IN: FieldId = FieldId::new(FieldType::UInt32, 20);
    pub const QUALITY_OUT: FieldId = FieldId::new(FieldType::UInt32, 21);
    pub const TRANSACTION_INDEX: FieldId = FieldId::new(FieldType::UInt32, 28);

    pub const OWNER_NODE: FieldId = FieldId::new(FieldType::UInt64, 4);

    pub const PREVIOUS_TXN_ID: FieldId = FieldId::new(FieldType::Hash256, 5);
    pub const BOOK_DIRECTORY: FieldId = FieldId::new(FieldType::Hash256, 16);

    pub const AMOUNT: FieldId = FieldId::new(FieldType::Amount, 1);
    pub const BALANCE: FieldId = FieldId::new(FieldType::Amount, 2);
    pub const LIMIT_AMOUNT: FieldId = FieldId::new(FieldType::Amount, 3);
    pub const TAKER_PAYS: FieldId = FieldId::new(FieldType::Amount, 4);
    pub const TAKER_GETS: FieldId = FieldId::new(FieldType::Amount, 5);
    pub const FEE: FieldId = FieldId::new(FieldType::Amount, 8);

    pub const SIGNING_PUB_KEY: FieldId = FieldId::new(FieldType::Blob, 3);
    pub const TXN_SIGNATURE: FieldId = FieldId::new(FieldType::Blob, 4);

    pub const ACCOUNT: FieldId = FieldId::new(FieldType::AccountId, 1);
    pub const OWNER: FieldId = FieldId::new(FieldType::AccountId, 2);
    pub const DESTINATION: FieldId = FieldId::new(FieldType::AccountId, 3);
    pub const ISSUER: FieldId = FieldId::new(FieldType::AccountId, 4);

    const NAMES: &[(FieldId, &str)] = &[
        (CLOSE_RESOLUTION, "CloseResolution"),
        (TRANSACTION_RESULT, "TransactionResult"),
        (LEDGER_ENTRY_TYPE, "LedgerEntryType"),
        (TRANSACTION_TYPE, "TransactionType"),
        (FLAGS, "Flags"),
        (SEQUENCE, "Sequence"),
        (PREVIOUS_TXN_LGR_SEQ, "PreviousTxnLgrSeq"),
        (LEDGER_SEQUENCE, "LedgerSequence"),
        (CLOSE_TIME, "CloseTime"),
        (PARENT_CLOSE_TIME, "ParentCloseTime"),
        (EXPIRATION, "Expiration"),
        (DESTINATION_TAG, "DestinationTag"),
        (QUALITY_IN, "QualityIn"),
        (QUALITY_OUT, "QualityOut"),
        (TRANSACTION_INDEX, "TransactionIndex"),
        (OWNER_NODE, "OwnerNode"),
        (PREVIOUS_TXN_ID, "PreviousTxnID"),
        (BOOK_DIRECTORY, "BookDirectory"),
        (AMOUNT, "Amount"),
        (BALANCE, "Balance"),
        (LIMIT_AMOUNT, "LimitAmount"),
        (TAKER_PAYS, "TakerPays"),
        (TAKER_GETS, "TakerGets"),
        (FEE, "Fee"),
        (SIGNING_PUB_KEY, "SigningPubKey"),
        (TXN_SIGNATURE, "TxnSignature"),
        (ACCOUNT, "Account"),
        (OWNER, "Owner"),
        (DESTINATION, "Destination"),
        (ISSUER, "Issuer"),
    ];

    /// JSON name of a known field
    pub fn name(field: FieldId) -> Option<&'static str> {
        NAMES.iter().find(|(f, _)| *f == field).map(|(_, n)| *n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(field: FieldId) -> (FieldId, usize) {
        let mut out = Vec::new();
        field.write_header(&mut out);
        let len = out.len();
        let mut reader = Reader::new(&out);
        (FieldId::read_header(&mut reader).unwrap(), len)
    }

    #[test]
    fn test_packed_header() {
        let (decoded, len) = roundtrip(fields::TRANSACTION_TYPE);
        assert_eq!(decoded, fields::TRANSACTION_TYPE);
        assert_eq!(len, 1);
    }

    #[test]
    fn test_extended_field_code() {
        let (decoded, len) = roundtrip(fields::TRANSACTION_INDEX);
        assert_eq!(decoded, fields::TRANSACTION_INDEX);
        assert_eq!(len, 2);
    }

    #[test]
    fn test_extended_type_code() {
        let (decoded, len) = roundtrip(fields::CLOSE_RESOLUTION);
        assert_eq!(decoded, fields::CLOSE_RESOLUTION);
        assert_eq!(len, 2);
    }

    #[test]
    fn test_extended_type_and_field_codes() {
        let field = FieldId::new(FieldType::UInt8, 200);
        let (decoded, len) = roundtrip(field);
        assert_eq!(decoded, field);
        assert_eq!(len, 3);
    }

    #[test]
    fn test_ordering_follows_type_then_field() {
        assert!(fields::LEDGER_ENTRY_TYPE < fields::TRANSACTION_TYPE);
        assert!(fields::TRANSACTION_TYPE < fields::FLAGS);
        assert!(fields::ACCOUNT < fields::CLOSE_RESOLUTION);
    }

    #[test]
    fn test_non_canonical_extension_rejected() {
        // extended field byte below 16 must use the packed form
        let mut reader = Reader::new(&[0x20, 0x05]);
        assert!(matches!(
            FieldId::read_header(&mut reader),
            Err(Error::MalformedEncoding(_))
        ));
    }

    #[test]
    fn test_unknown_type_code_unsupported() {
        // type code 4 is not registered
        let mut reader = Reader::new(&[0x45]);
        assert!(matches!(
            FieldId::read_header(&mut reader),
            Err(Error::UnsupportedType(_))
        ));
    }
}
