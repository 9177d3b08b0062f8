//! Canonical field sets: the object form every hashable payload encodes through

use crate::codec::field::{fields, FieldId};
use crate::codec::reader::Reader;
use crate::codec::value::FieldValue;
use crate::model::{AccountId, Amount, Hash};
use crate::{Error, Result};
use bytes::BufMut;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

/// An ordered set of typed fields
///
/// Fields encode in (type code, field code) order no matter the order they
/// were set, so two logically equal objects always produce identical bytes.
/// The same bytes feed the wire, the hash, and defensive deep copies.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldSet {
    fields: BTreeMap<FieldId, FieldValue>,
}

impl FieldSet {
    pub fn new() -> Self {
        FieldSet {
            fields: BTreeMap::new(),
        }
    }

    /// Set a field, replacing any existing value
    ///
    /// The value's wire type must match the field's registered type.
    pub fn set(&mut self, field: FieldId, value: FieldValue) -> Result<()> {
        if value.field_type() != field.field_type() {
            return Err(Error::UnsupportedType(format!(
                "{:?} cannot hold a {:?} value",
                field,
                value.field_type()
            )));
        }
        self.fields.insert(field, value);
        Ok(())
    }

    pub fn get(&self, field: FieldId) -> Option<&FieldValue> {
        self.fields.get(&field)
    }

    /// Remove a field, returning its previous value
    pub fn remove(&mut self, field: FieldId) -> Option<FieldValue> {
        self.fields.remove(&field)
    }

    pub fn contains(&self, field: FieldId) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, &FieldValue)> {
        self.fields.iter()
    }

    pub fn u8(&self, field: FieldId) -> Option<u8> {
        match self.get(field) {
            Some(FieldValue::UInt8(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn u16(&self, field: FieldId) -> Option<u16> {
        match self.get(field) {
            Some(FieldValue::UInt16(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn u32(&self, field: FieldId) -> Option<u32> {
        match self.get(field) {
            Some(FieldValue::UInt32(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn u64(&self, field: FieldId) -> Option<u64> {
        match self.get(field) {
            Some(FieldValue::UInt64(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn hash(&self, field: FieldId) -> Option<Hash> {
        match self.get(field) {
            Some(FieldValue::Hash256(h)) => Some(*h),
            _ => None,
        }
    }

    pub fn amount(&self, field: FieldId) -> Option<Amount> {
        match self.get(field) {
            Some(FieldValue::Amount(a)) => Some(*a),
            _ => None,
        }
    }

    pub fn blob(&self, field: FieldId) -> Option<&[u8]> {
        match self.get(field) {
            Some(FieldValue::Blob(b)) => Some(b),
            _ => None,
        }
    }

    pub fn account(&self, field: FieldId) -> Option<AccountId> {
        match self.get(field) {
            Some(FieldValue::AccountId(a)) => Some(*a),
            _ => None,
        }
    }

    /// Encode every field in canonical order into `out`
    pub fn write(&self, out: &mut impl BufMut) -> Result<()> {
        for (field, value) in &self.fields {
            field.write_header(out);
            value.write(out)?;
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write(&mut out)?;
        Ok(out)
    }

    /// Decode canonical bytes produced by [`FieldSet::write`]
    ///
    /// Rejects out-of-order and duplicate fields, so every field set has
    /// exactly one byte representation.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(bytes);
        let mut fields = BTreeMap::new();
        let mut previous: Option<FieldId> = None;
        while !reader.is_empty() {
            let field = FieldId::read_header(&mut reader)?;
            if let Some(prev) = previous {
                if field <= prev {
                    return Err(Error::MalformedEncoding(format!(
                        "{:?} out of canonical order after {:?}",
                        field, prev
                    )));
                }
            }
            let value = FieldValue::read(field.field_type(), &mut reader)?;
            fields.insert(field, value);
            previous = Some(field);
        }
        Ok(FieldSet { fields })
    }
}

impl Serialize for FieldSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, value) in &self.fields {
            let key = match fields::name(*field) {
                Some(name) => name.to_string(),
                None => format!("Field{}_{}", field.field_type().code(), field.code()),
            };
            match value {
                FieldValue::UInt8(v) => map.serialize_entry(&key, v)?,
                FieldValue::UInt16(v) => map.serialize_entry(&key, v)?,
                FieldValue::UInt32(v) => map.serialize_entry(&key, v)?,
                FieldValue::UInt64(v) => map.serialize_entry(&key, v)?,
                FieldValue::Hash256(h) => map.serialize_entry(&key, h)?,
                FieldValue::Amount(a) => map.serialize_entry(&key, &a.drops())?,
                FieldValue::Blob(b) => map.serialize_entry(&key, &hex::encode(b))?,
                FieldValue::AccountId(a) => map.serialize_entry(&key, a)?,
            }
        }
        map.end()
    }
}
