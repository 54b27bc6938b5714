//! Tuples: typed rows with a fixed binary layout.
//!
//! A [`Tuple`] pairs a shared [`TupleDescriptor`](crate::schema::TupleDescriptor)
//! with one value per field. Construction validates arity and types, so
//! a tuple that exists is always encodable into exactly
//! `descriptor.byte_size()` bytes.
//!
//! Tuples read out of a page additionally carry a
//! [`RecordId`](strata_common::types::RecordId) naming the page and slot
//! they came from.

mod error;
mod value;

pub use error::{TupleError, TupleResult};
pub use value::FieldValue;

use crate::schema::DescriptorRef;
use std::fmt;
use strata_common::types::RecordId;

/// One row of a table.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use strata_storage::schema::{FieldDef, FieldType, TupleDescriptor};
/// use strata_storage::tuple::{FieldValue, Tuple};
///
/// let descriptor = Arc::new(TupleDescriptor::new(vec![
///     FieldDef::named(FieldType::Int, "id"),
///     FieldDef::named(FieldType::Text, "name"),
/// ]).unwrap());
///
/// let tuple = Tuple::new(
///     Arc::clone(&descriptor),
///     vec![FieldValue::int(1), FieldValue::text("ada")],
/// ).unwrap();
///
/// assert_eq!(tuple.to_string(), "(1, ada)");
/// assert!(tuple.record_id().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tuple {
    descriptor: DescriptorRef,
    values: Vec<FieldValue>,
    record_id: Option<RecordId>,
}

impl Tuple {
    /// Creates a tuple from a descriptor and one value per field.
    ///
    /// # Errors
    ///
    /// Returns [`TupleError::WrongArity`] if the value count differs
    /// from the field count, or [`TupleError::TypeMismatch`] if any
    /// value's type differs from its field's declared type.
    pub fn new(descriptor: DescriptorRef, values: Vec<FieldValue>) -> TupleResult<Self> {
        if values.len() != descriptor.num_fields() {
            return Err(TupleError::WrongArity {
                expected: descriptor.num_fields(),
                actual: values.len(),
            });
        }
        for (index, (value, field)) in values.iter().zip(descriptor.fields()).enumerate() {
            if value.field_type() != field.field_type() {
                return Err(TupleError::TypeMismatch {
                    index,
                    expected: field.field_type(),
                    actual: value.field_type(),
                });
            }
        }
        Ok(Self {
            descriptor,
            values,
            record_id: None,
        })
    }

    /// Returns the tuple's descriptor.
    #[inline]
    #[must_use]
    pub fn descriptor(&self) -> &DescriptorRef {
        &self.descriptor
    }

    /// Returns the value of field `index`.
    ///
    /// # Errors
    ///
    /// Returns [`TupleError::IndexOutOfRange`] if `index` is past the
    /// last field.
    pub fn value(&self, index: usize) -> TupleResult<&FieldValue> {
        self.values.get(index).ok_or(TupleError::IndexOutOfRange {
            index,
            num_fields: self.values.len(),
        })
    }

    /// Replaces the value of field `index`.
    ///
    /// # Errors
    ///
    /// Returns [`TupleError::IndexOutOfRange`] if `index` is past the
    /// last field, or [`TupleError::TypeMismatch`] if the new value's
    /// type differs from the field's declared type.
    pub fn set_value(&mut self, index: usize, value: FieldValue) -> TupleResult<()> {
        let slot = self.values.get_mut(index).ok_or(TupleError::IndexOutOfRange {
            index,
            num_fields: self.descriptor.num_fields(),
        })?;
        if value.field_type() != slot.field_type() {
            return Err(TupleError::TypeMismatch {
                index,
                expected: slot.field_type(),
                actual: value.field_type(),
            });
        }
        *slot = value;
        Ok(())
    }

    /// Returns an iterator over the values in field order.
    pub fn values(&self) -> impl Iterator<Item = &FieldValue> {
        self.values.iter()
    }

    /// Returns where this tuple is stored, if it came from a page.
    #[inline]
    #[must_use]
    pub const fn record_id(&self) -> Option<RecordId> {
        self.record_id
    }

    /// Sets or clears the tuple's storage address.
    #[inline]
    pub fn set_record_id(&mut self, record_id: Option<RecordId>) {
        self.record_id = record_id;
    }

    /// Encodes this tuple into `buf`, which must be exactly
    /// `descriptor.byte_size()` bytes.
    pub(crate) fn encode_into(&self, buf: &mut [u8]) {
        debug_assert_eq!(buf.len(), self.descriptor.byte_size());
        let mut offset = 0;
        for value in &self.values {
            let width = value.field_type().encoded_len();
            value.encode_into(&mut buf[offset..offset + width]);
            offset += width;
        }
    }

    /// Decodes a tuple from `buf`, which must be exactly
    /// `descriptor.byte_size()` bytes. The record ID is left unset; the
    /// page that owns the bytes fills it in.
    pub(crate) fn decode(descriptor: DescriptorRef, buf: &[u8]) -> TupleResult<Self> {
        debug_assert_eq!(buf.len(), descriptor.byte_size());
        let mut values = Vec::with_capacity(descriptor.num_fields());
        let mut offset = 0;
        for field in descriptor.fields() {
            let width = field.field_type().encoded_len();
            values.push(FieldValue::decode(
                field.field_type(),
                &buf[offset..offset + width],
            )?);
            offset += width;
        }
        Ok(Self {
            descriptor,
            values,
            record_id: None,
        })
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldDef, FieldType, TupleDescriptor};
    use std::sync::Arc;

    fn person_descriptor() -> DescriptorRef {
        Arc::new(
            TupleDescriptor::new(vec![
                FieldDef::named(FieldType::Int, "id"),
                FieldDef::named(FieldType::Text, "name"),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_new_checks_arity() {
        let err = Tuple::new(person_descriptor(), vec![FieldValue::int(1)]).unwrap_err();
        assert_eq!(
            err,
            TupleError::WrongArity {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_new_checks_types() {
        let err = Tuple::new(
            person_descriptor(),
            vec![FieldValue::text("oops"), FieldValue::text("ada")],
        )
        .unwrap_err();
        assert_eq!(
            err,
            TupleError::TypeMismatch {
                index: 0,
                expected: FieldType::Int,
                actual: FieldType::Text
            }
        );
    }

    #[test]
    fn test_value_access() {
        let tuple = Tuple::new(
            person_descriptor(),
            vec![FieldValue::int(7), FieldValue::text("ada")],
        )
        .unwrap();

        assert_eq!(tuple.value(0).unwrap(), &FieldValue::int(7));
        assert_eq!(tuple.value(1).unwrap(), &FieldValue::text("ada"));
        assert!(matches!(
            tuple.value(2).unwrap_err(),
            TupleError::IndexOutOfRange { index: 2, .. }
        ));
    }

    #[test]
    fn test_set_value() {
        let mut tuple = Tuple::new(
            person_descriptor(),
            vec![FieldValue::int(7), FieldValue::text("ada")],
        )
        .unwrap();

        tuple.set_value(0, FieldValue::int(8)).unwrap();
        assert_eq!(tuple.value(0).unwrap(), &FieldValue::int(8));

        let err = tuple.set_value(0, FieldValue::text("nope")).unwrap_err();
        assert!(matches!(err, TupleError::TypeMismatch { index: 0, .. }));

        let err = tuple.set_value(9, FieldValue::int(0)).unwrap_err();
        assert!(matches!(err, TupleError::IndexOutOfRange { index: 9, .. }));
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let descriptor = person_descriptor();
        let tuple = Tuple::new(
            Arc::clone(&descriptor),
            vec![FieldValue::int(-12), FieldValue::text("grace")],
        )
        .unwrap();

        let mut buf = vec![0u8; descriptor.byte_size()];
        tuple.encode_into(&mut buf);
        let decoded = Tuple::decode(descriptor, &buf).unwrap();

        assert_eq!(decoded, tuple);
        assert!(decoded.record_id().is_none());
    }

    #[test]
    fn test_display() {
        let tuple = Tuple::new(
            person_descriptor(),
            vec![FieldValue::int(1), FieldValue::text("ada")],
        )
        .unwrap();
        assert_eq!(tuple.to_string(), "(1, ada)");
    }
}
