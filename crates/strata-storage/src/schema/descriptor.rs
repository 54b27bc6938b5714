//! Tuple descriptors: ordered, fixed-width field layouts.

use crate::schema::{SchemaError, SchemaResult};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use strata_common::constants::{INT_FIELD_BYTES, TEXT_FIELD_ENCODED_BYTES};

/// Shared handle to an immutable tuple descriptor.
pub type DescriptorRef = Arc<TupleDescriptor>;

/// The type of one tuple field.
///
/// Every type encodes to a fixed number of bytes, which is what lets a
/// heap page hold tuples in fixed-size slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// 32-bit signed integer, 4 bytes.
    Int,
    /// Variable-length string up to 128 bytes of content, stored in a
    /// fixed 132-byte region (4-byte length prefix plus padded content).
    Text,
}

impl FieldType {
    /// Returns the encoded width of a field of this type in bytes.
    #[inline]
    #[must_use]
    pub const fn encoded_len(self) -> usize {
        match self {
            Self::Int => INT_FIELD_BYTES,
            Self::Text => TEXT_FIELD_ENCODED_BYTES,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => write!(f, "INT"),
            Self::Text => write!(f, "TEXT"),
        }
    }
}

/// One field of a tuple descriptor: a type and an optional name.
///
/// Names exist for query-facing lookups only; they never affect layout,
/// equality, or hashing of descriptors.
#[derive(Debug, Clone)]
pub struct FieldDef {
    field_type: FieldType,
    name: Option<String>,
}

impl FieldDef {
    /// Creates a named field.
    #[must_use]
    pub fn named(field_type: FieldType, name: impl Into<String>) -> Self {
        Self {
            field_type,
            name: Some(name.into()),
        }
    }

    /// Creates an unnamed field.
    #[must_use]
    pub const fn anonymous(field_type: FieldType) -> Self {
        Self {
            field_type,
            name: None,
        }
    }

    /// Returns the field's type.
    #[inline]
    #[must_use]
    pub const fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Returns the field's name, if it has one.
    #[inline]
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl fmt::Display for FieldDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}({})", self.field_type, name),
            None => write!(f, "{}", self.field_type),
        }
    }
}

/// Describes the layout of a tuple: an ordered list of fields.
///
/// Two descriptors are equal exactly when their field type sequences
/// are equal; names are ignored, so an anonymous projection of a table
/// still matches the table's own descriptor. Hashing follows the same
/// rule, so descriptors are safe to use as map keys.
///
/// # Example
///
/// ```rust
/// use strata_storage::schema::{FieldDef, FieldType, TupleDescriptor};
///
/// let descriptor = TupleDescriptor::new(vec![
///     FieldDef::named(FieldType::Int, "id"),
///     FieldDef::named(FieldType::Text, "name"),
/// ]).unwrap();
///
/// assert_eq!(descriptor.num_fields(), 2);
/// assert_eq!(descriptor.byte_size(), 136);
/// assert_eq!(descriptor.index_for_name("name").unwrap(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct TupleDescriptor {
    fields: Vec<FieldDef>,
}

impl TupleDescriptor {
    /// Creates a descriptor from a list of fields.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Empty`] if `fields` is empty.
    pub fn new(fields: Vec<FieldDef>) -> SchemaResult<Self> {
        if fields.is_empty() {
            return Err(SchemaError::Empty);
        }
        Ok(Self { fields })
    }

    /// Creates a descriptor of anonymous fields from a list of types.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Empty`] if `types` is empty.
    pub fn from_types(types: &[FieldType]) -> SchemaResult<Self> {
        Self::new(types.iter().copied().map(FieldDef::anonymous).collect())
    }

    /// Concatenates two descriptors: all fields of `left` followed by
    /// all fields of `right`, names preserved.
    #[must_use]
    pub fn merge(left: &Self, right: &Self) -> Self {
        let mut fields = Vec::with_capacity(left.fields.len() + right.fields.len());
        fields.extend(left.fields.iter().cloned());
        fields.extend(right.fields.iter().cloned());
        Self { fields }
    }

    /// Returns the number of fields.
    #[inline]
    #[must_use]
    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }

    /// Returns the type of field `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::IndexOutOfRange`] if `index` is past the
    /// last field.
    pub fn field_type(&self, index: usize) -> SchemaResult<FieldType> {
        self.field(index).map(FieldDef::field_type)
    }

    /// Returns the name of field `index`, if it has one.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::IndexOutOfRange`] if `index` is past the
    /// last field.
    pub fn field_name(&self, index: usize) -> SchemaResult<Option<&str>> {
        self.field(index).map(FieldDef::name)
    }

    /// Returns the index of the first field named `name`.
    ///
    /// Duplicate names are allowed; the earliest match wins.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::FieldNotFound`] if no field carries the
    /// name. Anonymous fields never match.
    pub fn index_for_name(&self, name: &str) -> SchemaResult<usize> {
        self.fields
            .iter()
            .position(|f| f.name() == Some(name))
            .ok_or_else(|| SchemaError::field_not_found(name))
    }

    /// Returns the total encoded size of one tuple in bytes.
    #[must_use]
    pub fn byte_size(&self) -> usize {
        self.fields.iter().map(|f| f.field_type().encoded_len()).sum()
    }

    /// Returns an iterator over the fields in order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter()
    }

    fn field(&self, index: usize) -> SchemaResult<&FieldDef> {
        self.fields
            .get(index)
            .ok_or(SchemaError::index_out_of_range(index, self.fields.len()))
    }
}

impl PartialEq for TupleDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(other.fields.iter())
                .all(|(a, b)| a.field_type() == b.field_type())
    }
}

impl Eq for TupleDescriptor {}

impl Hash for TupleDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.fields.len());
        for field in &self.fields {
            field.field_type().hash(state);
        }
    }
}

impl fmt::Display for TupleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{field}")?;
        }
        Ok(())
    }
}
