//! Field values and their fixed-width binary encoding.
//!
//! Every value encodes to exactly `FieldType::encoded_len()` bytes,
//! little-endian:
//!
//! ```text
//! INT     i32, 4 bytes LE
//! TEXT    u32 content length LE, then content, zero-padded to 128 bytes
//! ```

use crate::schema::FieldType;
use crate::tuple::{TupleError, TupleResult};
use std::fmt;
use strata_common::constants::{TEXT_FIELD_BYTES, TEXT_LENGTH_PREFIX_BYTES};

/// One field value of a tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    /// 32-bit signed integer.
    Int(i32),
    /// String of at most [`TEXT_FIELD_BYTES`] bytes of UTF-8 content.
    Text(String),
}

impl FieldValue {
    /// Creates an integer value.
    #[inline]
    #[must_use]
    pub const fn int(value: i32) -> Self {
        Self::Int(value)
    }

    /// Creates a text value, truncating content beyond
    /// [`TEXT_FIELD_BYTES`] bytes at the nearest character boundary.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        let mut content = value.into();
        if content.len() > TEXT_FIELD_BYTES {
            let mut end = TEXT_FIELD_BYTES;
            while !content.is_char_boundary(end) {
                end -= 1;
            }
            content.truncate(end);
        }
        Self::Text(content)
    }

    /// Returns the type of this value.
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Int(_) => FieldType::Int,
            Self::Text(_) => FieldType::Text,
        }
    }

    /// Encodes this value into `buf`, which must be exactly
    /// `self.field_type().encoded_len()` bytes. Unused text bytes are
    /// zeroed so encoding is deterministic.
    pub(crate) fn encode_into(&self, buf: &mut [u8]) {
        debug_assert_eq!(buf.len(), self.field_type().encoded_len());
        match self {
            Self::Int(value) => buf.copy_from_slice(&value.to_le_bytes()),
            Self::Text(content) => {
                let bytes = content.as_bytes();
                let (prefix, body) = buf.split_at_mut(TEXT_LENGTH_PREFIX_BYTES);
                prefix.copy_from_slice(&(bytes.len() as u32).to_le_bytes());
                body[..bytes.len()].copy_from_slice(bytes);
                body[bytes.len()..].fill(0);
            }
        }
    }

    /// Decodes a value of type `field_type` from `buf`, which must be
    /// exactly `field_type.encoded_len()` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`TupleError::InvalidEncoding`] if the bytes do not form
    /// a valid value: a text length prefix past the content region, or
    /// content that is not UTF-8.
    pub(crate) fn decode(field_type: FieldType, buf: &[u8]) -> TupleResult<Self> {
        debug_assert_eq!(buf.len(), field_type.encoded_len());
        match field_type {
            FieldType::Int => {
                let bytes: [u8; 4] = buf
                    .try_into()
                    .map_err(|_| TupleError::invalid_encoding(field_type, "short buffer"))?;
                Ok(Self::Int(i32::from_le_bytes(bytes)))
            }
            FieldType::Text => {
                let (prefix, body) = buf.split_at(TEXT_LENGTH_PREFIX_BYTES);
                let prefix: [u8; 4] = prefix
                    .try_into()
                    .map_err(|_| TupleError::invalid_encoding(field_type, "short buffer"))?;
                let len = u32::from_le_bytes(prefix) as usize;
                if len > TEXT_FIELD_BYTES {
                    return Err(TupleError::invalid_encoding(
                        field_type,
                        format!("length prefix {len} exceeds {TEXT_FIELD_BYTES}"),
                    ));
                }
                let content = String::from_utf8(body[..len].to_vec())
                    .map_err(|_| TupleError::invalid_encoding(field_type, "content is not UTF-8"))?;
                Ok(Self::Text(content))
            }
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(content) => write!(f, "{content}"),
        }
    }
}

impl From<i32> for FieldValue {
    #[inline]
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for FieldValue {
    #[inline]
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(value: &FieldValue) -> FieldValue {
        let mut buf = vec![0u8; value.field_type().encoded_len()];
        value.encode_into(&mut buf);
        FieldValue::decode(value.field_type(), &buf).unwrap()
    }

    #[test]
    fn test_int_round_trip() {
        for raw in [0, 1, -1, i32::MIN, i32::MAX, 42] {
            let value = FieldValue::int(raw);
            assert_eq!(round_trip(&value), value);
        }
    }

    #[test]
    fn test_int_is_little_endian() {
        let mut buf = [0u8; 4];
        FieldValue::int(0x0102_0304).encode_into(&mut buf);
        assert_eq!(buf, [0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_text_round_trip() {
        for raw in ["", "a", "hello world", "ünïcödé"] {
            let value = FieldValue::text(raw);
            assert_eq!(round_trip(&value), FieldValue::Text(raw.to_string()));
        }
    }

    #[test]
    fn test_text_encoding_layout() {
        let mut buf = [0xffu8; 132];
        FieldValue::text("ab").encode_into(&mut buf);
        assert_eq!(&buf[..4], &2u32.to_le_bytes());
        assert_eq!(&buf[4..6], b"ab");
        // Padding beyond the content is zeroed, not left stale.
        assert!(buf[6..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_text_truncates_long_content() {
        let long = "x".repeat(TEXT_FIELD_BYTES + 40);
        let FieldValue::Text(content) = FieldValue::text(long) else {
            panic!("expected text value");
        };
        assert_eq!(content.len(), TEXT_FIELD_BYTES);
    }

    #[test]
    fn test_text_truncates_on_char_boundary() {
        // 129 bytes, and byte 128 falls inside the final two-byte 'é',
        // so truncation must back off to byte 127.
        let awkward = format!("a{}", "é".repeat(64));
        let FieldValue::Text(content) = FieldValue::text(awkward) else {
            panic!("expected text value");
        };
        assert_eq!(content.len(), TEXT_FIELD_BYTES - 1);
        assert!(content.is_char_boundary(content.len()));
        assert_eq!(content.chars().count(), 64);

        // 130 bytes with the limit exactly on a boundary keeps 128.
        let even = "é".repeat(65);
        let FieldValue::Text(content) = FieldValue::text(even) else {
            panic!("expected text value");
        };
        assert_eq!(content.len(), TEXT_FIELD_BYTES);
        assert_eq!(content.chars().count(), 64);
    }

    #[test]
    fn test_decode_rejects_bad_length_prefix() {
        let mut buf = vec![0u8; 132];
        buf[..4].copy_from_slice(&200u32.to_le_bytes());
        let err = FieldValue::decode(FieldType::Text, &buf).unwrap_err();
        assert!(matches!(err, TupleError::InvalidEncoding { .. }));
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        let mut buf = vec![0u8; 132];
        buf[..4].copy_from_slice(&2u32.to_le_bytes());
        buf[4] = 0xc3; // truncated multi-byte sequence
        buf[5] = 0x28;
        let err = FieldValue::decode(FieldType::Text, &buf).unwrap_err();
        assert!(matches!(err, TupleError::InvalidEncoding { .. }));
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::int(-3).to_string(), "-3");
        assert_eq!(FieldValue::text("abc").to_string(), "abc");
    }
}
