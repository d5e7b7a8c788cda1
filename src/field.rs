//! A single decoded (tag, value) pair, addressed zero-copy into its backing
//! region.

use rust_decimal::Decimal;

use crate::error::DecodeError;
use crate::tag::Tag;

pub const FIELD_SEPARATOR: u8 = 0x01;
pub const FIELD_KEY_VALUE_SEPARATOR: u8 = b'=';

/// A zero-copy view of one field's value bytes, plus its tag.
///
/// Construction never parses the value — `as_text`, `as_int`, and
/// `as_decimal` decode on demand so that scanning a wide message costs no
/// more than recording byte offsets unless the caller actually asks for a
/// typed value.
#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a> {
    pub(crate) tag: Tag,
    pub(crate) value: &'a [u8],
}

impl<'a> FieldView<'a> {
    #[inline]
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Raw value bytes, zero-copy.
    #[inline]
    pub fn bytes(&self) -> &'a [u8] {
        self.value
    }

    /// Decode the value as UTF-8 text.
    #[inline]
    pub fn as_text(&self) -> Result<&'a str, DecodeError> {
        std::str::from_utf8(self.value).map_err(|_| DecodeError::InvalidEncoding { tag: self.tag })
    }

    /// Decode the value as a base-10 signed integer.
    #[inline]
    pub fn as_int(&self) -> Result<i64, DecodeError> {
        let s = self.as_text()?;
        s.parse::<i64>()
            .map_err(|_| DecodeError::InvalidNumber { tag: self.tag })
    }

    /// Decode the value as a fixed-point decimal number (FIX `QTY`/`PRICE`
    /// fields such as 38/44/6/31 are this shape).
    #[inline]
    pub fn as_decimal(&self) -> Result<Decimal, DecodeError> {
        let s = self.as_text()?;
        s.parse::<Decimal>()
            .map_err(|_| DecodeError::InvalidNumber { tag: self.tag })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(tag: Tag, value: &'static [u8]) -> FieldView<'static> {
        FieldView { tag, value }
    }

    // Group 1 — raw access

    #[test]
    fn bytes_is_zero_copy() {
        let f = field(55, b"AAPL");
        assert_eq!(f.bytes(), b"AAPL");
        assert_eq!(f.tag(), 55);
    }

    #[test]
    fn lazy_decoding_does_not_happen_at_construction() {
        // Constructing a FieldView over garbage bytes must not panic or
        // error — only calling a typed accessor does.
        let f = field(999, &[0xFF, 0xFE, 0xFD]);
        assert_eq!(f.bytes(), &[0xFF, 0xFE, 0xFD]);
    }

    // Group 2 — text

    #[test]
    fn as_text_valid() {
        assert_eq!(field(55, b"AAPL").as_text().unwrap(), "AAPL");
    }

    #[test]
    fn as_text_invalid_utf8() {
        let f = field(58, &[0xFF, 0xFE]);
        assert!(matches!(
            f.as_text().unwrap_err(),
            DecodeError::InvalidEncoding { tag: 58 }
        ));
    }

    // Group 3 — integers

    #[test]
    fn as_int_valid() {
        assert_eq!(field(34, b"42").as_int().unwrap(), 42);
    }

    #[test]
    fn as_int_negative() {
        assert_eq!(field(38, b"-5").as_int().unwrap(), -5);
    }

    #[test]
    fn as_int_invalid() {
        assert!(matches!(
            field(38, b"abc").as_int().unwrap_err(),
            DecodeError::InvalidNumber { tag: 38 }
        ));
    }

    // Group 4 — decimals

    #[test]
    fn as_decimal_valid() {
        let d = field(44, b"150.25").as_decimal().unwrap();
        assert_eq!(d.to_string(), "150.25");
    }

    #[test]
    fn as_decimal_invalid() {
        assert!(matches!(
            field(44, b"not-a-number").as_decimal().unwrap_err(),
            DecodeError::InvalidNumber { tag: 44 }
        ));
    }
}
