use rust_decimal::Decimal;

use crate::error::DecodeError;
use crate::field::FieldView;
use crate::tag::{self, Tag};

/// A decoded FIX message.
///
/// Zero-allocation, zero-copy: both fields borrow directly from the
/// `Decoder` and the original input slice. The lifetime `'a` ties this
/// `Message` to both sources so no data is copied or heap-allocated.
#[derive(Debug)]
pub struct Message<'a> {
    /// The raw bytes of the complete FIX message as received. Every field
    /// value is a sub-slice of this buffer — no bytes are copied when
    /// accessing fields.
    pub(crate) buf: &'a [u8],

    /// Index of parsed fields, in wire order. Each entry is
    /// `(tag, start, end)` where `start`/`end` delimit the field's value
    /// bytes in `buf` (the bytes between `=` and the terminating SOH).
    pub(crate) offsets: &'a [(Tag, u32, u32)],

    /// The declared BodyLength (tag 9), parsed regardless of whether
    /// checksum validation is enabled.
    pub(crate) body_length: usize,

    /// The declared CheckSum (tag 10), parsed regardless of whether
    /// checksum validation is enabled.
    pub(crate) checksum: u8,
}

impl<'a> Message<'a> {
    /// Number of fields in the message, counting every occurrence of a
    /// repeated tag.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    #[inline]
    fn view(&self, entry: (Tag, u32, u32)) -> FieldView<'a> {
        let (tag, start, end) = entry;
        FieldView {
            tag,
            value: &self.buf[start as usize..end as usize],
        }
    }

    /// Returns the field at `index`, in wire order. Panics if
    /// `index >= self.len()`.
    #[inline]
    pub fn field(&self, index: usize) -> FieldView<'a> {
        self.view(self.offsets[index])
    }

    /// Iterate over every field occurrence in wire order, including
    /// repeated tags. Use this when duplicate occurrences of a tag all
    /// matter; use [`find`](Self::find) when only the last matters.
    #[inline]
    pub fn iter_in_order(&self) -> impl Iterator<Item = FieldView<'a>> + '_ {
        self.offsets.iter().map(move |&e| self.view(e))
    }

    /// Find the *last* occurrence of `tag`, or `None` if absent.
    ///
    /// FIX repeats of a tag outside a repeating group are a protocol
    /// anomaly some counterparties still send as a correction; the last
    /// value wins, matching how real gateways resolve it. Scans from the
    /// end so the common case (the field appears once) still costs one
    /// comparison.
    #[inline]
    pub fn find(&self, tag: Tag) -> Option<FieldView<'a>> {
        self.offsets
            .iter()
            .rev()
            .find(|&&(t, _, _)| t == tag)
            .map(|&e| self.view(e))
    }

    /// Is `tag` present anywhere in the message?
    #[inline]
    pub fn has(&self, tag: Tag) -> bool {
        self.offsets.iter().any(|&(t, _, _)| t == tag)
    }

    /// The raw tag-8 (`BeginString`) value, e.g. `b"FIX.4.4"`.
    #[inline]
    pub fn fix_version(&self) -> Option<&'a [u8]> {
        self.find(tag::BEGIN_STRING).map(|f| f.bytes())
    }

    /// The raw tag-35 (`MsgType`) wire value, e.g. `"D"`.
    #[inline]
    pub fn msg_type(&self) -> Option<Result<&'a str, DecodeError>> {
        self.find(tag::MSG_TYPE).map(|f| f.as_text())
    }

    /// The declared BodyLength (tag 9) — byte count of the body between tag
    /// 9's trailing SOH and the start of the CheckSum field.
    #[inline]
    pub fn body_length(&self) -> usize {
        self.body_length
    }

    /// The declared CheckSum (tag 10).
    #[inline]
    pub fn checksum(&self) -> u8 {
        self.checksum
    }

    /// Decode `tag`'s last occurrence as text.
    #[inline]
    pub fn get_text(&self, tag: Tag) -> Option<Result<&'a str, DecodeError>> {
        self.find(tag).map(|f| f.as_text())
    }

    /// Decode `tag`'s last occurrence as a signed integer.
    #[inline]
    pub fn get_int(&self, tag: Tag) -> Option<Result<i64, DecodeError>> {
        self.find(tag).map(|f| f.as_int())
    }

    /// Decode `tag`'s last occurrence as a fixed-point decimal.
    #[inline]
    pub fn get_decimal(&self, tag: Tag) -> Option<Result<Decimal, DecodeError>> {
        self.find(tag).map(|f| f.as_decimal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg<'a>(buf: &'a [u8], offsets: &'a [(Tag, u32, u32)]) -> Message<'a> {
        Message {
            buf,
            offsets,
            body_length: 0,
            checksum: 0,
        }
    }

    // Group 1 — basic access

    #[test]
    fn len_and_is_empty() {
        let buf = b"FIX.4.4";
        let offsets = [(8u32, 0u32, 7u32)];
        let m = msg(buf, &offsets);
        assert_eq!(m.len(), 1);
        assert!(!m.is_empty());

        let empty = msg(b"", &[]);
        assert!(empty.is_empty());
    }

    #[test]
    fn field_reconstructs_value() {
        let buf = b"FIX.4.4";
        let offsets = [(8u32, 0u32, 7u32)];
        let m = msg(buf, &offsets);
        assert_eq!(m.field(0).bytes(), b"FIX.4.4");
        assert_eq!(m.field(0).tag(), 8);
    }

    #[test]
    fn iter_in_order_preserves_duplicates() {
        // Two occurrences of tag 58.
        let buf = b"AB";
        let offsets = [(58u32, 0u32, 1u32), (58u32, 1u32, 2u32)];
        let m = msg(buf, &offsets);
        let values: Vec<&[u8]> = m.iter_in_order().map(|f| f.bytes()).collect();
        assert_eq!(values, vec![b"A".as_slice(), b"B".as_slice()]);
    }

    // Group 2 — last-wins lookup

    #[test]
    fn find_returns_last_occurrence() {
        let buf = b"AB";
        let offsets = [(58u32, 0u32, 1u32), (58u32, 1u32, 2u32)];
        let m = msg(buf, &offsets);
        assert_eq!(m.find(58).unwrap().bytes(), b"B");
    }

    #[test]
    fn find_absent_tag_is_none() {
        let m = msg(b"", &[]);
        assert!(m.find(999).is_none());
    }

    #[test]
    fn has_checks_presence() {
        let buf = b"D";
        let offsets = [(35u32, 0u32, 1u32)];
        let m = msg(buf, &offsets);
        assert!(m.has(35));
        assert!(!m.has(34));
    }

    // Group 3 — typed accessors

    #[test]
    fn msg_type_decodes_text() {
        let buf = b"D";
        let offsets = [(35u32, 0u32, 1u32)];
        let m = msg(buf, &offsets);
        assert_eq!(m.msg_type().unwrap().unwrap(), "D");
    }

    #[test]
    fn get_int_and_decimal() {
        let buf = b"4244.50";
        let offsets = [(34u32, 0u32, 2u32), (44u32, 2u32, 7u32)];
        let m = msg(buf, &offsets);
        assert_eq!(m.get_int(34).unwrap().unwrap(), 42);
        assert_eq!(m.get_decimal(44).unwrap().unwrap().to_string(), "44.50");
    }

    #[test]
    fn get_text_absent_tag_is_none() {
        let m = msg(b"", &[]);
        assert!(m.get_text(999).is_none());
    }

    #[test]
    fn fix_version_reads_tag_8() {
        let buf = b"FIX.4.4";
        let offsets = [(8u32, 0u32, 7u32)];
        let m = msg(buf, &offsets);
        assert_eq!(m.fix_version(), Some(b"FIX.4.4".as_slice()));
    }
}
