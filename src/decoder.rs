use memchr::memchr;
use smallvec::SmallVec;

use crate::checksum::{compute_checksum, parse_body_length, parse_checksum};
use crate::dictionary::Dictionary;
use crate::error::DecodeError;
use crate::field::{FIELD_KEY_VALUE_SEPARATOR, FIELD_SEPARATOR};
use crate::message::Message;
use crate::tag::{self, parse_tag, Tag};

/// Default inline capacity: covers ~95% of FIX messages without heap spill.
const DEFAULT_CAPACITY: usize = 32;

/// Smallest buffer that could possibly hold a full message:
/// `8=FIX.4.4\x019=0\x0110=000\x01` is 20 bytes.
const MIN_MESSAGE_BYTES: usize = 20;

const DEFAULT_MAX_MESSAGE_SIZE: usize = 1_048_576;

/// Construction options for [`Decoder`].
#[derive(Debug, Clone, Copy)]
pub struct DecoderOptions {
    /// Verify `BodyLength` and `CheckSum` against the bytes actually read.
    pub validate_checksum: bool,
    /// Reject unrecognized message types and messages missing a required
    /// field for their type.
    pub validate_dictionary: bool,
    /// Upper bound, in bytes, a single message scan may consume before the
    /// checksum trailer is found.
    pub max_message_size: usize,
    pub dictionary: Dictionary,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            validate_checksum: true,
            validate_dictionary: true,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            dictionary: Dictionary::new(),
        }
    }
}

/// A reusable FIX message decoder.
///
/// Owns a `SmallVec` scratch buffer that is allocated once and reused across
/// every `decode_one` call — zero allocation per message on the hot path.
/// Stores `(tag, value_start, value_end)` byte offsets rather than slices,
/// eliminating unsafe lifetime transmutes while preserving zero-copy
/// semantics.
///
/// # Example
/// ```ignore
/// let mut decoder = Decoder::new();
/// let mut cursor = 0;
/// while let Some(result) = decoder.decode_all(region).next() {
///     let msg = result?;
///     process(msg);
/// }
/// ```
pub struct Decoder {
    options: DecoderOptions,
    offsets: SmallVec<[(Tag, u32, u32); DEFAULT_CAPACITY]>,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    /// Create a decoder with default options (all validation on).
    pub fn new() -> Self {
        Self::with_options(DecoderOptions::default())
    }

    pub fn with_options(options: DecoderOptions) -> Self {
        Self {
            options,
            offsets: SmallVec::new(),
        }
    }

    /// Create a decoder pre-allocated for `capacity` fields, using default
    /// options. Use this when messages consistently exceed 32 fields.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            options: DecoderOptions::default(),
            offsets: SmallVec::with_capacity(capacity),
        }
    }

    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Attempt to parse exactly one message starting at `*cursor` within
    /// `region`.
    ///
    /// On success, `*cursor` is advanced to the byte after the parsed
    /// message. On any failure, `*cursor` is left at its entry value and no
    /// partial `Message` is returned — clearing `self.offsets` at entry (not
    /// on exit) ensures a prior failure can never leak stale fields into the
    /// next attempt.
    pub fn decode_one<'a>(
        &'a mut self,
        region: &'a [u8],
        cursor: &mut usize,
    ) -> Result<Message<'a>, DecodeError> {
        let start = *cursor;
        self.offsets.clear();

        if region.len().saturating_sub(start) < MIN_MESSAGE_BYTES {
            return Err(DecodeError::Truncated { offset: start });
        }

        let mut pos = start;
        let mut body_start = 0usize;
        let mut msg_type_range: Option<(usize, usize)> = None;
        let mut message_end = 0usize;

        loop {
            if pos - start > self.options.max_message_size {
                return Err(DecodeError::MessageTooLarge {
                    offset: start,
                    size: pos - start,
                });
            }

            let next_soh = memchr(FIELD_SEPARATOR, &region[pos..]).map(|i| i + pos);
            let next_eq = memchr(FIELD_KEY_VALUE_SEPARATOR, &region[pos..]).map(|i| i + pos);

            let eq_pos = match (next_eq, next_soh) {
                (Some(eq), Some(soh)) if eq < soh => eq,
                (Some(_), Some(_)) => return Err(DecodeError::MalformedField { offset: pos }),
                (Some(eq), None) => eq,
                (None, _) => return Err(DecodeError::Truncated { offset: start }),
            };

            let tag = parse_tag(&region[pos..eq_pos]).ok_or(DecodeError::InvalidTag { offset: pos })?;

            let soh_pos = memchr(FIELD_SEPARATOR, &region[eq_pos + 1..])
                .map(|i| i + eq_pos + 1)
                .ok_or(DecodeError::Truncated { offset: start })?;

            let value_start = eq_pos + 1;
            let value_end = soh_pos;
            let field_index = self.offsets.len();

            match field_index {
                0 => {
                    if tag != tag::BEGIN_STRING || &region[value_start..value_end] != b"FIX.4.4" {
                        return Err(DecodeError::BadBeginString { offset: start });
                    }
                }
                1 => {
                    if tag != tag::BODY_LENGTH {
                        return Err(DecodeError::MissingBodyLength { offset: start });
                    }
                    body_start = soh_pos + 1;
                }
                _ if tag == tag::BEGIN_STRING => {
                    // A second BeginString before any CheckSum means the
                    // previous message never reached its trailer.
                    return Err(DecodeError::MissingChecksum { offset: pos });
                }
                _ => {}
            }

            self.offsets.push((tag, value_start as u32, value_end as u32));

            if tag == tag::MSG_TYPE {
                msg_type_range = Some((value_start, value_end));
            }

            if tag == tag::CHECK_SUM && field_index >= 2 {
                message_end = soh_pos + 1;
                break;
            }

            pos = soh_pos + 1;
        }

        let (_, checksum_value_start, checksum_value_end) =
            *self.offsets.last().expect("checksum field just recorded");
        let checksum_field_start = checksum_value_start as usize - 3; // len("10=") == 3

        // BodyLength and CheckSum are parsed unconditionally — callers can
        // read Message::body_length/checksum regardless of whether integrity
        // validation is switched on.
        let (_, body_len_start, body_len_end) = self.offsets[1];
        let declared_len = parse_body_length(&region[body_len_start as usize..body_len_end as usize]).ok_or(
            DecodeError::MalformedField {
                offset: body_len_start as usize,
            },
        )?;
        let declared_checksum =
            parse_checksum(&region[checksum_value_start as usize..checksum_value_end as usize]).ok_or(
                DecodeError::MalformedField {
                    offset: checksum_field_start,
                },
            )?;

        if self.options.validate_checksum {
            let measured_len = checksum_field_start - body_start;
            if declared_len != measured_len {
                return Err(DecodeError::BadBodyLength {
                    offset: start,
                    declared: declared_len,
                    measured: measured_len,
                });
            }

            let computed = compute_checksum(&region[start..checksum_field_start]);
            if declared_checksum != computed {
                return Err(DecodeError::BadChecksum {
                    offset: start,
                    declared: declared_checksum,
                    computed,
                });
            }
        }

        if self.options.validate_dictionary {
            let (mt_start, mt_end) = msg_type_range.ok_or(DecodeError::UnknownMsgType {
                offset: start,
                msg_type: String::new(),
            })?;
            let mt_str = std::str::from_utf8(&region[mt_start..mt_end])
                .map_err(|_| DecodeError::InvalidEncoding { tag: tag::MSG_TYPE })?;
            let msg_type = self
                .options
                .dictionary
                .msg_type(mt_str)
                .ok_or_else(|| DecodeError::UnknownMsgType {
                    offset: start,
                    msg_type: mt_str.to_string(),
                })?;

            for required in self.options.dictionary.required_fields(msg_type) {
                if !self.offsets.iter().any(|&(t, _, _)| t == required) {
                    return Err(DecodeError::MissingRequiredField { tag: required });
                }
            }
        }

        *cursor = message_end;
        Ok(Message {
            buf: region,
            offsets: self.offsets.as_slice(),
            body_length: declared_len,
            checksum: declared_checksum,
        })
    }

    /// Lazily decode every message in `region`, starting at byte 0.
    ///
    /// Not a `std::iter::Iterator` — each yielded `Message` borrows mutably
    /// from this decoder, which `Iterator::next`'s `&mut self -> Option<Self::Item>`
    /// signature cannot express without the item's lifetime escaping the
    /// borrow. `Messages::next` is a plain inherent method instead.
    pub fn decode_all<'a>(&'a mut self, region: &'a [u8]) -> Messages<'a> {
        Messages {
            decoder: self,
            region,
            cursor: 0,
            done: false,
        }
    }
}

/// A lazy, non-restartable sequence of decoded messages over one region.
///
/// Terminates (returns `None`) when fewer than the minimum message bytes
/// remain, or permanently after the first `Err` — matching
/// `decode_all`'s documented behavior of stopping at the first failure.
pub struct Messages<'a> {
    decoder: &'a mut Decoder,
    region: &'a [u8],
    cursor: usize,
    done: bool,
}

impl<'a> Messages<'a> {
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<Result<Message<'_>, DecodeError>> {
        if self.done {
            return None;
        }
        if self.region.len().saturating_sub(self.cursor) < MIN_MESSAGE_BYTES {
            return None;
        }
        match self.decoder.decode_one(self.region, &mut self.cursor) {
            Ok(msg) => Some(Ok(msg)),
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }

    /// Byte offset into the region the next call to `next` will start from.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}
