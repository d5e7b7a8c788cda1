//! Error types for decoding and encoding FIX 4.4 messages.
//!
//! Every variant that can be raised against a specific position in the
//! input carries a byte offset, and every variant raised against a specific
//! field carries that field's tag.

use thiserror::Error;

use crate::tag::Tag;

/// Errors raised while locating, framing, or validating a message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Fewer than the minimum message bytes are available, or the trailer
    /// was never found — the caller should buffer more bytes and retry.
    #[error("truncated message at offset {offset}")]
    Truncated { offset: usize },

    /// The first field was not `8=FIX.4.4`.
    #[error("bad begin string at offset {offset}")]
    BadBeginString { offset: usize },

    /// The second field was not tag 9 (BodyLength).
    #[error("missing body length field at offset {offset}")]
    MissingBodyLength { offset: usize },

    /// The message never reached a terminating tag 10 (CheckSum) field
    /// before a second BeginString field began — see DESIGN.md for why this
    /// is how an unterminated message is detected under a single-pass scan.
    #[error("missing checksum field at offset {offset}")]
    MissingChecksum { offset: usize },

    /// The declared BodyLength (tag 9) does not match the measured body
    /// byte count. Only checked when checksum validation is enabled.
    #[error("bad body length at offset {offset}: declared {declared}, measured {measured}")]
    BadBodyLength {
        offset: usize,
        declared: usize,
        measured: usize,
    },

    /// The declared CheckSum (tag 10) does not match the computed sum.
    #[error("bad checksum at offset {offset}: declared {declared}, computed {computed}")]
    BadChecksum {
        offset: usize,
        declared: u8,
        computed: u8,
    },

    /// A field had no `=` before its delimiter (or before the message end).
    #[error("malformed field at offset {offset}")]
    MalformedField { offset: usize },

    /// A tag's bytes did not parse as a decimal `u32`.
    #[error("invalid tag at offset {offset}")]
    InvalidTag { offset: usize },

    /// A typed accessor requested an integer decode of a non-numeric value.
    #[error("invalid number in tag {tag}")]
    InvalidNumber { tag: Tag },

    /// A typed accessor requested a text decode of non-UTF-8 bytes.
    #[error("invalid encoding in tag {tag}")]
    InvalidEncoding { tag: Tag },

    /// Tag 35's value is not a message type the dictionary recognizes.
    #[error("unknown msg type {msg_type:?} at offset {offset}")]
    UnknownMsgType { offset: usize, msg_type: String },

    /// A tag required for this message type is absent.
    #[error("missing required field: tag {tag}")]
    MissingRequiredField { tag: Tag },

    /// The in-progress message exceeded `max_message_size` before a
    /// terminating CheckSum field was found.
    #[error("message too large at offset {offset}: {size} bytes")]
    MessageTooLarge { offset: usize, size: usize },
}

/// Errors raised while building an outbound FIX message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// `msg_type` was empty.
    #[error("missing msg type")]
    MissingMsgType,

    /// A header/trailer tag (8, 9, 35, 49, 56, 34, 52, or 10) was supplied
    /// in `body_fields`; these are owned by the encoder itself.
    #[error("reserved tag {tag} supplied in body fields")]
    ReservedTagInBody { tag: Tag },

    /// The caller-owned output buffer was too small to hold the encoded
    /// message (only raised by the fixed-buffer encode variant).
    #[error("buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall { needed: usize, available: usize },
}
